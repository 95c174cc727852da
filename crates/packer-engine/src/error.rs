#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to connect to the container engine — is Docker running and DOCKER_HOST correct?")]
    Connect { source: bollard::errors::Error },

    #[error("container engine build stream failed")]
    Stream { source: bollard::errors::Error },

    #[error("image build failed: {0}")]
    BuildFailed(String),

    #[error("failed to write build output")]
    Output { source: std::io::Error },
}
