use crate::error::EngineError;
use crate::progress;
use bollard::Docker;
use bollard::query_parameters::{BuildImageOptions, BuildImageOptionsBuilder};
use bytes::Bytes;
use futures_util::stream::StreamExt;
use http_body_util::{Either, Full};

/// What the engine needs besides the context archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Dockerfile path inside the context archive
    pub dockerfile: String,
    /// Name the built image is tagged with
    pub tag: String,
}

/// Abstraction over the container engine for testability.
///
/// Production code uses [`DockerEngine`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait BuildEngine: Send + Sync {
    /// Build an image from a gzip'd tar context, reporting progress as it
    /// arrives.
    async fn build_image(&self, context: Vec<u8>, options: &BuildOptions)
    -> Result<(), EngineError>;
}

/// Docker-compatible engine reached through `bollard`.
pub struct DockerEngine {
    docker: Docker,
}

impl DockerEngine {
    /// Connect using the ambient environment (`DOCKER_HOST`, falling back
    /// to the local socket) and negotiate the API version with the daemon.
    pub async fn connect() -> Result<Self, EngineError> {
        let docker =
            Docker::connect_with_defaults().map_err(|e| EngineError::Connect { source: e })?;
        let docker = docker
            .negotiate_version()
            .await
            .map_err(|e| EngineError::Connect { source: e })?;

        let version = docker.client_version();
        tracing::debug!(
            api_version = %format!("{}.{}", version.major_version, version.minor_version),
            "container engine connected"
        );

        Ok(Self { docker })
    }
}

/// Query parameters for `POST /build`. Intermediate containers are removed
/// even when the build fails.
fn query_options(options: &BuildOptions) -> BuildImageOptions {
    BuildImageOptionsBuilder::new()
        .dockerfile(&options.dockerfile)
        .t(&options.tag)
        .rm(true)
        .forcerm(true)
        .build()
}

impl BuildEngine for DockerEngine {
    async fn build_image(
        &self,
        context: Vec<u8>,
        options: &BuildOptions,
    ) -> Result<(), EngineError> {
        let build_options = query_options(options);
        tracing::debug!(?build_options, bytes = context.len(), "starting image build");

        let body = Full::new(Bytes::from(context));
        let mut stream = self
            .docker
            .build_image(build_options, None, Some(Either::Left(body)));

        let mut stdout = std::io::stdout();
        while let Some(msg) = stream.next().await {
            let info = msg.map_err(|e| EngineError::Stream { source: e })?;
            progress::print(&info, &mut stdout)?;
        }

        Ok(())
    }
}
