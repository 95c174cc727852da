use crate::engine::{BuildEngine, BuildOptions};
use crate::error::EngineError;
use packer_build::context::{self, ContextError};
use packer_build::{DockerfileGenerator, GeneratedDockerfile, GeneratedError};
use packer_core::PackageArgs;
use std::future::Future;

/// Result of a successful packaging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutcome {
    /// Tag of the built image
    pub image: String,
    /// Whether a Dockerfile was generated (and removed again) for the build
    pub generated_dockerfile: bool,
}

/// Run the full packaging pipeline: validate → Dockerfile → connect → build.
///
/// `connect` is only called once validation passed and the Dockerfile is
/// in place. A Dockerfile generated here is removed before this function
/// returns, whether the build succeeded or not; an existing one is never
/// touched.
pub async fn package<E, F, Fut>(args: &PackageArgs, connect: F) -> Result<PackageOutcome, PackageError>
where
    E: BuildEngine,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<E, EngineError>>,
{
    let request = args.validate()?;

    let generated = if request.dockerfile().exists() {
        tracing::info!(path = %request.dockerfile().display(), "using existing Dockerfile");
        None
    } else {
        tracing::warn!(
            "Dockerfile not found at {}, generating a default one",
            request.dockerfile().display()
        );
        let content = DockerfileGenerator::for_request(&request).render();
        tracing::info!("Dockerfile:\n{content}");
        Some(GeneratedDockerfile::create(request.dockerfile(), &content)?)
    };

    tracing::info!("connecting to container engine");
    let engine = connect()
        .await
        .map_err(|e| PackageError::ClientConstruction { source: e })?;

    let context = context::pack(request.project_path(), request.dockerfile())?;
    let options = BuildOptions {
        dockerfile: context.dockerfile,
        tag: request.output_image().to_owned(),
    };

    tracing::info!(image = %options.tag, "building image");
    engine
        .build_image(context.archive, &options)
        .await
        .map_err(|e| PackageError::Build {
            image: options.tag.clone(),
            source: e,
        })?;

    tracing::info!("successfully built image '{}'", options.tag);

    Ok(PackageOutcome {
        image: options.tag,
        generated_dockerfile: generated.is_some(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error(transparent)]
    Validation(#[from] packer_core::Error),

    #[error(transparent)]
    Write(#[from] GeneratedError),

    #[error("failed to create container engine client")]
    ClientConstruction { source: EngineError },

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("failed to build image '{image}'")]
    Build { image: String, source: EngineError },
}
