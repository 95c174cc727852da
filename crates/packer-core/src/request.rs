//! Build request resolution.
//!
//! The command line produces a [`PackageArgs`]; [`PackageArgs::validate`]
//! resolves defaults, checks the project layout, and yields the
//! [`BuildRequest`] every later step works from.

use std::path::{Path, PathBuf};

/// File that must exist at the project root for it to be packaged.
pub const ENTRYPOINT_FILE: &str = "__main__.py";

/// Dockerfile name used when `--dockerfile` is not given.
pub const DEFAULT_DOCKERFILE_NAME: &str = "Dockerfile";

/// Raw, unresolved inputs of one packaging run.
///
/// # Examples
///
/// ```
/// use packer_core::PackageArgs;
/// use std::path::PathBuf;
///
/// let args = PackageArgs {
///     project_path: PathBuf::from("/proj"),
///     output_image: "myapp:latest".to_owned(),
///     base_image: "python:3.9-slim".to_owned(),
///     dockerfile: None,
/// };
/// assert_eq!(args.resolved_dockerfile(), PathBuf::from("/proj/Dockerfile"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageArgs {
    /// Python project directory (the build context)
    pub project_path: PathBuf,
    /// Name of the image to produce
    pub output_image: String,
    /// Runtime image the final stage builds from
    pub base_image: String,
    /// Explicit Dockerfile location, if any
    pub dockerfile: Option<PathBuf>,
}

/// Fully resolved inputs of one packaging run.
///
/// Only obtainable through [`PackageArgs::validate`], so `project_path`
/// is known to have contained [`ENTRYPOINT_FILE`] at validation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    project_path: PathBuf,
    output_image: String,
    base_image: String,
    dockerfile: PathBuf,
}

impl PackageArgs {
    /// The Dockerfile path this run will use: the explicit one, or
    /// `<project_path>/Dockerfile`.
    pub fn resolved_dockerfile(&self) -> PathBuf {
        match &self.dockerfile {
            Some(path) => path.clone(),
            None => self.project_path.join(DEFAULT_DOCKERFILE_NAME),
        }
    }

    /// Resolve defaults and check the project layout.
    ///
    /// Logs the resolved configuration so operators can see what the run
    /// is going to do. Image names are not checked here; the container
    /// engine reports malformed references at build time.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingEntrypoint`](crate::Error::MissingEntrypoint) if
    ///   `<project_path>/__main__.py` is not a file
    pub fn validate(&self) -> crate::Result<BuildRequest> {
        let dockerfile = self.resolved_dockerfile();
        if self.dockerfile.is_none() {
            tracing::warn!(
                "--dockerfile is not specified, using {} by default",
                dockerfile.display()
            );
        }

        tracing::info!(project = %self.project_path.display(), "project");
        tracing::info!(dockerfile = %dockerfile.display(), "dockerfile");
        tracing::info!(base_image = %self.base_image, "base image");
        tracing::info!(output_image = %self.output_image, "output image");

        let entrypoint = self.project_path.join(ENTRYPOINT_FILE);
        if !entrypoint.is_file() {
            return Err(crate::Error::MissingEntrypoint {
                project_path: self.project_path.clone(),
                entrypoint,
            });
        }

        Ok(BuildRequest {
            project_path: self.project_path.clone(),
            output_image: self.output_image.clone(),
            base_image: self.base_image.clone(),
            dockerfile,
        })
    }
}

impl BuildRequest {
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn output_image(&self) -> &str {
        &self.output_image
    }

    pub fn base_image(&self) -> &str {
        &self.base_image
    }

    pub fn dockerfile(&self) -> &Path {
        &self.dockerfile
    }
}
