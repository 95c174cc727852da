//! Container engine access and the packaging pipeline.
//!
//! [`BuildEngine`] is the seam between python-packer and the container
//! engine. [`DockerEngine`] talks to a Docker-compatible daemon through
//! `bollard`; tests substitute mockall mocks.
//!
//! [`pipeline::package`] sequences a full run: validate, generate a
//! Dockerfile if none exists, connect, build, clean up.

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod progress;

pub use engine::{BuildEngine, BuildOptions, DockerEngine};
pub use error::EngineError;
pub use pipeline::{PackageError, PackageOutcome, package};
