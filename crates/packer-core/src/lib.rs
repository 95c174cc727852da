//! Core types for python-packer.
//!
//! This crate turns the raw command-line inputs ([`PackageArgs`]) into a
//! validated [`BuildRequest`], and defines the project layout conventions
//! shared by the other crates.

pub mod error;
pub mod request;

pub use error::{Error, Result};
pub use request::{BuildRequest, DEFAULT_DOCKERFILE_NAME, ENTRYPOINT_FILE, PackageArgs};
