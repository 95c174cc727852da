//! Dockerfile generation and build context packing for python-packer.
//!
//! # Build pipeline
//!
//! ```text
//! python-packer docker
//!   1. Validate   ── __main__.py at the project root
//!   2. Dockerfile ── DockerfileGenerator::generate() unless one exists
//!   3. Context    ── context::pack() → tar.gz of the project
//!   4. Build      ── container engine builds and tags the image
//!   5. Cleanup    ── GeneratedDockerfile dropped, generated file removed
//! ```
//!
//! # Generated Dockerfile
//!
//! Two stages:
//! - **builder** (`python`): `pipreqs` discovers imports, `pip install -t .`
//!   vendors them next to the sources in `/app`
//! - **runtime** (user's base image): copies `/app` and runs `python /app`

pub mod context;
pub mod dockerfile;
pub mod generated;
pub mod generator;

pub use context::{BuildContext, ContextError};
pub use dockerfile::{Dockerfile, Instruction, Stage};
pub use generated::{GeneratedDockerfile, GeneratedError};
pub use generator::DockerfileGenerator;
