mod docker;
mod dockerfile;

pub use docker::docker;
pub use dockerfile::dockerfile;
