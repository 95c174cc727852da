use packer_core::PackageArgs;
use packer_engine::{DockerEngine, package};

/// Validate the project, build the image, and clean up.
pub async fn docker(args: &PackageArgs) -> anyhow::Result<()> {
    let outcome = package(args, DockerEngine::connect).await?;

    println!();
    println!("Built image: {}", outcome.image);
    Ok(())
}
