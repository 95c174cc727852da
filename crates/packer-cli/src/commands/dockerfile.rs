use packer_build::DockerfileGenerator;
use packer_build::generated::write_new;
use std::path::Path;

pub fn dockerfile(base_image: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let content = DockerfileGenerator::new(base_image).render();

    match output {
        Some(path) => {
            write_new(path, &content)?;
            println!("Wrote Dockerfile to {}", path.display());
            println!("Pass it to `python-packer docker --dockerfile` to build with it.");
        }
        None => print!("{content}"),
    }

    Ok(())
}
