use crate::dockerfile::Dockerfile;
use packer_core::BuildRequest;

/// Alias of the dependency-resolution stage.
pub const BUILDER_STAGE: &str = "builder";

/// Image the dependency-resolution stage runs on, independent of `--base-image`.
pub const BUILDER_IMAGE: &str = "python";

/// Directory the application and its vendored dependencies live in.
pub const APP_DIR: &str = "/app";

/// Generates the default two-stage Dockerfile for a Python project.
///
/// The `builder` stage discovers the project's imports with `pipreqs` and
/// installs them next to the sources; the final stage copies that directory
/// onto the user's base image and runs it with `python /app`.
pub struct DockerfileGenerator<'a> {
    base_image: &'a str,
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(base_image: &'a str) -> Self {
        Self { base_image }
    }

    pub fn for_request(request: &'a BuildRequest) -> Self {
        Self::new(request.base_image())
    }

    pub fn generate(&self) -> Dockerfile {
        let mut d = Dockerfile::new();

        d.from_as(BUILDER_IMAGE, BUILDER_STAGE)
            .run(["pip", "install", "pipreqs"])
            .workdir(APP_DIR)
            .add(".", ".")
            .run(["pipreqs", "."])
            .run(["pip", "install", "-r", "./requirements.txt", "-t", "."]);

        d.from(self.base_image)
            .copy_from(BUILDER_STAGE, APP_DIR, APP_DIR)
            .workdir("/")
            .entrypoint(["python", APP_DIR]);

        d
    }

    pub fn render(&self) -> String {
        self.generate().render()
    }
}
