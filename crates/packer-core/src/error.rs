use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "missing entrypoint {} — a python project needs __main__.py at its root",
        entrypoint.display()
    )]
    MissingEntrypoint {
        project_path: PathBuf,
        entrypoint: PathBuf,
    },
}
