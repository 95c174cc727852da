use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A Dockerfile this run wrote to disk.
///
/// The file is removed when the guard is dropped, so every exit path of
/// the build (success, engine error, early `?`) leaves the project as it
/// was found.
#[derive(Debug)]
pub struct GeneratedDockerfile {
    path: PathBuf,
}

impl GeneratedDockerfile {
    /// Write `content` to `path` and take ownership of the new file.
    ///
    /// Never overwrites: an existing file at `path` is an error.
    pub fn create(path: &Path, content: &str) -> Result<Self, GeneratedError> {
        write_new(path, content)?;
        tracing::debug!(path = %path.display(), "generated Dockerfile written");
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for GeneratedDockerfile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "generated Dockerfile removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "generated Dockerfile already gone")
            }
            // arch-lint: allow(no-error-swallowing) reason="Drop cannot propagate; the build result is already decided"
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove generated Dockerfile"
            ),
        }
    }
}

/// Write `content` to a new file at `path`, refusing to overwrite.
pub fn write_new(path: &Path, content: &str) -> Result<(), GeneratedError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                GeneratedError::AlreadyExists(path.to_path_buf())
            } else {
                GeneratedError::Write {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

    file.write_all(content.as_bytes())
        .map_err(|e| GeneratedError::Write {
            path: path.to_path_buf(),
            source: e,
        })
}

#[derive(Debug, thiserror::Error)]
pub enum GeneratedError {
    #[error("{0} already exists — delete it or pick another path")]
    AlreadyExists(PathBuf),
    #[error("failed to write Dockerfile to {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_exists_while_guard_lives() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Dockerfile");

        let guard = GeneratedDockerfile::create(&path, "FROM alpine\n").unwrap();

        assert_eq!(guard.path(), path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "FROM alpine\n");
    }

    #[test]
    fn drop_removes_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Dockerfile");

        {
            let _guard = GeneratedDockerfile::create(&path, "FROM alpine\n").unwrap();
        }

        assert!(!path.exists());
    }

    #[test]
    fn drop_tolerates_file_already_gone() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Dockerfile");

        let guard = GeneratedDockerfile::create(&path, "FROM alpine\n").unwrap();
        std::fs::remove_file(&path).unwrap();
        drop(guard);

        assert!(!path.exists());
    }

    #[test]
    fn create_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Dockerfile");
        std::fs::write(&path, "FROM user-owned\n").unwrap();

        let err = GeneratedDockerfile::create(&path, "FROM alpine\n").unwrap_err();

        assert!(matches!(err, GeneratedError::AlreadyExists(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "FROM user-owned\n");
    }

    #[test]
    fn create_fails_when_parent_is_missing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("Dockerfile");

        let err = GeneratedDockerfile::create(&path, "FROM alpine\n").unwrap_err();

        assert!(matches!(err, GeneratedError::Write { .. }));
        assert!(err.to_string().contains("failed to write"), "got: {err}");
    }
}
