use flate2::Compression;
use flate2::write::GzEncoder;
use std::path::{Component, Path, PathBuf};

/// Archive entry used for a Dockerfile that lives outside the project.
pub const EXTERNAL_DOCKERFILE_ENTRY: &str = ".python-packer.Dockerfile";

/// Contexts above this size usually mean a virtualenv or cache slipped in.
const LARGE_CONTEXT_BYTES: usize = 500 * 1024 * 1024;

/// A packed build context, ready to send to the engine.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// gzip'd tar of the project directory
    pub archive: Vec<u8>,
    /// Dockerfile location inside `archive`, `/`-separated
    pub dockerfile: String,
}

/// Pack `project_dir` into a build context that uses `dockerfile`.
///
/// A Dockerfile inside the project is referenced by its relative path.
/// One outside it is appended to the archive as
/// [`EXTERNAL_DOCKERFILE_ENTRY`].
pub fn pack(project_dir: &Path, dockerfile: &Path) -> Result<BuildContext, ContextError> {
    tracing::debug!(project = %project_dir.display(), "packing build context");

    let in_context = relative_to(project_dir, dockerfile);

    let mut archive = Vec::new();
    {
        let encoder = GzEncoder::new(&mut archive, Compression::default());
        let mut tar = tar::Builder::new(encoder);

        tar.append_dir_all(".", project_dir)
            .map_err(|e| ContextError::Archive {
                path: project_dir.to_path_buf(),
                source: e,
            })?;

        if in_context.is_none() {
            let content = std::fs::read(dockerfile).map_err(|e| ContextError::ReadDockerfile {
                path: dockerfile.to_path_buf(),
                source: e,
            })?;

            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            tar.append_data(&mut header, EXTERNAL_DOCKERFILE_ENTRY, content.as_slice())
                .map_err(|e| ContextError::Archive {
                    path: dockerfile.to_path_buf(),
                    source: e,
                })?;
        }

        let encoder = tar.into_inner().map_err(|e| ContextError::Archive {
            path: project_dir.to_path_buf(),
            source: e,
        })?;
        encoder.finish().map_err(|e| ContextError::Archive {
            path: project_dir.to_path_buf(),
            source: e,
        })?;
    }

    if archive.len() > LARGE_CONTEXT_BYTES {
        tracing::warn!(
            size_mb = archive.len() / 1024 / 1024,
            "build context is very large; check the project for virtualenvs or caches"
        );
    }
    tracing::debug!(bytes = archive.len(), "build context packed");

    let dockerfile = match in_context {
        Some(rel) => archive_path(&rel),
        None => EXTERNAL_DOCKERFILE_ENTRY.to_owned(),
    };

    Ok(BuildContext {
        archive,
        dockerfile,
    })
}

/// `path` relative to `dir`, if it lies inside it.
///
/// The textual check only applies to paths without `..`; anything else is
/// decided on canonical paths.
fn relative_to(dir: &Path, path: &Path) -> Option<PathBuf> {
    if !has_parent_dir(dir) && !has_parent_dir(path) && path.starts_with(dir) {
        return Some(strip(dir, path));
    }

    let dir = match dir.canonicalize() {
        Ok(d) => d,
        Err(e) => {
            tracing::debug!(path = %dir.display(), error = %e, "cannot canonicalize project");
            return None;
        }
    };
    let path = match path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot canonicalize Dockerfile");
            return None;
        }
    };

    path.starts_with(&dir).then(|| strip(&dir, &path))
}

fn has_parent_dir(path: &Path) -> bool {
    path.components().any(|c| c == Component::ParentDir)
}

/// Components of `path` after the `dir` prefix. Caller checks `starts_with`.
fn strip(dir: &Path, path: &Path) -> PathBuf {
    path.components().skip(dir.components().count()).collect()
}

fn archive_path(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("failed to archive build context from {path}")]
    Archive {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read Dockerfile at {path}")]
    ReadDockerfile {
        path: PathBuf,
        source: std::io::Error,
    },
}
