//! Resolution of the user-supplied migrations directory

use crate::error::{ConvertError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Turn `dir` into an absolute path naming an existing directory
pub fn resolve_migrations_directory(dir: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(dir).map_err(|e| {
        log::debug!("Cannot make {} absolute: {}", dir.display(), e);
        ConvertError::DirectoryNotReadable
    })?;
    let absolute = normalize(&absolute);

    match fs::metadata(&absolute) {
        Ok(meta) if meta.is_dir() => Ok(absolute),
        Ok(_) => {
            log::debug!("{} is not a directory", absolute.display());
            Err(ConvertError::DirectoryNotReadable)
        }
        Err(e) => {
            log::debug!("Cannot stat {}: {}", absolute.display(), e);
            Err(ConvertError::DirectoryNotReadable)
        }
    }
}

/// Lexically remove `.` and `..` components so parent walks stay meaningful
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
