//! Filesystem-based resource provider.
//!
//! Relative paths resolve against a base directory, normally the directory
//! holding the configuration file that named them. Absolute paths are used
//! as given, since font files commonly live in system font directories.

use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tagpress_traits::{ResourceError, ResourceProvider, SharedResourceData};

#[derive(Debug, Clone)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// A provider rooted at the process working directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.base_path.join(candidate)
        }
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self.resolve(path);
        debug!("Loading resource '{}' from {}", path, full_path.display());

        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(full_path.display().to_string())
            } else {
                ResourceError::LoadFailed {
                    path: full_path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
