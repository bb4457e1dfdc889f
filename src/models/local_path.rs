//! Local Path Definitions
//!
//! A [`LocalPath`] is an absolute, existing path on the machine running the
//! terminal UI. The only way to build one is through an existence check, so
//! holding a value means the path existed when it was extracted.

use std::fmt;
use std::path::{Path, PathBuf};

/// An absolute, canonical path that existed at extraction time
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalPath(PathBuf);

impl LocalPath {
    /// Canonicalize `path` and wrap it if it names an existing file or directory
    ///
    /// Relative paths resolve against the current working directory.
    pub fn from_existing(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return None;
        }

        match path.canonicalize() {
            Ok(canonical) => Some(Self(canonical)),
            Err(e) => {
                trace!("Rejecting '{}': {}", path.display(), e);
                None
            }
        }
    }

    /// Borrow the underlying path
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Final component of the path, used to name the remote copy
    ///
    /// The filesystem root has no final component and maps to `root`.
    pub fn base_name(&self) -> String {
        self.0
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string())
    }

    /// Lossy UTF-8 rendering for shell text
    pub fn to_string_lossy(&self) -> String {
        self.0.to_string_lossy().into_owned()
    }

    /// Consume the wrapper
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for LocalPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for LocalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
