//! Sysfs attribute reader
//!
//! Reads the plain-text attribute files the kernel exposes for each block
//! device under `/sys/block/<name>/`.

use crate::domain::repositories::{SysfsAttributeSource, SysfsError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default location of the per-device attribute directories
pub const SYSFS_BLOCK_ROOT: &str = "/sys/block";

/// Filesystem-backed sysfs attribute reader
///
/// The root is configurable so that a directory tree shaped like
/// `/sys/block` can stand in for the real one.
#[derive(Debug, Clone)]
pub struct SysfsAttributes {
    root: PathBuf,
}

impl SysfsAttributes {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for SysfsAttributes {
    fn default() -> Self {
        Self::new(SYSFS_BLOCK_ROOT)
    }
}

impl SysfsAttributeSource for SysfsAttributes {
    fn read_attribute(
        &self,
        device_name: &str,
        attribute: &str,
    ) -> Result<Option<String>, SysfsError> {
        let path = self.device_dir(device_name).join(attribute);

        match fs::read_to_string(&path) {
            Ok(content) => {
                tracing::trace!(path = %path.display(), "read sysfs attribute");
                Ok(Some(content.trim().to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::trace!(path = %path.display(), "sysfs attribute absent");
                Ok(None)
            }
            Err(source) => Err(SysfsError::Io { path, source }),
        }
    }

    fn device_dir(&self, device_name: &str) -> PathBuf {
        self.root.join(device_name)
    }
}

/// Returns true for kernel block devices that are not backed by real media
pub fn is_virtual_device(name: &str) -> bool {
    name.starts_with("loop")
        || name.starts_with("ram")
        || name.starts_with("dm-")
        || name.starts_with("zram")
        || name.starts_with("nbd")
}

/// Lists the non-virtual block devices below `root`, sorted by name
pub fn discover_devices(root: &Path) -> Result<Vec<String>, SysfsError> {
    let entries = fs::read_dir(root).map_err(|source| SysfsError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = entries
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| !is_virtual_device(name))
        .collect();

    names.sort();
    Ok(names)
}
