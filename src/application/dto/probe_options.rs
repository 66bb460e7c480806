//! Probe options DTO

use crate::infrastructure::{SYSFS_BLOCK_ROOT, UDEV_DATA_DIR};
use std::path::PathBuf;

/// Where the resolver looks for system state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Directory holding one attribute directory per block device
    pub sysfs_root: PathBuf,
    /// udev runtime database directory
    pub udev_data_dir: PathBuf,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            sysfs_root: PathBuf::from(SYSFS_BLOCK_ROOT),
            udev_data_dir: PathBuf::from(UDEV_DATA_DIR),
        }
    }
}

impl ProbeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sysfs block root
    pub fn with_sysfs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sysfs_root = root.into();
        self
    }

    /// Sets the udev database directory
    pub fn with_udev_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.udev_data_dir = dir.into();
        self
    }
}
