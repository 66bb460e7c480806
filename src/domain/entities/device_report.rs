//! Device report entity
//!
//! A point-in-time snapshot of everything the resolver can tell about one
//! device, suitable for display or JSON output.

use super::classification::{MediaKind, RotationEvidence};
use serde::Serialize;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;
const TB: u64 = GB * 1024;

/// Snapshot of the single-valued attributes of a storage device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceReport {
    /// Short kernel name (e.g. `sda`)
    pub name: String,
    /// Path the report was requested for
    pub path: String,
    /// Directory holding the device's sysfs attributes
    pub sysfs_path: String,
    pub model: String,
    pub vendor: String,
    pub serial: String,
    /// Capacity in bytes
    pub size: u64,
    pub removable: bool,
    pub read_only: bool,
    pub rotational: bool,
    /// Which source decided `rotational`
    pub evidence: RotationEvidence,
    pub media_kind: MediaKind,
    /// Symlinks udev maintains for the device
    pub device_links: Vec<String>,
}

impl DeviceReport {
    pub fn size_human(&self) -> String {
        if self.size >= TB {
            format!("{:.2} TB", self.size as f64 / TB as f64)
        } else if self.size >= GB {
            format!("{:.2} GB", self.size as f64 / GB as f64)
        } else if self.size >= MB {
            format!("{:.2} MB", self.size as f64 / MB as f64)
        } else if self.size >= KB {
            format!("{:.2} KB", self.size as f64 / KB as f64)
        } else {
            format!("{} B", self.size)
        }
    }
}
