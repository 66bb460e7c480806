//! Device property source trait
//!
//! Defines the interface to the kernel's per-device key/value metadata
//! (the udev property store on Linux).

use crate::domain::entities::PropertyMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The property store could not locate the device at all
#[derive(Error, Debug)]
pub enum DeviceLookupError {
    #[error("Device not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Not a block device: {}", path.display())]
    NotBlockDevice { path: PathBuf },

    #[error("No property record for {} (expected {})", path.display(), record.display())]
    NoRecord { path: PathBuf, record: PathBuf },

    #[error("Failed to read property record {}: {source}", record.display())]
    Unreadable {
        record: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Lookup of device properties by device path
///
/// A device that exists but lacks a given property is not an error: the
/// property is simply absent from the returned map.
pub trait DevicePropertySource: Send + Sync {
    /// Returns all properties of the device at `device_path`
    fn properties(&self, device_path: &Path) -> Result<PropertyMap, DeviceLookupError>;

    /// Returns a single property of the device
    fn property(
        &self,
        device_path: &Path,
        name: &str,
    ) -> Result<Option<String>, DeviceLookupError> {
        Ok(self.properties(device_path)?.get(name).map(str::to_string))
    }
}
