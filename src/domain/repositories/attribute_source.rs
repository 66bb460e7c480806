//! Sysfs attribute source trait
//!
//! Defines how per-device text attributes (the files under
//! `/sys/block/<name>/`) are read.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a sysfs attribute.
///
/// A missing attribute is not an error; it is reported as `Ok(None)`.
#[derive(Error, Debug)]
pub enum SysfsError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read access to the text attributes of block devices
///
/// Implementations address attributes as `<root>/<device_name>/<attribute>`
/// and return the content with surrounding whitespace trimmed.
///
/// # Example
///
/// ```ignore
/// let sysfs = SysfsAttributes::default();
/// let model = sysfs.read_attribute("sda", "device/model")?;
/// ```
pub trait SysfsAttributeSource: Send + Sync {
    /// Reads an attribute of `device_name`
    ///
    /// # Returns
    ///
    /// `Ok(None)` if the attribute does not exist, the trimmed content
    /// otherwise.
    fn read_attribute(
        &self,
        device_name: &str,
        attribute: &str,
    ) -> Result<Option<String>, SysfsError>;

    /// Returns the directory holding the attributes of `device_name`
    fn device_dir(&self, device_name: &str) -> PathBuf;

    /// Returns true if the attribute exists and can be read
    fn has_attribute(&self, device_name: &str, attribute: &str) -> bool {
        matches!(self.read_attribute(device_name, attribute), Ok(Some(_)))
    }
}
