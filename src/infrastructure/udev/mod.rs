//! udev property database reader
//!
//! udev keeps the properties it computed for every device in a runtime
//! database, one record per device named after its type and device number
//! (`/run/udev/data/b8:0` for the block device 8:0). Each record line has
//! the form `<type>:<payload>`:
//!
//! - `E:KEY=VALUE` a device property
//! - `S:disk/by-id/...` a symlink below `/dev`
//!
//! Other line types (tags, timestamps, priorities) are not properties and
//! are skipped.

use crate::domain::entities::PropertyMap;
use crate::domain::repositories::{DeviceLookupError, DevicePropertySource};
use rustix::fs::FileType;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Default location of the udev runtime database
pub const UDEV_DATA_DIR: &str = "/run/udev/data";

const DEVLINKS: &str = "DEVLINKS";
const DEVNAME: &str = "DEVNAME";

/// Property source backed by the udev runtime database
#[derive(Debug, Clone)]
pub struct UdevDatabase {
    data_dir: PathBuf,
}

impl UdevDatabase {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the database record of block device `major:minor`
    pub fn record_path(&self, major: u32, minor: u32) -> PathBuf {
        self.data_dir.join(format!("b{}:{}", major, minor))
    }

    /// Reads the properties of the block device with the given number
    pub fn properties_for_devnum(
        &self,
        major: u32,
        minor: u32,
    ) -> Result<PropertyMap, DeviceLookupError> {
        let record = self.record_path(major, minor);

        match fs::read_to_string(&record) {
            Ok(content) => Ok(parse_record(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(DeviceLookupError::NoRecord {
                path: PathBuf::from(format!("{}:{}", major, minor)),
                record,
            }),
            Err(source) => Err(DeviceLookupError::Unreadable { record, source }),
        }
    }

    /// Resolves `device_path` to a block device number
    fn device_number(device_path: &Path) -> Result<(u32, u32), DeviceLookupError> {
        let stat = rustix::fs::stat(device_path).map_err(|errno| DeviceLookupError::NotFound {
            path: device_path.to_path_buf(),
            source: io::Error::from(errno),
        })?;

        if FileType::from_raw_mode(stat.st_mode as _) != FileType::BlockDevice {
            return Err(DeviceLookupError::NotBlockDevice {
                path: device_path.to_path_buf(),
            });
        }

        let rdev: rustix::fs::Dev = stat.st_rdev as _;
        Ok((rustix::fs::major(rdev), rustix::fs::minor(rdev)))
    }
}

impl Default for UdevDatabase {
    fn default() -> Self {
        Self::new(UDEV_DATA_DIR)
    }
}

impl DevicePropertySource for UdevDatabase {
    fn properties(&self, device_path: &Path) -> Result<PropertyMap, DeviceLookupError> {
        let (major, minor) = Self::device_number(device_path)?;
        let mut properties = match self.properties_for_devnum(major, minor) {
            Err(DeviceLookupError::NoRecord { record, .. }) => {
                return Err(DeviceLookupError::NoRecord {
                    path: device_path.to_path_buf(),
                    record,
                });
            }
            other => other?,
        };

        if !properties.contains(DEVNAME) {
            let devname =
                fs::canonicalize(device_path).unwrap_or_else(|_| device_path.to_path_buf());
            properties.insert(DEVNAME, devname.to_string_lossy());
        }

        tracing::trace!(
            device = %device_path.display(),
            major,
            minor,
            count = properties.len(),
            "loaded udev properties"
        );
        Ok(properties)
    }
}

/// Parses the content of a udev database record
pub fn parse_record(content: &str) -> PropertyMap {
    let mut properties = PropertyMap::new();
    let mut links = Vec::new();

    for line in content.lines() {
        let Some((kind, payload)) = line.split_once(':') else {
            continue;
        };

        match kind {
            "E" => {
                if let Some((key, value)) = payload.split_once('=') {
                    properties.insert(key, value);
                }
            }
            "S" if !payload.is_empty() => links.push(format!("/dev/{}", payload)),
            _ => {}
        }
    }

    if !links.is_empty() && !properties.contains(DEVLINKS) {
        properties.insert(DEVLINKS, links.join(" "));
    }

    properties
}
