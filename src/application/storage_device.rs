//! Storage device resolver
//!
//! Answers questions about a block device by combining udev properties and
//! sysfs attributes. Nothing is cached: every query reads the current state
//! of the system, so a resolver can be kept around across hot-plug events.

use crate::application::dto::ProbeOptions;
use crate::domain::entities::{
    Classification, DeviceReport, MediaKind, PropertyMap, RotationEvidence,
};
use crate::domain::repositories::{
    DeviceLookupError, DevicePropertySource, SysfsAttributeSource, SysfsError,
};
use crate::domain::services::{classify_model, classify_properties, classify_queue_attribute};
use crate::infrastructure::{SysfsAttributes, UdevDatabase};
use std::collections::VecDeque;
use std::ffi::OsString;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

const ATTR_MODEL: &str = "device/model";
const ATTR_VENDOR: &str = "device/vendor";
const ATTR_SERIAL: &str = "device/serial";
const ATTR_ROTATIONAL: &str = "queue/rotational";
const ATTR_SIZE: &str = "size";
const ATTR_REMOVABLE: &str = "removable";
const ATTR_READ_ONLY: &str = "ro";

const ID_VENDOR: &str = "ID_VENDOR";
const ID_SERIAL: &str = "ID_SERIAL";
const ID_SERIAL_SHORT: &str = "ID_SERIAL_SHORT";
const DEVLINKS: &str = "DEVLINKS";

/// Same limit the kernel applies to nested symlinks
const MAX_SYMLINK_HOPS: usize = 40;

/// sysfs reports capacity in 512-byte sectors regardless of the device's
/// logical block size
const SECTOR_SIZE: u64 = 512;

/// Errors surfaced by [`StorageDevice`] queries
#[derive(Error, Debug)]
pub enum StorageDeviceError {
    #[error("Invalid device path: {0:?}")]
    InvalidPath(String),

    #[error("Failed to resolve {}: {source}", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Sysfs(#[from] SysfsError),

    #[error(transparent)]
    Lookup(#[from] DeviceLookupError),
}

/// Read-only view of a single block device
///
/// # Example
///
/// ```ignore
/// let device = StorageDevice::new("/dev/sda")?;
/// if device.is_rotational()? {
///     println!("{} spins", device.model()?);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StorageDevice<P = UdevDatabase, S = SysfsAttributes> {
    path: PathBuf,
    properties: P,
    sysfs: S,
}

impl StorageDevice<UdevDatabase, SysfsAttributes> {
    /// Creates a resolver reading the live udev database and `/sys/block`
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StorageDeviceError> {
        Self::with_sources(path, UdevDatabase::default(), SysfsAttributes::default())
    }

    /// Creates a resolver reading the locations named in `options`
    pub fn with_options(
        path: impl AsRef<Path>,
        options: &ProbeOptions,
    ) -> Result<Self, StorageDeviceError> {
        Self::with_sources(
            path,
            UdevDatabase::new(&options.udev_data_dir),
            SysfsAttributes::new(&options.sysfs_root),
        )
    }
}

impl<P: DevicePropertySource, S: SysfsAttributeSource> StorageDevice<P, S> {
    /// Creates a resolver over explicit sources.
    ///
    /// The device itself is not touched until the first query.
    pub fn with_sources(
        path: impl AsRef<Path>,
        properties: P,
        sysfs: S,
    ) -> Result<Self, StorageDeviceError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(StorageDeviceError::InvalidPath(String::new()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            properties,
            sysfs,
        })
    }

    /// The path the resolver was created with
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolves symlinks in the device path.
    ///
    /// When the target does not exist the links are still followed as far
    /// as they go, so a dangling `/dev/disk/by-id/...` link yields the name
    /// of the device it points at.
    pub fn real_path(&self) -> Result<PathBuf, StorageDeviceError> {
        match fs::canonicalize(&self.path) {
            Ok(real) => Ok(real),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                resolve_links(&self.path).map_err(|source| StorageDeviceError::Resolve {
                    path: self.path.clone(),
                    source,
                })
            }
            Err(source) => Err(StorageDeviceError::Resolve {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Kernel name of the device (`sda` for `/dev/disk/by-id/ata-...`)
    pub fn device_name(&self) -> Result<String, StorageDeviceError> {
        let real = self.real_path()?;
        real.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| StorageDeviceError::InvalidPath(real.display().to_string()))
    }

    /// Directory holding the device's sysfs attributes
    pub fn sysfs_path(&self) -> Result<PathBuf, StorageDeviceError> {
        Ok(self.sysfs.device_dir(&self.device_name()?))
    }

    fn attribute(&self, attribute: &str) -> Result<Option<String>, StorageDeviceError> {
        let name = self.device_name()?;
        Ok(self.sysfs.read_attribute(&name, attribute)?)
    }

    fn flag_attribute(&self, attribute: &str) -> Result<bool, StorageDeviceError> {
        Ok(self.attribute(attribute)?.as_deref() == Some("1"))
    }

    /// All udev properties of the device
    pub fn properties(&self) -> Result<PropertyMap, StorageDeviceError> {
        Ok(self.properties.properties(&self.path)?)
    }

    pub fn property(&self, name: &str) -> Result<Option<String>, StorageDeviceError> {
        Ok(self.properties.property(&self.path, name)?)
    }

    pub fn has_property(&self, name: &str) -> Result<bool, StorageDeviceError> {
        Ok(self.property(name)?.is_some())
    }

    /// Properties, or `None` if the property store does not know the device
    fn properties_if_known(&self) -> Option<PropertyMap> {
        match self.properties.properties(&self.path) {
            Ok(properties) => Some(properties),
            Err(e) => {
                tracing::debug!(
                    device = %self.path.display(),
                    error = %e,
                    "device properties unavailable"
                );
                None
            }
        }
    }

    /// Model string from `device/model`, empty if the device has none
    pub fn model(&self) -> Result<String, StorageDeviceError> {
        Ok(self.attribute(ATTR_MODEL)?.unwrap_or_default())
    }

    /// Vendor from `device/vendor`, falling back to `ID_VENDOR`
    pub fn vendor(&self) -> Result<String, StorageDeviceError> {
        if let Some(vendor) = self.attribute(ATTR_VENDOR)? {
            return Ok(vendor);
        }

        Ok(self
            .properties_if_known()
            .and_then(|props| props.get(ID_VENDOR).map(str::to_string))
            .unwrap_or_default())
    }

    /// Serial number from udev, falling back to `device/serial`
    pub fn serial(&self) -> Result<String, StorageDeviceError> {
        let from_properties = self.properties_if_known().and_then(|props| {
            props
                .get(ID_SERIAL_SHORT)
                .or_else(|| props.get(ID_SERIAL))
                .map(str::to_string)
        });

        match from_properties {
            Some(serial) => Ok(serial),
            None => Ok(self.attribute(ATTR_SERIAL)?.unwrap_or_default()),
        }
    }

    /// Capacity in bytes, 0 if unknown
    pub fn size(&self) -> Result<u64, StorageDeviceError> {
        let sectors = self
            .attribute(ATTR_SIZE)?
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(0);
        Ok(sectors.saturating_mul(SECTOR_SIZE))
    }

    pub fn is_removable(&self) -> Result<bool, StorageDeviceError> {
        self.flag_attribute(ATTR_REMOVABLE)
    }

    pub fn is_read_only(&self) -> Result<bool, StorageDeviceError> {
        self.flag_attribute(ATTR_READ_ONLY)
    }

    /// Symlinks udev created for the device; empty if udev does not know it
    pub fn device_links(&self) -> Vec<String> {
        self.properties_if_known()
            .map(|props| props.list(DEVLINKS))
            .unwrap_or_default()
    }

    /// Decides whether the device is rotational and records why.
    ///
    /// udev properties are consulted first, then `queue/rotational`, and
    /// finally the model string. The first conclusive source wins.
    pub fn classify_rotation(&self) -> Result<Classification, StorageDeviceError> {
        if let Some(classification) = self
            .properties_if_known()
            .and_then(|props| classify_properties(&props))
        {
            return Ok(self.settled(classification));
        }

        if let Some(value) = self.attribute(ATTR_ROTATIONAL)? {
            return Ok(self.settled(Classification::new(
                classify_queue_attribute(&value),
                RotationEvidence::QueueAttribute,
            )));
        }

        let model = self.model()?;
        Ok(self.settled(Classification::new(
            classify_model(&model),
            RotationEvidence::ModelHeuristic,
        )))
    }

    fn settled(&self, classification: Classification) -> Classification {
        tracing::debug!(
            device = %self.path.display(),
            rotational = classification.rotational,
            evidence = %classification.evidence,
            "classified rotation"
        );
        classification
    }

    /// Returns true for spinning media
    pub fn is_rotational(&self) -> Result<bool, StorageDeviceError> {
        Ok(self.classify_rotation()?.rotational)
    }

    pub fn media_kind(&self) -> Result<MediaKind, StorageDeviceError> {
        Ok(self.classify_rotation()?.media_kind())
    }

    /// Collects every single-valued query into one report
    pub fn report(&self) -> Result<DeviceReport, StorageDeviceError> {
        let classification = self.classify_rotation()?;

        Ok(DeviceReport {
            name: self.device_name()?,
            path: self.path.display().to_string(),
            sysfs_path: self.sysfs_path()?.display().to_string(),
            model: self.model()?,
            vendor: self.vendor()?,
            serial: self.serial()?,
            size: self.size()?,
            removable: self.is_removable()?,
            read_only: self.is_read_only()?,
            rotational: classification.rotational,
            evidence: classification.evidence,
            media_kind: classification.media_kind(),
            device_links: self.device_links(),
        })
    }
}

/// Follows symlinks component by component without requiring the final
/// target to exist. Components that are missing or are not links are taken
/// literally.
fn resolve_links(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut pending: VecDeque<OsString> = components(&absolute);
    let mut resolved = PathBuf::from("/");
    let mut hops = 0;

    while let Some(part) = pending.pop_front() {
        if part == ".." {
            resolved.pop();
            continue;
        }

        let candidate = resolved.join(&part);
        match fs::read_link(&candidate) {
            Ok(target) => {
                hops += 1;
                if hops > MAX_SYMLINK_HOPS {
                    return Err(io::Error::other(format!(
                        "too many levels of symbolic links: {}",
                        path.display()
                    )));
                }
                if target.is_absolute() {
                    resolved = PathBuf::from("/");
                }
                for (i, component) in components(&target).into_iter().enumerate() {
                    pending.insert(i, component);
                }
            }
            Err(_) => resolved = candidate,
        }
    }

    Ok(resolved)
}

/// Normal and `..` components of a path; root and `.` are dropped
fn components(path: &Path) -> VecDeque<OsString> {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_os_string()),
            Component::ParentDir => Some(OsString::from("..")),
            _ => None,
        })
        .collect()
}
