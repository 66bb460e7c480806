//! Storage device classification.
//!
//! Given a block device path, [`StorageDevice`] works out whether the
//! medium behind it spins, combining udev properties, sysfs attributes and
//! the model string in a fixed order of precedence. It also exposes model,
//! vendor, serial, capacity and a few flags read the same way.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::dto::ProbeOptions;
pub use application::{StorageDevice, StorageDeviceError};
pub use domain::entities::{Classification, DeviceReport, MediaKind, PropertyMap, RotationEvidence};
pub use domain::repositories::{
    DeviceLookupError, DevicePropertySource, SysfsAttributeSource, SysfsError,
};
pub use infrastructure::{SysfsAttributes, UdevDatabase};
