//! Infrastructure layer
//!
//! Concrete, Linux-backed implementations of the domain source traits.

pub mod sysfs;
pub mod udev;

pub use sysfs::{discover_devices, is_virtual_device, SysfsAttributes, SYSFS_BLOCK_ROOT};
pub use udev::{UdevDatabase, UDEV_DATA_DIR};
