//! Domain entities
//!
//! Core objects describing what is known about a storage device.

mod classification;
mod device_report;
mod property_map;

pub use classification::{Classification, MediaKind, RotationEvidence};
pub use device_report::DeviceReport;
pub use property_map::PropertyMap;
