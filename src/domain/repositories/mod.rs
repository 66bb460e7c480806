//! Repository traits (interfaces)
//!
//! These traits define the contracts for the system data sources the
//! resolver reads from, so that tests can substitute them.

mod attribute_source;
mod property_source;

pub use attribute_source::{SysfsAttributeSource, SysfsError};
pub use property_source::{DeviceLookupError, DevicePropertySource};
