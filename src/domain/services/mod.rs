//! Domain services
//!
//! Pure decision logic over values read from the data sources.

pub mod rotation;

pub use rotation::{classify_model, classify_properties, classify_queue_attribute, PropertyRule};
