//! Data Transfer Objects

mod probe_options;

pub use probe_options::ProbeOptions;
