//! Application layer
//!
//! The storage device resolver that collaborators call into.

pub mod dto;
mod storage_device;

pub use storage_device::{StorageDevice, StorageDeviceError};
