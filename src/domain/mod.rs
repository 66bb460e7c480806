//! Domain layer
//!
//! Entities, source traits and classification rules. Nothing in here
//! touches the filesystem.

pub mod entities;
pub mod repositories;
pub mod services;
