//! Presentation layer
//!
//! Command-line parsing and text output.

pub mod cli;
