//! CLI commands using clap

use crate::infrastructure::{SYSFS_BLOCK_ROOT, UDEV_DATA_DIR};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// blockprobe - storage device classifier
///
/// Reports whether block devices are spinning disks or solid-state, along
/// with their model, vendor, serial and capacity.
#[derive(Parser, Debug)]
#[command(name = "blockprobe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Classify block devices as rotational or solid-state", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Directory holding per-device sysfs attributes
    #[arg(long, global = true, default_value = SYSFS_BLOCK_ROOT)]
    pub sysfs_root: PathBuf,

    /// udev runtime database directory
    #[arg(long, global = true, default_value = UDEV_DATA_DIR)]
    pub udev_data: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show everything known about a device
    Info {
        /// Device node or symlink (e.g., /dev/sda, /dev/disk/by-id/...)
        #[arg(short = 'D', long)]
        device: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print 1 for rotational media, 0 for solid-state
    Rotational {
        /// Device node or symlink
        #[arg(short = 'D', long)]
        device: PathBuf,
    },

    /// List the non-virtual block devices on this system
    List {
        /// Print the reports as JSON
        #[arg(long)]
        json: bool,
    },
}
