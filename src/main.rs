use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use blockprobe::infrastructure::discover_devices;
use blockprobe::presentation::cli::{format_report_details, format_report_table, Cli, Commands};
use blockprobe::{DeviceReport, ProbeOptions, StorageDevice};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.debug);

    let options = ProbeOptions::new()
        .with_sysfs_root(&cli.sysfs_root)
        .with_udev_data_dir(&cli.udev_data);

    match cli.command {
        Commands::Info { device, json } => {
            let report = probe(&device, &options)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", format_report_details(&report));
            }
        }
        Commands::Rotational { device } => {
            let device = StorageDevice::with_options(&device, &options)?;
            let classification = device
                .classify_rotation()
                .with_context(|| format!("Failed to classify {}", device.path().display()))?;
            println!(
                "{}\t{}",
                u8::from(classification.rotational),
                classification.evidence
            );
        }
        Commands::List { json } => {
            let names = discover_devices(&options.sysfs_root)
                .with_context(|| format!("Failed to list {}", options.sysfs_root.display()))?;

            let mut reports = Vec::with_capacity(names.len());
            for name in names {
                let path = Path::new("/dev").join(&name);
                match probe(&path, &options) {
                    Ok(report) => reports.push(report),
                    Err(e) => tracing::warn!("Skipping {}: {:#}", name, e),
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else if reports.is_empty() {
                println!("[!] No block devices found.");
            } else {
                print!("{}", format_report_table(&reports));
            }
        }
    }

    Ok(())
}

fn probe(path: &Path, options: &ProbeOptions) -> Result<DeviceReport> {
    let device = StorageDevice::with_options(path, options)?;
    device
        .report()
        .with_context(|| format!("Failed to probe {}", path.display()))
}

fn init_logging(verbose: bool, debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}
