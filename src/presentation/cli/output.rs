//! Text rendering of device reports

use crate::domain::entities::DeviceReport;

pub fn format_report_table(reports: &[DeviceReport]) -> String {
    let mut output = String::new();

    output.push_str("NAME       TYPE       SIZE RULE                      MODEL\n");
    output.push_str("--------------------------------------------------------------------\n");

    for report in reports {
        output.push_str(&format!(
            "{:<10} {:<4} {:>10} {:<25} {}\n",
            report.name,
            format!("{}", report.media_kind),
            report.size_human(),
            format!("{}", report.evidence),
            report.model
        ));
    }

    output
}

pub fn format_report_details(report: &DeviceReport) -> String {
    let mut lines = vec![
        format!("Device:     {}", report.path),
        format!("Name:       {}", report.name),
        format!("Sysfs:      {}", report.sysfs_path),
        format!("Model:      {}", report.model),
        format!("Vendor:     {}", report.vendor),
        format!("Serial:     {}", report.serial),
        format!("Size:       {} ({} bytes)", report.size_human(), report.size),
        format!("Removable:  {}", yes_no(report.removable)),
        format!("Read-only:  {}", yes_no(report.read_only)),
        format!(
            "Media:      {} (decided by {})",
            report.media_kind, report.evidence
        ),
    ];

    for link in &report.device_links {
        lines.push(format!("Link:       {}", link));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
