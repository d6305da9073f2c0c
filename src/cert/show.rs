use crate::cert::parser::{CertificateParser, CertificateSummary};
use crate::utils::errors::Result;
use crate::utils::output::OutputFormat;
use std::fs;
use std::path::Path;

/// Show details of a downloaded certificate file
pub fn show_certificate_file(path: &Path, json: bool, output: &OutputFormat) -> Result<()> {
    let pem = fs::read_to_string(path)?;
    let summary = CertificateParser::parse_pem(&pem)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_summary(&summary, output);
    Ok(())
}

fn print_summary(summary: &CertificateSummary, output: &OutputFormat) {
    let expiry = if summary.days_remaining < 0 {
        format!("expired {} days ago", -summary.days_remaining)
    } else {
        format!("{} days remaining", summary.days_remaining)
    };

    let pairs: Vec<(&str, String)> = vec![
        ("Subject", summary.subject.clone()),
        ("CN", summary.cn.clone()),
        ("Issuer", summary.issuer.clone()),
        ("Serial", summary.serial.clone()),
        (
            "Not Before",
            summary.not_before.format("%Y-%m-%d %H:%M").to_string(),
        ),
        (
            "Not After",
            summary.not_after.format("%Y-%m-%d %H:%M").to_string(),
        ),
        ("Expiry", expiry),
    ];

    output.print_key_value(&pairs);
}
