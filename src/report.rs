//! Output formatting for fieldcheck results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::check::{CheckResult, Finding};
use crate::config::Config;

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report structure.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub include: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub exclude: String,
    pub packages: usize,
    pub files: usize,
    pub skipped: usize,
    pub findings: Vec<Finding>,
}

/// Write results in JSON format.
pub fn write_json(path: &str, config: &Config, result: &CheckResult) -> anyhow::Result<()> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        include: config.include.clone(),
        exclude: config.exclude.clone(),
        packages: result.packages,
        files: result.files,
        skipped: result.skipped,
        findings: result.findings.clone(),
    };

    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, result: &CheckResult) {
    // Header
    println!();
    print!("  ");
    print!("{}", "fieldcheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    // Scan info
    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    println!();

    if result.has_findings() {
        write_findings(&result.findings);
        println!();
    }

    // Final status line
    write_summary(result);
    println!();
}

fn write_findings(findings: &[Finding]) {
    println!("  {} ({}):", "Findings".bold(), findings.len());
    println!();

    for finding in findings {
        print!("    {}", finding.file.blue());
        print!(
            "{}",
            format!(":{}:{}", finding.line, finding.column).dimmed()
        );
        println!();

        // Message on next line, indented
        println!("        {}", finding.message);
        println!();
    }
}

fn write_summary(result: &CheckResult) {
    let package_plural = if result.packages != 1 { "s" } else { "" };
    let file_plural = if result.files != 1 { "s" } else { "" };
    print!(
        "  {}",
        format!(
            "Checked {} package{}, {} file{}",
            result.packages, package_plural, result.files, file_plural
        )
        .dimmed()
    );
    if result.skipped > 0 {
        print!("{}", format!(" ({} skipped)", result.skipped).dimmed());
    }
    print!("  ");

    if result.has_findings() {
        let plural = if result.findings.len() != 1 { "s" } else { "" };
        print!("{} finding{}  ", result.findings.len(), plural);
        println!("{}", "FAILED".red());
    } else {
        println!("{}", "PASSED".green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> CheckResult {
        CheckResult {
            findings: vec![Finding::new(
                "cfg/cfg.go".to_string(),
                12,
                9,
                "Config".to_string(),
                vec!["Host".to_string(), "Port".to_string()],
            )],
            packages: 2,
            files: 3,
            skipped: 0,
        }
    }

    #[test]
    fn test_json_report_shape() {
        let result = sample_result();
        let report = JsonReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: "testdata".to_string(),
            include: "example.com/*.Config".to_string(),
            exclude: String::new(),
            packages: result.packages,
            files: result.files,
            skipped: result.skipped,
            findings: result.findings.clone(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["path"], "testdata");
        assert_eq!(value["include"], "example.com/*.Config");
        // Empty pattern lists are omitted entirely.
        assert!(value.get("exclude").is_none());
        assert_eq!(value["packages"], 2);
        assert_eq!(
            value["findings"][0]["message"],
            "Host, Port are missing in Config"
        );
        assert_eq!(value["findings"][0]["line"], 12);
        assert_eq!(value["findings"][0]["missing"][1], "Port");
    }

    #[test]
    fn test_json_report_round_trip() {
        let report = JsonReport {
            version: "0.0.0".to_string(),
            path: ".".to_string(),
            include: String::new(),
            exclude: String::new(),
            packages: 1,
            files: 1,
            skipped: 0,
            findings: sample_result().findings,
        };
        let json = serde_json::to_string(&report).unwrap();
        let parsed: JsonReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.findings.len(), 1);
        assert_eq!(parsed.findings[0].type_name, "Config");
    }
}
