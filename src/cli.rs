//! Command-line interface for fieldcheck.

use clap::Parser;
use std::path::PathBuf;

use crate::check::Runner;
use crate::config::Config;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Exhaustive struct initialization linter for Go.
///
/// Fieldcheck walks a Go workspace and flags struct literals that leave
/// fields unset. A zero value chosen deliberately should be written out,
/// because a field nobody wrote is indistinguishable from a field somebody
/// forgot.
#[derive(Parser)]
#[command(name = "fieldcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to check (directory or single Go file)
    pub path: PathBuf,

    /// Comma-separated type patterns to check (default: all)
    #[arg(short, long, default_value = "")]
    pub include: String,

    /// Comma-separated type patterns to skip (overrides --include)
    #[arg(short = 'x', long, default_value = "")]
    pub exclude: String,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Run the check described by the command line.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    // Validate format
    if cli.format != "pretty" && cli.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            cli.format
        );
        return Ok(EXIT_ERROR);
    }

    // Compile patterns; a malformed pattern is a configuration error, not a
    // finding.
    let config = Config::new(cli.include.clone(), cli.exclude.clone());
    let runner = match Runner::new(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    // Resolve path
    let abs_path = match cli.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", cli.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let result = runner.run(&abs_path)?;

    // Output results
    let path_str = cli.path.to_string_lossy().to_string();
    match cli.format.as_str() {
        "json" => report::write_json(&path_str, &config, &result)?,
        _ => report::write_pretty(&path_str, &result),
    }

    // Return appropriate exit code
    if result.has_findings() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}
