//! Top-level check orchestration.
//!
//! A `Runner` owns the compiled pattern filter and drives one full check:
//! load the workspace, build the type table, then walk every compilation
//! unit in parallel and merge the findings.

use std::path::Path;

use anyhow::Result;
use rayon::prelude::*;

use crate::check::filter::TypeFilter;
use crate::check::literals::LiteralChecker;
use crate::check::types::{CheckResult, Finding};
use crate::config::{Config, ConfigError};
use crate::workspace::Workspace;

/// Drives a complete check over a workspace root.
#[derive(Debug)]
pub struct Runner {
    filter: TypeFilter,
}

impl Runner {
    /// Compile the configuration into a runner.
    ///
    /// Fails fast on malformed patterns so a bad configuration never
    /// produces a partial report.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            filter: TypeFilter::compile(config)?,
        })
    }

    /// Load the workspace under `root` and check every unit.
    ///
    /// Units are independent once the type table is built, so they are
    /// checked in parallel. Findings are merged and sorted afterwards, which
    /// keeps the output stable regardless of scheduling.
    pub fn run(&self, root: &Path) -> Result<CheckResult> {
        let workspace = Workspace::load(root)?;
        let checker = LiteralChecker::new(&self.filter, &workspace.types);

        let per_unit: Vec<Vec<Finding>> = workspace
            .units
            .par_iter()
            .map(|unit| checker.check_unit(unit))
            .collect();

        let mut result = CheckResult {
            findings: per_unit.into_iter().flatten().collect(),
            packages: workspace.units.len(),
            files: workspace.files,
            skipped: workspace.skipped,
        };
        result.sort_findings();
        Ok(result)
    }
}
