//! The check pipeline: pattern filtering, literal analysis, orchestration.

mod filter;
mod literals;
mod runner;
mod types;

pub use filter::TypeFilter;
pub use literals::LiteralChecker;
pub use runner::Runner;
pub use types::{CheckResult, Finding};
