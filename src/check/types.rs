//! Finding and result types produced by the completeness checker.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A struct literal with one or more unset fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// File the literal appears in, relative to the scan root.
    pub file: String,
    /// Line of the literal (1-indexed).
    pub line: usize,
    /// Column of the literal (1-indexed).
    pub column: usize,
    /// Short name of the literal's written type.
    pub type_name: String,
    /// Missing field names in declaration order.
    pub missing: Vec<String>,
    /// Rendered diagnostic message.
    pub message: String,
}

impl Finding {
    /// Build a finding, rendering the message from the missing-field list.
    pub fn new(
        file: String,
        line: usize,
        column: usize,
        type_name: String,
        missing: Vec<String>,
    ) -> Self {
        let message = render_message(&missing, &type_name);
        Self {
            file,
            line,
            column,
            type_name,
            missing,
            message,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}: {}", self.file, self.line, self.column, self.message)
    }
}

/// Singular for one missing field, plural with a comma-joined list otherwise.
fn render_message(missing: &[String], type_name: &str) -> String {
    if missing.len() == 1 {
        format!("{} is missing in {}", missing[0], type_name)
    } else {
        format!("{} are missing in {}", missing.join(", "), type_name)
    }
}

/// Aggregated result of one run.
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    /// All findings, sorted by (file, line, column).
    pub findings: Vec<Finding>,
    /// Number of packages analyzed.
    pub packages: usize,
    /// Number of files analyzed.
    pub files: usize,
    /// Number of files skipped because they failed to parse.
    pub skipped: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any finding was reported.
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Restore the deterministic report order after a parallel merge.
    pub fn sort_findings(&mut self) {
        self.findings
            .sort_by(|a, b| (&a.file, a.line, a.column).cmp(&(&b.file, b.line, b.column)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singular_message() {
        let finding = Finding::new(
            "server.go".to_string(),
            12,
            9,
            "Config".to_string(),
            vec!["Port".to_string()],
        );
        assert_eq!(finding.message, "Port is missing in Config");
        assert_eq!(finding.to_string(), "server.go:12:9: Port is missing in Config");
    }

    #[test]
    fn test_plural_message_preserves_order() {
        let finding = Finding::new(
            "server.go".to_string(),
            3,
            1,
            "Config".to_string(),
            vec!["Host".to_string(), "Port".to_string(), "tls".to_string()],
        );
        assert_eq!(finding.message, "Host, Port, tls are missing in Config");
    }

    #[test]
    fn test_sort_findings() {
        let mut result = CheckResult::new();
        result.findings = vec![
            Finding::new("b.go".to_string(), 1, 1, "T".to_string(), vec!["A".to_string()]),
            Finding::new("a.go".to_string(), 9, 2, "T".to_string(), vec!["A".to_string()]),
            Finding::new("a.go".to_string(), 2, 5, "T".to_string(), vec!["A".to_string()]),
            Finding::new("a.go".to_string(), 2, 3, "T".to_string(), vec!["A".to_string()]),
        ];
        result.sort_findings();
        let order: Vec<(&str, usize, usize)> = result
            .findings
            .iter()
            .map(|f| (f.file.as_str(), f.line, f.column))
            .collect();
        assert_eq!(
            order,
            vec![("a.go", 2, 3), ("a.go", 2, 5), ("a.go", 9, 2), ("b.go", 1, 1)]
        );
        assert!(result.has_findings());
    }
}
