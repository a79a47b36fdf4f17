//! Include/exclude scope filter over qualified type names.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::config::{Config, ConfigError};

/// Compiled include/exclude pattern lists.
///
/// Compilation validates every pattern up front; matching is pure and safe
/// to share across parallel walks.
#[derive(Debug)]
pub struct TypeFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl TypeFilter {
    /// Compile the configured pattern lists.
    pub fn compile(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            include: compile_list(&config.include, "include")?,
            exclude: compile_list(&config.exclude, "exclude")?,
        })
    }

    /// Decide whether a qualified type name is in scope.
    ///
    /// An empty include list puts every name in scope; an exclude match
    /// wins over any include match.
    pub fn should_process(&self, qualified: &str) -> bool {
        if !self.include.is_empty() && !self.include.is_match(qualified) {
            return false;
        }
        !self.exclude.is_match(qualified)
    }
}

/// Compile one comma-separated pattern list into a glob set.
///
/// Entries are trimmed and empty entries dropped, so trailing commas are
/// harmless. `literal_separator` keeps `*`/`?` from crossing `/`, matching
/// Go's `path.Match` semantics for package-qualified names.
fn compile_list(list: &str, name: &'static str) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| ConfigError::InvalidPattern {
                list: name,
                pattern: pattern.to_string(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ConfigError::InvalidPattern {
        list: name,
        pattern: list.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(include: &str, exclude: &str) -> TypeFilter {
        TypeFilter::compile(&Config::new(include, exclude)).unwrap()
    }

    #[test]
    fn test_empty_lists_match_everything() {
        let f = filter("", "");
        assert!(f.should_process("demo.Config"));
        assert!(f.should_process("example.com/app/server.Options"));
    }

    #[test]
    fn test_include_restricts_scope() {
        let f = filter("*.Config,*.Options", "");
        assert!(f.should_process("demo.Config"));
        assert!(f.should_process("demo.Options"));
        assert!(!f.should_process("demo.Server"));
    }

    #[test]
    fn test_exclude_overrides_include() {
        let f = filter("*.Config", "demo.Config");
        assert!(!f.should_process("demo.Config"));
        assert!(f.should_process("other.Config"));
    }

    #[test]
    fn test_exclude_alone() {
        let f = filter("", "internal.*");
        assert!(!f.should_process("internal.Secret"));
        assert!(f.should_process("demo.Config"));
    }

    #[test]
    fn test_star_does_not_cross_separator() {
        let f = filter("*.Config", "");
        assert!(f.should_process("demo.Config"));
        // Qualified names with a module path need the separators spelled out.
        assert!(!f.should_process("example.com/demo.Config"));

        let f = filter("example.com/*/config.Config", "");
        assert!(f.should_process("example.com/demo/config.Config"));
        assert!(!f.should_process("example.com/a/b/config.Config"));
    }

    #[test]
    fn test_question_mark_and_class() {
        let f = filter("demo.T?", "");
        assert!(f.should_process("demo.T1"));
        assert!(f.should_process("demo.Ts"));
        assert!(!f.should_process("demo.T12"));

        let f = filter("demo.[AB]", "");
        assert!(f.should_process("demo.A"));
        assert!(f.should_process("demo.B"));
        assert!(!f.should_process("demo.C"));
    }

    #[test]
    fn test_trailing_commas_and_spaces() {
        let f = filter(" *.Config , ", "");
        assert!(f.should_process("demo.Config"));
        assert!(!f.should_process("demo.Server"));
    }

    #[test]
    fn test_invalid_pattern_names_the_pattern() {
        let err = TypeFilter::compile(&Config::new("*.Config,demo.[", "")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("include"), "got: {}", message);
        assert!(message.contains("demo.["), "got: {}", message);

        let err = TypeFilter::compile(&Config::new("", "bad[")).unwrap_err();
        assert!(err.to_string().contains("exclude"));
    }

    #[test]
    fn test_filter_truth_table() {
        // shouldProcess(n) == (I empty OR n matches I) AND NOT (n matches E)
        let cases: &[(&str, &str, &str, bool)] = &[
            ("demo.A", "", "", true),
            ("demo.A", "demo.A", "", true),
            ("demo.A", "demo.B", "", false),
            ("demo.A", "", "demo.A", false),
            ("demo.A", "demo.A", "demo.A", false),
            ("demo.A", "demo.*", "demo.B", true),
            ("demo.B", "demo.*", "demo.B", false),
        ];
        for (name, include, exclude, expected) in cases {
            let f = filter(include, exclude);
            assert_eq!(
                f.should_process(name),
                *expected,
                "name={} include={} exclude={}",
                name,
                include,
                exclude
            );
        }
    }
}
