//! Which files a check run looks at.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CheckConfig {
    /// Also check `_test.go` files.
    #[serde(default)]
    pub include_tests: bool,

    /// Descend into `vendor/` directories.
    #[serde(default)]
    pub include_vendor: bool,

    /// Glob patterns, relative to each checked root, of files to skip.
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = CheckConfig::default();
        assert!(!config.include_tests);
        assert!(!config.include_vendor);
        assert!(config.exclude.is_empty());
    }
}
