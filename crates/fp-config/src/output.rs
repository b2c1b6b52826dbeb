//! How diagnostics are rendered.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `path:line:col: message`
    #[default]
    Text,
    /// One JSON array of findings.
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Sort findings by file and position instead of discovery order.
    #[serde(default)]
    pub sort: bool,
}
