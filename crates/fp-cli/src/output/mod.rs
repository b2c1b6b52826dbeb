//! Rendering of findings.

use fp_config::OutputFormat;

use crate::pipeline::Finding;

/// Render findings in the requested format. Text output of an empty list
/// is empty; JSON output is always an array.
pub fn render(findings: &[Finding], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(findings)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(findings)?),
    }
}

fn render_text(findings: &[Finding]) -> String {
    findings
        .iter()
        .map(|f| format!("{}:{}:{}: {}", f.file, f.line, f.column, f.message))
        .collect::<Vec<_>>()
        .join("\n")
}
