use clap::{Parser, ValueEnum};
use fp_config::{FpConfig, OutputFormat};
use fp_parser::LoadOptions;

/// Output format flag.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Top-level CLI parser for the `fpcheck` binary.
#[derive(Debug, Parser)]
#[command(
    name = "fpcheck",
    version,
    about = "fileprivate - keep unexported members of unexported Go types in their own file"
)]
pub struct Cli {
    /// Package directories to check. A trailing `/...` checks every package below.
    #[arg(default_value = ".")]
    pub paths: Vec<String>,

    /// Output format: text, json
    #[arg(short, long)]
    pub format: Option<FormatArg>,

    /// Also check `_test.go` files
    #[arg(long)]
    pub include_tests: bool,

    /// Skip files matching this glob (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Sort findings by file and position
    #[arg(long)]
    pub sort: bool,

    /// Quiet mode (errors only on stderr)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Effective settings after layering CLI flags over configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub load: LoadOptions,
    pub format: OutputFormat,
    pub sort: bool,
}

impl Cli {
    #[must_use]
    pub fn settings(&self, config: &FpConfig) -> Settings {
        let mut exclude = config.check.exclude.clone();
        exclude.extend(self.exclude.iter().cloned());
        Settings {
            load: LoadOptions {
                include_tests: self.include_tests || config.check.include_tests,
                include_vendor: config.check.include_vendor,
                exclude,
            },
            format: self.format.map_or(config.output.format, OutputFormat::from),
            sort: self.sort || config.output.sort,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn paths_default_to_current_directory() {
        let cli = Cli::try_parse_from(["fpcheck"]).expect("cli should parse");
        assert_eq!(cli.paths, vec![".".to_string()]);
        assert_eq!(cli.format, None);
    }

    #[test]
    fn flags_and_paths_parse() {
        let cli = Cli::try_parse_from([
            "fpcheck",
            "--format",
            "json",
            "--include-tests",
            "--exclude",
            "gen/*.go",
            "--exclude",
            "mocks/**",
            "--sort",
            "./...",
            "cmd/tool",
        ])
        .expect("cli should parse");
        assert_eq!(cli.format, Some(FormatArg::Json));
        assert!(cli.include_tests);
        assert_eq!(cli.exclude, vec!["gen/*.go".to_string(), "mocks/**".to_string()]);
        assert!(cli.sort);
        assert_eq!(cli.paths, vec!["./...".to_string(), "cmd/tool".to_string()]);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["fpcheck", "--format", "xml"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["fpcheck", "--quiet", "--verbose"]).is_err());
    }

    #[test]
    fn flags_override_config() {
        let mut config = FpConfig::default();
        config.output.format = OutputFormat::Json;
        config.check.exclude = vec!["a/*.go".to_string()];
        config.check.include_vendor = true;

        let cli = Cli::try_parse_from(["fpcheck", "-f", "text", "--exclude", "b/*.go"])
            .expect("cli should parse");
        let settings = cli.settings(&config);
        assert_eq!(settings.format, OutputFormat::Text);
        assert_eq!(
            settings.load.exclude,
            vec!["a/*.go".to_string(), "b/*.go".to_string()]
        );
        assert!(settings.load.include_vendor);
        assert!(!settings.load.include_tests);
        assert!(!settings.sort);
    }

    #[test]
    fn config_applies_when_flags_absent() {
        let mut config = FpConfig::default();
        config.output.format = OutputFormat::Json;
        config.output.sort = true;
        config.check.include_tests = true;

        let cli = Cli::try_parse_from(["fpcheck"]).expect("cli should parse");
        let settings = cli.settings(&config);
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.sort);
        assert!(settings.load.include_tests);
    }
}
