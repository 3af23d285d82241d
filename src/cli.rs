//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// MassBudget - mass budget calculator for engineering-model iterations
///
/// Computes the total mass of an engineering-model iteration by summing
/// the published values of every parameter following the
/// `<element>.m` naming convention.
///
/// Examples:
///   massbudget --data models.json --model LOFT
///   massbudget --data models.json --model LOFT --iteration 2 --format json
///   massbudget --data models.json --list
///   massbudget --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the JSON model data file
    ///
    /// A document with a top-level `models` array of engineering models.
    /// Can also be set via the MASSBUDGET_DATA env var or the config file.
    #[arg(short, long, value_name = "FILE", env = "MASSBUDGET_DATA")]
    pub data: Option<PathBuf>,

    /// Short name of the engineering model to analyze
    ///
    /// Matched case-insensitively against the models in the data file.
    /// Not required when using --init-config or --list.
    #[arg(short, long, value_name = "SHORT_NAME")]
    pub model: Option<String>,

    /// Iteration number to analyze
    #[arg(short, long, default_value = "1", value_name = "NUMBER")]
    pub iteration: u32,

    /// Output file path for the report
    ///
    /// If not specified, the report is printed to stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (text, markdown, json)
    ///
    /// Overrides the config file setting. Defaults to text.
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .massbudget.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// List models and iterations in the data file, then exit
    ///
    /// No aggregation is performed.
    #[arg(long)]
    pub list: bool,

    /// Generate a default .massbudget.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// Markdown format
    Markdown,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// Canonical name used in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        }
    }

    /// Parses a config-file format name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if !self.list {
            match self.model.as_deref() {
                None | Some("") => {
                    return Err(
                        "An engineering model short name is required (use --model)".to_string()
                    );
                }
                Some(_) => {}
            }

            if self.iteration == 0 {
                return Err("Iteration numbers start at 1".to_string());
            }
        }

        // Validate data file if provided on the command line; a missing
        // --data may still be filled in from the config file.
        if let Some(ref data_path) = self.data {
            if !data_path.exists() {
                return Err(format!(
                    "Data file does not exist: {}",
                    data_path.display()
                ));
            }
            if !data_path.is_file() {
                return Err(format!("Data path is not a file: {}", data_path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            data: None,
            model: Some("LOFT".to_string()),
            iteration: 1,
            output: None,
            format: None,
            config: None,
            verbose: false,
            quiet: false,
            list: false,
            init_config: false,
        }
    }

    #[test]
    fn test_validation_ok() {
        let args = make_args();
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_model() {
        let mut args = make_args();
        args.model = None;
        assert!(args.validate().is_err());

        args.model = Some(String::new());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_model_not_required_for_list() {
        let mut args = make_args();
        args.model = None;
        args.list = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_iteration() {
        let mut args = make_args();
        args.iteration = 0;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_data_file() {
        let mut args = make_args();
        args.data = Some(PathBuf::from("/nonexistent/models.json"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::from_name("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_name("MD"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::from_name("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("yaml"), None);

        assert_eq!(OutputFormat::Markdown.as_str(), "markdown");
    }
}
