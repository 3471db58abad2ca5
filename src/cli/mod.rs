//! Command-line interface for fscli
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Subcommands (version, shell completion, config)

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{Config, LogLevel, OutputFormat};
use crate::error::Result;

/// Project id used when none is given
const DEFAULT_PROJECT_ID: &str = "local";

/// fscli - query a hierarchical document store with a SQL-like language
#[derive(Parser, Debug)]
#[command(
    name = "fscli",
    version,
    about = "SQL-like shell for hierarchical document stores",
    long_about = "An interactive shell for reading documents from a collection/document store,
with grammar-aware completion of keywords and collection names."
)]
pub struct CliArgs {
    /// Project to work against (shown in the prompt)
    #[arg(long, value_name = "ID")]
    pub project_id: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// JSON document tree used as the collection source
    #[arg(long = "data", value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Start with the pager enabled
    #[arg(long)]
    pub pager: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (debug logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for fscli
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type
        #[arg(value_enum, value_name = "SHELL")]
        shell: Shell,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Create a CLI interface from already-parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Get the project id to show in the prompt
    pub fn project_id(&self) -> String {
        self.args
            .project_id
            .clone()
            .unwrap_or_else(|| DEFAULT_PROJECT_ID.to_string())
    }

    /// Get the configuration
    ///
    /// # Returns
    /// * `&Config` - Reference to configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    ///
    /// # Returns
    /// * `&CliArgs` - Reference to arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_display_args(config, args);
        Self::apply_logging_args(config, args);

        if let Some(path) = &args.data_file {
            config.store.data_file = Some(path.clone());
        }
    }

    /// Apply display-related CLI arguments to configuration
    fn apply_display_args(config: &mut Config, args: &CliArgs) {
        if let Some(format) = args.format {
            config.display.format = format;
        }

        if args.no_color {
            config.display.color_output = false;
        }

        if args.pager {
            config.display.pager = true;
        }
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                self.generate_completion(*shell);
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Show version information
    fn show_version(&self) {
        println!("fscli version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Write a shell completion script to stdout
    fn generate_completion(&self, shell: Shell) {
        let mut cmd = CliArgs::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    }

    /// Handle config subcommand
    ///
    /// # Arguments
    /// * `show` - Whether to show configuration
    /// * `validate` - Whether to validate configuration
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file();
        }

        if show {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist");
            return;
        }

        match Config::load_from_file(Some(&path)) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("Configuration is valid"),
                Err(e) => println!("Configuration validation failed: {}", e),
            },
            Err(e) => println!("Failed to load configuration: {}", e),
        }
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Configuration file: {}", path.display());
        println!();
        println!("{}", self.config.to_toml()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_config_path)
    }

    /// Print banner with version and project
    pub fn print_banner(&self) {
        if !self.args.quiet {
            println!("fscli {} (project: {})", env!("CARGO_PKG_VERSION"), self.project_id());
            println!("Type exit or press Ctrl-D to leave.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_config() -> String {
        std::env::temp_dir()
            .join("fscli-cli-test-missing.toml")
            .display()
            .to_string()
    }

    fn cli(extra: &[&str]) -> CliInterface {
        let config = missing_config();
        let mut argv = vec!["fscli", "-c", config.as_str()];
        argv.extend_from_slice(extra);
        CliInterface::from_args(CliArgs::try_parse_from(argv).unwrap()).unwrap()
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(vec!["fscli"]).unwrap();
        assert!(args.data_file.is_none());
        assert!(args.format.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args = CliArgs::try_parse_from(vec!["fscli", "--no-color", "--quiet", "--pager"]).unwrap();
        assert!(args.no_color);
        assert!(args.quiet);
        assert!(args.pager);
    }

    #[test]
    fn test_format_values() {
        let args = CliArgs::try_parse_from(vec!["fscli", "--format", "json-pretty"]).unwrap();
        assert_eq!(args.format, Some(OutputFormat::JsonPretty));
        assert!(CliArgs::try_parse_from(vec!["fscli", "--format", "table"]).is_err());
    }

    #[test]
    fn test_args_override_config() {
        let cli = cli(&["--format", "json", "--no-color", "--pager", "--data", "tree.json", "-v"]);
        let config = cli.config();

        assert_eq!(config.display.format, OutputFormat::Json);
        assert!(!config.display.color_output);
        assert!(config.display.pager);
        assert_eq!(config.store.data_file, Some(PathBuf::from("tree.json")));
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_verbosity_precedence() {
        assert_eq!(cli(&["--vv", "-q"]).config().logging.level, LogLevel::Trace);
        assert_eq!(cli(&["-q"]).config().logging.level, LogLevel::Error);
        assert_eq!(cli(&[]).config().logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_project_id() {
        assert_eq!(cli(&["--project-id", "demo"]).project_id(), "demo");
    }

    #[test]
    fn test_subcommands() {
        let args = CliArgs::try_parse_from(vec!["fscli", "completion", "bash"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Completion { shell: Shell::Bash })));

        let args = CliArgs::try_parse_from(vec!["fscli", "config", "--show"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Config { show: true, validate: false })
        ));
    }
}
