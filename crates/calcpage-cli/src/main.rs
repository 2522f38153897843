//! Inspect and initialise calcpage selector configuration.
//!
//! The page object reads its selector chains, wait timeout and retry policy
//! from `~/.calcpage/config.json`. This tool shows what will be used and
//! writes a starting file to edit.
//!
//! # Usage
//!
//! ```bash
//! # Where the config lives
//! calcpage config path
//!
//! # Effective config (defaults merged with the file)
//! calcpage config show
//!
//! # Write the default config
//! calcpage config init
//! calcpage config init --force
//!
//! # Selectors tried for a target, in order
//! calcpage selectors plus
//! calcpage selectors digit --digit 7
//!
//! # Use another config file
//! calcpage --config ./ci-config.json selectors equals
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use calcpage_core::config::{default_config_path, ConfigError, PageConfig};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Inspect and initialise calcpage selector configuration.
#[derive(Parser)]
#[command(name = "calcpage")]
#[command(about = "Inspect the selector chains used by the calculator page object")]
#[command(version)]
struct Cli {
    /// Config file to use instead of ~/.calcpage/config.json
    #[arg(short, long, env = "CALCPAGE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print the selectors tried for a target, one per line
    Selectors {
        /// Which target to show
        target: Target,
        /// Digit to substitute into digit selectors
        #[arg(short, long, default_value = "0")]
        digit: char,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file path
    Path,
    /// Print the effective config as JSON
    Show,
    /// Write the default config
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    Digit,
    Plus,
    Equals,
    Result,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

#[derive(Debug)]
enum CliError {
    InvalidInput(String),
    Config(String),
    Io(String),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::InvalidInput(_) => ExitCode::from(1),
            CliError::Config(_) => ExitCode::from(2),
            CliError::Io(_) => ExitCode::from(3),
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Config error: {}", msg),
            CliError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Io(e) => CliError::Io(e.to_string()),
            other => CliError::Config(other.to_string()),
        }
    }
}

fn config_path(cli_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    cli_path
        .or_else(default_config_path)
        .ok_or_else(|| CliError::Config("could not determine home directory".to_string()))
}

/// Loads the config strictly when a file exists, defaults otherwise.
fn load_config(path: &Path) -> Result<PageConfig, CliError> {
    if path.exists() {
        debug!(path = %path.display(), "loading config");
        Ok(PageConfig::load_from(path)?)
    } else {
        debug!(path = %path.display(), "no config file, using defaults");
        Ok(PageConfig::default())
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let path = config_path(cli.config)?;

    match cli.command {
        Command::Config { action } => match action {
            ConfigAction::Path => {
                println!("{}", path.display());
            }
            ConfigAction::Show => {
                let config = load_config(&path)?;
                let json = serde_json::to_string_pretty(&config)
                    .map_err(|e| CliError::Config(e.to_string()))?;
                println!("{}", json);
            }
            ConfigAction::Init { force } => {
                if path.exists() && !force {
                    return Err(CliError::InvalidInput(format!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    )));
                }
                PageConfig::default().save_to(&path)?;
                println!("Wrote {}", path.display());
            }
        },

        Command::Selectors { target, digit } => {
            let config = load_config(&path)?;
            let selectors = match target {
                Target::Digit => {
                    if !digit.is_ascii_digit() {
                        return Err(CliError::InvalidInput(format!(
                            "'{}' is not a digit 0-9",
                            digit
                        )));
                    }
                    config.digit_chain(digit).selectors().to_vec()
                }
                Target::Plus => config.plus_chain().selectors().to_vec(),
                Target::Equals => config.equals_chain().selectors().to_vec(),
                Target::Result => vec![config.result_selector.clone()],
            };
            for selector in selectors {
                println!("{}", selector);
            }
        }
    }

    Ok(())
}
