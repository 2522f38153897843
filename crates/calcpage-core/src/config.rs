//! Selector and retry configuration.
//!
//! Stores the selector chains for each calculator target, the visibility
//! timeout, and the retry policy in `~/.calcpage/config.json`. Every field has
//! a default matching the stock Android calculator (Spanish locale), so a
//! missing or partial file still works.
//!
//! # Example
//!
//! ```no_run
//! use calcpage_core::config::PageConfig;
//!
//! // Load (returns defaults if file doesn't exist)
//! let config = PageConfig::load();
//!
//! for selector in &config.plus_selectors {
//!     println!("{}", selector);
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::locator::{SelectorChain, DIGIT_PLACEHOLDER};
use crate::retry::RetryPolicy;

const CONFIG_DIRNAME: &str = ".calcpage";
const CONFIG_FILENAME: &str = "config.json";

/// Errors from strict config loading and saving.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid config JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file parsed but a value is unusable.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// No home directory to place the config in.
    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Calculator page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Selector templates for digit buttons; `{digit}` is replaced by the digit.
    #[serde(default = "default_digit_selectors")]
    pub digit_selectors: Vec<String>,

    /// Fallback chain for the plus button.
    #[serde(default = "default_plus_selectors")]
    pub plus_selectors: Vec<String>,

    /// Fallback chain for the equals button.
    #[serde(default = "default_equals_selectors")]
    pub equals_selectors: Vec<String>,

    /// Single selector for the result label.
    #[serde(default = "default_result_selector")]
    pub result_selector: String,

    /// How long each wait-for-displayed may take, in milliseconds.
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,

    /// Retry policy for clicks.
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_digit_selectors() -> Vec<String> {
    vec![
        "~{digit}".to_string(),
        r#"android=new UiSelector().description("{digit}")"#.to_string(),
    ]
}

fn default_plus_selectors() -> Vec<String> {
    vec![
        "~máss".to_string(),
        r#"android=new UiSelector().description("sumar")"#.to_string(),
        r#"android=new UiSelector().resourceId("com.google.android.calculator:id/btn_plus")"#.to_string(),
        "~más".to_string(),
    ]
}

fn default_equals_selectors() -> Vec<String> {
    vec![
        "~igual a".to_string(),
        r#"android=new UiSelector().description("igual")"#.to_string(),
        r#"android=new UiSelector().resourceId("com.google.android.calculator:id/btn_eq")"#.to_string(),
    ]
}

fn default_result_selector() -> String {
    r#"android=new UiSelector().resourceId("com.google.android.calculator:id/result_final")"#.to_string()
}

fn default_wait_timeout_ms() -> u64 {
    5000
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            digit_selectors: default_digit_selectors(),
            plus_selectors: default_plus_selectors(),
            equals_selectors: default_equals_selectors(),
            result_selector: default_result_selector(),
            wait_timeout_ms: default_wait_timeout_ms(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Returns the calcpage config directory (`~/.calcpage/`), if a home directory exists.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIRNAME))
}

/// Returns the default config file path (`~/.calcpage/config.json`).
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

impl PageConfig {
    /// Load config from `~/.calcpage/config.json`.
    ///
    /// Returns [`Default`] if the file does not exist, cannot be parsed, or
    /// fails validation.
    pub fn load() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unusable config, using defaults");
                Self::default()
            }
        }
    }

    /// Load and validate config from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Save config to `~/.calcpage/config.json`.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = default_config_path().ok_or(ConfigError::NoHomeDir)?;
        self.save_to(&path)
    }

    /// Checks that every chain can match something.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.digit_selectors.is_empty() {
            return Err(ConfigError::Invalid("digit_selectors is empty".to_string()));
        }
        if let Some(t) = self.digit_selectors.iter().find(|t| !t.contains(DIGIT_PLACEHOLDER)) {
            return Err(ConfigError::Invalid(format!(
                "digit selector '{}' has no {} placeholder",
                t, DIGIT_PLACEHOLDER
            )));
        }
        if self.plus_selectors.is_empty() {
            return Err(ConfigError::Invalid("plus_selectors is empty".to_string()));
        }
        if self.equals_selectors.is_empty() {
            return Err(ConfigError::Invalid("equals_selectors is empty".to_string()));
        }
        if self.result_selector.trim().is_empty() {
            return Err(ConfigError::Invalid("result_selector is empty".to_string()));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid("retry.max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }

    /// The visibility wait timeout.
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    /// The chain tried for `digit`.
    pub fn digit_chain(&self, digit: char) -> SelectorChain {
        SelectorChain::from_templates(format!("digit {}", digit), &self.digit_selectors, digit)
    }

    /// The chain tried for the plus button.
    pub fn plus_chain(&self) -> SelectorChain {
        SelectorChain::new("plus button", self.plus_selectors.iter().cloned())
    }

    /// The chain tried for the equals button.
    pub fn equals_chain(&self) -> SelectorChain {
        SelectorChain::new("equals button", self.equals_selectors.iter().cloned())
    }
}
