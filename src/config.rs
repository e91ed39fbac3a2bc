//! Configuration management and validation.
//!
//! Provides configuration structures for the parsing engine, the normalized
//! export and logging, layered as defaults -> environment -> CLI flags.

use crate::constants::{DEFAULT_MAX_PARSED_ROWS, ENV_ISSUE_BASE_URL, ENV_MAX_ROWS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parsing engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Maximum data rows parsed from a single file before failing
    pub max_rows: usize,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_PARSED_ROWS,
        }
    }
}

impl ParsingConfig {
    /// Set the row ceiling; non-positive values fall back to the default
    pub fn with_max_rows(mut self, max_rows: i64) -> Self {
        self.max_rows = effective_max_rows(max_rows);
        self
    }
}

/// Resolve a configured row ceiling to the value actually enforced
pub fn effective_max_rows(configured: i64) -> usize {
    if configured <= 0 {
        DEFAULT_MAX_PARSED_ROWS
    } else {
        usize::try_from(configured).unwrap_or(usize::MAX)
    }
}

/// Normalized export configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Base URL joined with the issue key to build an `Issue URL` column
    pub issue_base_url: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level used for this crate when `RUST_LOG` is unset
    pub level: String,

    /// Full formatter with timestamps (false = compact quiet output)
    pub structured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            structured: true,
        }
    }
}

/// Global configuration for the incident normalizer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub parsing: ParsingConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Defaults overlaid with the process environment
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay environment values obtained through `lookup`
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_MAX_ROWS) {
            let parsed = raw.trim().parse::<i64>().map_err(|e| {
                Error::configuration(format!(
                    "{} must be an integer, got '{}': {}",
                    ENV_MAX_ROWS, raw, e
                ))
            })?;
            self.parsing = self.parsing.with_max_rows(parsed);
            debug!("{} overrides row ceiling to {}", ENV_MAX_ROWS, self.parsing.max_rows);
        }

        if let Some(url) = lookup(ENV_ISSUE_BASE_URL) {
            let url = url.trim();
            if !url.is_empty() {
                self.export.issue_base_url = Some(url.to_string());
            }
        }

        Ok(self)
    }

    /// Set the row ceiling; non-positive values fall back to the default
    pub fn with_max_rows(mut self, max_rows: i64) -> Self {
        self.parsing = self.parsing.with_max_rows(max_rows);
        self
    }

    /// Set the base URL used for the export's issue URL column
    pub fn with_issue_base_url(mut self, url: impl Into<String>) -> Self {
        self.export.issue_base_url = Some(url.into());
        self
    }

    /// Set the log level for this crate
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Check cross-field consistency
    pub fn validate(&self) -> Result<()> {
        if self.parsing.max_rows == 0 {
            return Err(Error::configuration("parsing.max_rows must be positive"));
        }

        if let Some(url) = &self.export.issue_base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::configuration(format!(
                    "export.issue_base_url must be an http(s) URL, got '{}'",
                    url
                )));
            }
        }

        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(Error::configuration(format!(
                "Unknown log level '{}'",
                other
            ))),
        }
    }
}
