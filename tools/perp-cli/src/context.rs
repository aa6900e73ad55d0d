//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use perp_core::LandingConfig;
use perp_observability::{LogFormat, LogLevel, SessionId, StructuredLogger};

use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration (file plus environment).
    pub config: LandingConfig,
    /// Output handler.
    pub output: Output,
    /// Structured logger for this invocation.
    pub logger: StructuredLogger,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Resolve configuration and set up logging.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        if config_path.is_none() {
            if let Some(found) = LandingConfig::find(&cwd) {
                output.debug(&format!("Using config file: {}", found.display()));
            }
        }
        let config = LandingConfig::resolve(config_path.map(Path::new), &cwd)
            .context("Failed to load configuration")?;

        let min_level = if output.is_verbose() {
            LogLevel::Debug
        } else {
            LogLevel::Info
        };
        let format = if output.is_json() {
            LogFormat::Json
        } else {
            LogFormat::Human
        };
        let logger = StructuredLogger::new(SessionId::generate())
            .with_min_level(min_level)
            .with_format(format);

        Ok(Self {
            config,
            output,
            logger,
            cwd,
        })
    }

    /// Context with default config, quiet output and captured logs.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        let (logger, _) = StructuredLogger::capturing(SessionId::generate());
        Self {
            config: LandingConfig::default(),
            output: Output::new(false, false),
            logger,
            cwd: std::env::temp_dir(),
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }
}
