//! Runtime configuration for the dispatch binary.
//!
//! Values come from command-line flags with environment fallbacks:
//!
//! | Flag                | Environment                | Default        |
//! |---------------------|----------------------------|----------------|
//! | `--database`        | `DISPATCH_DATABASE`        | `dispatch.db`  |
//! | `--pool-size`       | `DISPATCH_POOL_SIZE`       | `4`            |
//! | `--default-creator` | `DISPATCH_DEFAULT_CREATOR` | `Инженер ПДО`  |
//! | `--log`             | `DISPATCH_LOG`             | see telemetry  |

use crate::task::domain::DEFAULT_CREATOR;
use camino::Utf8PathBuf;
use clap::Args;
use thiserror::Error;

/// Default `SQLite` database file.
pub const DEFAULT_DATABASE: &str = "dispatch.db";

/// Default connection pool size.
pub const DEFAULT_POOL_SIZE: u32 = 4;

/// Errors raised by [`DispatchConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The database path is empty.
    #[error("database path must not be empty")]
    EmptyDatabasePath,
    /// The pool must hold at least one connection.
    #[error("pool size must be at least 1")]
    EmptyPool,
    /// The default creator is blank.
    #[error("default creator must not be blank")]
    BlankDefaultCreator,
}

/// Settings shared by every dispatch command.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct DispatchConfig {
    /// Path of the `SQLite` database file.
    #[arg(long, env = "DISPATCH_DATABASE", default_value = DEFAULT_DATABASE, global = true)]
    pub database: Utf8PathBuf,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "DISPATCH_POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE, global = true)]
    pub pool_size: u32,

    /// Creator recorded for tasks that name none.
    #[arg(long, env = "DISPATCH_DEFAULT_CREATOR", default_value = DEFAULT_CREATOR, global = true)]
    pub default_creator: String,

    /// Log filter directive; `RUST_LOG` takes precedence.
    #[arg(long, env = "DISPATCH_LOG", global = true)]
    pub log: Option<String>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            database: Utf8PathBuf::from(DEFAULT_DATABASE),
            pool_size: DEFAULT_POOL_SIZE,
            default_creator: DEFAULT_CREATOR.to_owned(),
            log: None,
        }
    }
}

impl DispatchConfig {
    /// Checks values that clap cannot express as parser constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.as_str().trim().is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }
        if self.pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }
        if self.default_creator.trim().is_empty() {
            return Err(ConfigError::BlankDefaultCreator);
        }
        Ok(())
    }

    /// Returns the database location as a Diesel connection string.
    #[must_use]
    pub fn database_url(&self) -> &str {
        self.database.as_str()
    }
}
