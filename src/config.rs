//! Settings for opening the application database.

use std::{path::PathBuf, time::Duration};

use crate::Error;

/// The path SQLite opens as a new, empty in-memory database.
const IN_MEMORY_PATH: &str = ":memory:";

/// Where the database lives and how connections to it are opened.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// File path to the SQLite database.
    pub path: PathBuf,
    /// Create the database file if it does not exist. When `false`, a missing
    /// file is reported as a connection error.
    pub create_if_missing: bool,
    /// How long a connection waits for another process to release its lock
    /// on the database before giving up.
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    /// The busy timeout used when none is configured.
    pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a config for the database at `path` with the default settings.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_if_missing: true,
            busy_timeout: Self::DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Set whether the database file may be created.
    pub fn create_if_missing(mut self, create_if_missing: bool) -> Self {
        self.create_if_missing = create_if_missing;
        self
    }

    /// Set the busy timeout.
    pub fn busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    /// Check the config before any connection is attempted.
    ///
    /// Any file path is accepted, with or without an extension. Paths that
    /// SQLite opens as a private temporary database are rejected: every store
    /// operation opens its own connection, so data written to such a database
    /// is gone before the next operation runs.
    ///
    /// # Errors
    /// Returns an [Error::InvalidConfig] if the path is empty or `:memory:`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "the database path cannot be empty".to_owned(),
            ));
        }

        if self.path.as_os_str() == IN_MEMORY_PATH {
            return Err(Error::InvalidConfig(format!(
                "{IN_MEMORY_PATH} cannot be used because the database is reopened for every operation"
            )));
        }

        Ok(())
    }
}
