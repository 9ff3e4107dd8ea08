//! Defines the app level error type and the details of failed writes.

use std::path::PathBuf;

use rust_decimal::Decimal;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The database could not be opened, e.g. the file is missing and may not
    /// be created, the directory does not exist or the file is not readable.
    #[error("could not connect to the database at {path:?}: {source}")]
    ConnectionError {
        /// The database path from the configuration.
        path: PathBuf,
        /// The error reported by SQLite.
        source: rusqlite::Error,
    },

    /// Creating the transactions table failed. The DDL has been rolled back.
    #[error("could not create the transactions table: {0}")]
    SchemaError(rusqlite::Error),

    /// Inserting or deleting a transaction failed. Any changes made by the
    /// operation have been rolled back.
    #[error("could not save changes to the transactions table: {0}")]
    WriteError(#[from] WriteError),

    /// Querying the transactions table failed.
    #[error("could not read the transactions table: {0}")]
    ReadError(rusqlite::Error),

    /// A configuration value could not be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// The reasons a write to the transactions table may be rejected.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WriteError {
    /// The transaction type was not one of the accepted literals.
    #[error("\"{0}\" is not a transaction type, expected \"income\" or \"expense\"")]
    InvalidType(String),

    /// The amount could not be parsed as a decimal number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The amount was below zero. Income and expenses are told apart by their
    /// type, so amounts are always recorded as positive numbers.
    #[error("{0} is negative, amounts must be zero or greater")]
    NegativeAmount(Decimal),

    /// The amount does not fit into `NUMERIC(12, 2)`.
    #[error("{0} is too large, amounts may have at most 10 digits before the decimal point")]
    AmountOutOfRange(Decimal),

    /// The date was not a calendar date in the format `YYYY-MM-DD`.
    #[error("\"{0}\" is not a date in the format YYYY-MM-DD")]
    InvalidDate(String),

    /// The category was empty or only whitespace.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// The category is longer than the column allows.
    #[error("category must be at most 100 characters long, got {0} characters")]
    CategoryTooLong(usize),

    /// The database rejected the row because of a CHECK or NOT NULL constraint.
    #[error("the row violates a table constraint: {0}")]
    ConstraintViolation(rusqlite::Error),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for WriteError {
    fn from(error: rusqlite::Error) -> Self {
        match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code:
                        rusqlite::ffi::SQLITE_CONSTRAINT_CHECK | rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL,
                },
                _,
            ) => WriteError::ConstraintViolation(error),
            error => WriteError::SqlError(error),
        }
    }
}
