//! Implements a SQLite backed transaction store.

use rusqlite::Connection;

use crate::{
    Error,
    config::DatabaseConfig,
    database_id::TransactionId,
    db::{connect, initialize},
    stores::TransactionStore,
    summary::{Summary, summarize},
    transaction::{
        Transaction, TransactionBuilder, count_transactions, create_transaction,
        delete_transaction, list_transactions,
    },
};

/// Stores transactions in a SQLite database.
///
/// The store does not hold on to a connection. Every operation opens its own
/// connection from the config and closes it before returning, whether the
/// operation succeeded or not.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    config: DatabaseConfig,
}

impl SQLiteTransactionStore {
    /// Create a new store for the database described by `config`.
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    /// The config used to open connections.
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    fn with_connection<T>(
        &self,
        operation: impl FnOnce(&Connection) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let connection = connect(&self.config)?;

        operation(&connection)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create the transactions table if it does not exist.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::ConnectionError] if the database cannot be opened,
    /// - or [Error::SchemaError] if the table cannot be created.
    fn ensure_schema(&self) -> Result<(), Error> {
        self.with_connection(initialize)
    }

    /// Insert a transaction in its own SQL transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::ConnectionError] if the database cannot be opened,
    /// - or [Error::WriteError] if the transaction is invalid or the insert
    ///   fails. Nothing is written in that case.
    fn add(&self, builder: TransactionBuilder) -> Result<TransactionId, Error> {
        self.with_connection(|connection| {
            create_transaction(builder, connection).map(|transaction| transaction.id)
        })
    }

    /// Delete a transaction in its own SQL transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::ConnectionError] if the database cannot be opened,
    /// - or [Error::WriteError] if the delete fails.
    fn delete(&self, id: TransactionId) -> Result<bool, Error> {
        self.with_connection(|connection| delete_transaction(id, connection))
    }

    /// # Errors
    /// This function will return a:
    /// - [Error::ConnectionError] if the database cannot be opened,
    /// - or [Error::ReadError] if the query fails.
    fn list_all(&self) -> Result<Vec<Transaction>, Error> {
        self.with_connection(list_transactions)
    }

    /// # Errors
    /// This function will return a:
    /// - [Error::ConnectionError] if the database cannot be opened,
    /// - or [Error::ReadError] if the query fails.
    fn summarize(&self) -> Result<Summary, Error> {
        self.with_connection(summarize)
    }

    fn count(&self) -> Result<u32, Error> {
        self.with_connection(count_transactions)
    }
}
