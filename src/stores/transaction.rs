//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionId,
    summary::Summary,
    transaction::{Transaction, TransactionBuilder},
};

/// Handles the creation, retrieval, deletion and summary of transactions.
pub trait TransactionStore {
    /// Create the storage for transactions if it does not exist yet.
    ///
    /// Safe to call on every startup.
    fn ensure_schema(&self) -> Result<(), Error>;

    /// Add a transaction to the store and return its new ID.
    fn add(&self, builder: TransactionBuilder) -> Result<TransactionId, Error>;

    /// Delete a transaction, returning whether it existed.
    fn delete(&self, id: TransactionId) -> Result<bool, Error>;

    /// Retrieve every transaction, newest first.
    fn list_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Get the total amounts of income and expenses.
    fn summarize(&self) -> Result<Summary, Error>;

    /// Get the number of transactions in the store.
    fn count(&self) -> Result<u32, Error>;
}
