//! SQLite backed stores.

pub mod transaction;

pub use transaction::SQLiteTransactionStore;
