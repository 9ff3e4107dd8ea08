//! Contains the trait and implementation for objects that store [transactions](crate::transaction).

mod transaction;

pub mod sqlite;

pub use sqlite::SQLiteTransactionStore;
pub use transaction::TransactionStore;
