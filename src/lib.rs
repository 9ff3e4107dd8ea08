//! Budget Manager is a personal finance tracker for recording income and
//! expenses.
//!
//! This library provides the data access layer over a single SQLite table of
//! transactions, a presentation controller for user interfaces, and a chart
//! of expenses by category. Every store operation opens its own database
//! connection and closes it before returning.
//!
//! ```no_run
//! use budget_manager::{Budget, DatabaseConfig, SQLiteTransactionStore, TransactionForm};
//!
//! # fn main() -> Result<(), budget_manager::Error> {
//! let store = SQLiteTransactionStore::new(DatabaseConfig::new("budget.db"));
//! let mut budget = Budget::open(store)?;
//!
//! budget.add(TransactionForm {
//!     date: "2024-01-02".to_owned(),
//!     category: "Food".to_owned(),
//!     description: Some("Lunch".to_owned()),
//!     amount: "50.00".to_owned(),
//!     type_: "expense".to_owned(),
//! })?;
//!
//! let summary = budget.summary()?;
//! println!("Balance: {}", summary.balance());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod amount;
mod budget;
mod chart;
mod config;
mod database_id;
mod db;
mod error;
mod logging;
mod stores;
mod summary;
mod transaction;

pub use amount::Amount;
pub use budget::{Budget, ExpenseBreakdown, expenses_by_category};
pub use chart::{chart_page, expense_pie_chart};
pub use config::DatabaseConfig;
pub use database_id::{DatabaseId, TransactionId};
pub use db::{connect, initialize as initialize_db};
pub use error::{Error, WriteError};
pub use logging::{DEFAULT_LOG_FILTER, setup_logging};
pub use stores::{SQLiteTransactionStore, TransactionStore};
pub use summary::{Summary, summarize};
pub use transaction::{
    MAX_CATEGORY_LENGTH, Transaction, TransactionBuilder, TransactionForm, TransactionType,
    count_transactions, create_transaction, delete_transaction, get_transaction,
    list_transactions, parse_date,
};
