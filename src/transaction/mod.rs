//! Transaction management for the budgeting application.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing, querying, and deleting transactions
//! - Parsing of raw form input into transactions

mod core;
mod delete;
mod form;

pub use core::{
    MAX_CATEGORY_LENGTH, Transaction, TransactionBuilder, TransactionType, count_transactions,
    create_transaction, create_transaction_table, get_transaction, list_transactions,
};
pub use delete::delete_transaction;
pub use form::{TransactionForm, parse_date};

pub(crate) use core::read_error;
