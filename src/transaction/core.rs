//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    amount::Amount,
    database_id::TransactionId,
    error::WriteError,
};

/// The longest category name the `category` column accepts.
pub const MAX_CATEGORY_LENGTH: usize = 100;

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the database.
    pub id: TransactionId,
    /// When the transaction happened.
    pub date: Date,
    /// A short label such as "Food" or "Salary".
    pub category: String,
    /// An optional note about what the transaction was for.
    pub description: Option<String>,
    /// The amount of money spent or earned. Always zero or greater, the
    /// direction is given by `kind`.
    pub amount: Amount,
    /// Whether money was earned or spent.
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        date: Date,
        category: &str,
        amount: Amount,
        kind: TransactionType,
    ) -> TransactionBuilder {
        TransactionBuilder {
            date,
            category: category.to_owned(),
            description: None,
            amount,
            kind,
        }
    }
}

/// Whether a transaction records money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned, e.g. a salary.
    Income,
    /// Money spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The literal stored in the `type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = WriteError;

    /// Parse `"income"` or `"expense"`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(WriteError::InvalidType(s.to_owned())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        match text {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction type \"{other}\"").into(),
            )),
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Required fields are set by [Transaction::build], optional fields have
/// setters. Pass the builder to [create_transaction] to store it.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The date when the transaction occurred.
    pub date: Date,

    /// A short label used to group transactions, e.g. in the expense chart.
    ///
    /// Must not be empty and must be at most [MAX_CATEGORY_LENGTH]
    /// characters long.
    pub category: String,

    /// An optional free text note.
    pub description: Option<String>,

    /// The amount of money that moved, in the direction given by `kind`.
    pub amount: Amount,

    /// Whether the transaction is income or an expense.
    pub kind: TransactionType,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(str::to_owned);
        self
    }

    /// Check the fields that the database column types cannot check.
    ///
    /// # Errors
    /// Returns a:
    /// - [WriteError::EmptyCategory] if the category is empty or whitespace,
    /// - or [WriteError::CategoryTooLong] if the category has more than
    ///   [MAX_CATEGORY_LENGTH] characters.
    pub fn validate(&self) -> Result<(), WriteError> {
        if self.category.trim().is_empty() {
            return Err(WriteError::EmptyCategory);
        }

        let length = self.category.chars().count();
        if length > MAX_CATEGORY_LENGTH {
            return Err(WriteError::CategoryTooLong(length));
        }

        Ok(())
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// The insert runs in its own SQL transaction, which is rolled back if the
/// insert fails.
///
/// # Errors
/// This function will return an [Error::WriteError] if the builder fails
/// [TransactionBuilder::validate], the row violates a table constraint, or
/// there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    builder.validate()?;

    let insert = || -> Result<Transaction, rusqlite::Error> {
        let sql_transaction = connection.unchecked_transaction()?;

        let transaction = sql_transaction
            .prepare(
                "INSERT INTO transactions (date, category, description, amount, type)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, date, category, description, amount, type",
            )?
            .query_row(
                (
                    builder.date,
                    &builder.category,
                    &builder.description,
                    builder.amount,
                    builder.kind,
                ),
                map_transaction_row,
            )?;

        sql_transaction.commit()?;

        Ok(transaction)
    };

    let transaction = insert().map_err(|error| {
        tracing::error!("could not insert transaction, rolled back: {error}");
        Error::WriteError(error.into())
    })?;

    tracing::debug!("created transaction {}", transaction.id);

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// Returns `None` if no transaction has the ID `id`.
///
/// # Errors
/// This function will return an [Error::ReadError] if there is an SQL error.
pub fn get_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<Option<Transaction>, Error> {
    let result = connection
        .prepare(
            "SELECT id, date, category, description, amount, type FROM transactions WHERE id = :id",
        )
        .and_then(|mut statement| {
            statement.query_one(&[(":id", &id)], map_transaction_row)
        });

    match result {
        Ok(transaction) => Ok(Some(transaction)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(error) => Err(read_error(error)),
    }
}

/// Retrieve every transaction, newest first (by descending ID).
///
/// # Errors
/// This function will return an [Error::ReadError] if there is an SQL error
/// or a row cannot be converted into a [Transaction].
pub fn list_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    let select = || -> Result<Vec<Transaction>, rusqlite::Error> {
        connection
            .prepare(
                "SELECT id, date, category, description, amount, type
                 FROM transactions
                 ORDER BY id DESC",
            )?
            .query_map([], map_transaction_row)?
            .collect()
    };

    select().map_err(read_error)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return an [Error::ReadError] if there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transactions;", [], |row| row.get(0))
        .map_err(read_error)
}

/// Create the transaction table in the database.
///
/// Does nothing if the table already exists.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date DATE NOT NULL,
                category VARCHAR(100) NOT NULL,
                description TEXT,
                amount NUMERIC(12, 2) NOT NULL,
                type VARCHAR(10) NOT NULL CHECK (type IN ('income', 'expense'))
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let category = row.get(2)?;
    let description = row.get(3)?;
    let amount = row.get(4)?;
    let kind = row.get(5)?;

    Ok(Transaction {
        id,
        date,
        category,
        description,
        amount,
        kind,
    })
}

pub(crate) fn read_error(error: rusqlite::Error) -> Error {
    tracing::error!("could not read transactions: {error}");
    Error::ReadError(error)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        amount::Amount,
        db::initialize,
        error::WriteError,
        transaction::{
            Transaction, TransactionType, count_transactions, create_transaction,
            get_transaction, list_transactions,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let amount = Amount::from_cents(1230);

        let result = create_transaction(
            Transaction::build(date!(2025 - 10 - 05), "Food", amount, TransactionType::Expense)
                .description(Some("Lunch")),
            &conn,
        );

        match result {
            Ok(transaction) => {
                assert!(transaction.id > 0);
                assert_eq!(transaction.date, date!(2025 - 10 - 05));
                assert_eq!(transaction.category, "Food");
                assert_eq!(transaction.description.as_deref(), Some("Lunch"));
                assert_eq!(transaction.amount, amount);
                assert_eq!(transaction.kind, TransactionType::Expense);
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_assigns_new_ids() {
        let conn = get_test_connection();
        let builder = Transaction::build(
            date!(2025 - 10 - 05),
            "Food",
            Amount::from_cents(100),
            TransactionType::Expense,
        );

        let first = create_transaction(builder.clone(), &conn).unwrap();
        let second = create_transaction(builder, &conn).unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn create_fails_on_empty_category() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build(
                date!(2025 - 10 - 05),
                "  ",
                Amount::from_cents(100),
                TransactionType::Expense,
            ),
            &conn,
        );

        assert_eq!(result, Err(Error::WriteError(WriteError::EmptyCategory)));
        assert_eq!(count_transactions(&conn), Ok(0));
    }

    #[test]
    fn create_fails_on_long_category() {
        let conn = get_test_connection();
        let category = "x".repeat(101);

        let result = create_transaction(
            Transaction::build(
                date!(2025 - 10 - 05),
                &category,
                Amount::from_cents(100),
                TransactionType::Expense,
            ),
            &conn,
        );

        assert_eq!(
            result,
            Err(Error::WriteError(WriteError::CategoryTooLong(101)))
        );
    }

    #[test]
    fn create_rolls_back_when_table_is_missing() {
        let conn = Connection::open_in_memory().unwrap();

        let result = create_transaction(
            Transaction::build(
                date!(2025 - 10 - 05),
                "Food",
                Amount::from_cents(100),
                TransactionType::Expense,
            ),
            &conn,
        );

        assert!(matches!(
            result,
            Err(Error::WriteError(WriteError::SqlError(_)))
        ));
        assert!(conn.is_autocommit(), "transaction was left open");
    }

    #[test]
    fn check_constraint_rejects_unknown_type() {
        let conn = get_test_connection();

        let result = conn.execute(
            "INSERT INTO transactions (date, category, amount, type)
             VALUES ('2024-01-01', 'Refunds', 10, 'refund')",
            (),
        );

        assert!(matches!(
            WriteError::from(result.unwrap_err()),
            WriteError::ConstraintViolation(_)
        ));
        assert_eq!(count_transactions(&conn), Ok(0));
    }

    #[test]
    fn get_returns_created_transaction() {
        let conn = get_test_connection();
        let created = create_transaction(
            Transaction::build(
                date!(2024 - 01 - 01),
                "Salary",
                Amount::from_cents(500000),
                TransactionType::Income,
            ),
            &conn,
        )
        .unwrap();

        let got = get_transaction(created.id, &conn).unwrap();

        assert_eq!(got, Some(created));
    }

    #[test]
    fn get_returns_none_for_missing_id() {
        let conn = get_test_connection();

        assert_eq!(get_transaction(42, &conn), Ok(None));
    }

    #[test]
    fn list_is_empty_for_new_database() {
        let conn = get_test_connection();

        assert_eq!(list_transactions(&conn), Ok(vec![]));
    }

    #[test]
    fn list_orders_by_descending_id() {
        let conn = get_test_connection();
        let mut want_ids = Vec::new();
        for cents in [100, 200, 300] {
            let transaction = create_transaction(
                Transaction::build(
                    date!(2025 - 10 - 05),
                    "Food",
                    Amount::from_cents(cents),
                    TransactionType::Expense,
                ),
                &conn,
            )
            .unwrap();
            want_ids.push(transaction.id);
        }
        want_ids.reverse();

        let got_ids: Vec<_> = list_transactions(&conn)
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.id)
            .collect();

        assert_eq!(got_ids, want_ids);
    }

    #[test]
    fn list_fails_on_unknown_stored_type() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE transactions (
                id INTEGER PRIMARY KEY, date DATE, category TEXT,
                description TEXT, amount NUMERIC, type TEXT)",
            (),
        )
        .unwrap();
        conn.execute(
            "INSERT INTO transactions (date, category, amount, type)
             VALUES ('2024-01-01', 'Refunds', 10, 'refund')",
            (),
        )
        .unwrap();

        assert!(matches!(
            list_transactions(&conn),
            Err(Error::ReadError(_))
        ));
    }

    #[test]
    fn amount_round_trips_exactly() {
        let conn = get_test_connection();
        let amount = Amount::from_cents(123_456_789_012);

        let created = create_transaction(
            Transaction::build(date!(2025 - 10 - 05), "Rent", amount, TransactionType::Expense),
            &conn,
        )
        .unwrap();

        let listed = list_transactions(&conn).unwrap();
        assert_eq!(created.amount, amount);
        assert_eq!(listed[0].amount.to_string(), "1234567890.12");
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let want_count = 20;
        for i in 1..=want_count {
            create_transaction(
                Transaction::build(
                    date!(2025 - 10 - 05),
                    "Food",
                    Amount::from_cents(i as i64 * 100),
                    TransactionType::Expense,
                ),
                &conn,
            )
            .expect("Could not create transaction");
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }
}
