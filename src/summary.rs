//! Total income and expenses across all transactions.

use rusqlite::Connection;
use serde::Serialize;

use crate::{Error, amount::Amount, transaction::read_error};

/// The sum of all income and all expenses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    /// The sum of the amounts of all income transactions.
    pub income: Amount,
    /// The sum of the amounts of all expense transactions.
    pub expense: Amount,
}

impl Summary {
    /// Income minus expenses. Negative when more was spent than earned.
    pub fn balance(&self) -> Amount {
        self.income - self.expense
    }
}

/// Sum the transaction amounts by type in a single aggregate query.
///
/// An empty table gives zero for both totals.
///
/// # Errors
/// This function will return an [Error::ReadError] if there is an SQL error.
pub fn summarize(connection: &Connection) -> Result<Summary, Error> {
    connection
        .query_row(
            "SELECT
                COALESCE(SUM(CASE WHEN type = 'income' THEN amount END), 0) AS total_income,
                COALESCE(SUM(CASE WHEN type = 'expense' THEN amount END), 0) AS total_expense
             FROM transactions",
            [],
            |row| {
                Ok(Summary {
                    income: row.get(0)?,
                    expense: row.get(1)?,
                })
            },
        )
        .map_err(read_error)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        amount::Amount,
        db::initialize,
        summary::{Summary, summarize},
        transaction::{Transaction, TransactionType, create_transaction},
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn insert(cents: i64, kind: TransactionType, connection: &Connection) {
        create_transaction(
            Transaction::build(date!(2024 - 01 - 01), "Test", Amount::from_cents(cents), kind),
            connection,
        )
        .unwrap();
    }

    #[test]
    fn empty_table_sums_to_zero() {
        let connection = get_test_connection();

        let summary = summarize(&connection).unwrap();

        assert_eq!(
            summary,
            Summary {
                income: Amount::ZERO,
                expense: Amount::ZERO
            }
        );
        assert_eq!(summary.income.to_string(), "0.00");
    }

    #[test]
    fn sums_income_and_expense_separately() {
        let connection = get_test_connection();
        insert(10000, TransactionType::Income, &connection);
        insert(4000, TransactionType::Expense, &connection);

        let summary = summarize(&connection).unwrap();

        assert_eq!(summary.income, Amount::from_cents(10000));
        assert_eq!(summary.expense, Amount::from_cents(4000));
        assert_eq!(summary.balance(), Amount::from_cents(6000));
    }

    #[test]
    fn only_expenses_gives_zero_income() {
        let connection = get_test_connection();
        insert(1999, TransactionType::Expense, &connection);
        insert(1, TransactionType::Expense, &connection);

        let summary = summarize(&connection).unwrap();

        assert_eq!(summary.income, Amount::ZERO);
        assert_eq!(summary.expense, Amount::from_cents(2000));
        assert_eq!(summary.balance().to_string(), "-20.00");
    }

    #[test]
    fn sums_cents_without_float_drift() {
        let connection = get_test_connection();
        for _ in 0..10 {
            insert(10, TransactionType::Expense, &connection);
        }

        let summary = summarize(&connection).unwrap();

        assert_eq!(summary.expense.to_string(), "1.00");
    }

    #[test]
    fn fails_without_table() {
        let connection = Connection::open_in_memory().unwrap();

        assert!(matches!(
            summarize(&connection),
            Err(Error::ReadError(_))
        ));
    }
}
