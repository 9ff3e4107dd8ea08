use rusqlite::Connection;

use crate::{Error, database_id::TransactionId};

/// Delete the transaction with the ID `id`.
///
/// Returns `true` if a transaction was deleted and `false` if no transaction
/// has the ID `id`. A missing ID is not treated as an error, the caller
/// decides what to tell the user.
///
/// # Errors
/// Returns an [Error::WriteError] if there is an SQL error. The delete is
/// rolled back in that case.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<bool, Error> {
    let delete = || -> Result<usize, rusqlite::Error> {
        let sql_transaction = connection.unchecked_transaction()?;

        let rows_affected = sql_transaction
            .execute("DELETE FROM transactions WHERE id = :id", &[(":id", &id)])?;

        sql_transaction.commit()?;

        Ok(rows_affected)
    };

    let rows_affected = delete().map_err(|error| {
        tracing::error!("could not delete transaction {id}, rolled back: {error}");
        Error::WriteError(error.into())
    })?;

    if rows_affected == 0 {
        tracing::debug!("tried to delete transaction {id} which is not in the database");
    }

    Ok(rows_affected > 0)
}
