/*! Opens connections to the application's database and sets up its schema. */

use rusqlite::{Connection, OpenFlags};

use crate::{Error, config::DatabaseConfig, transaction::create_transaction_table};

/// Open a new connection to the database described by `config`.
///
/// The connection is closed when it is dropped, so callers should keep it
/// for the duration of one operation only.
///
/// # Errors
/// Returns an [Error::ConnectionError] if the database cannot be opened, e.g.
/// the file does not exist and `config.create_if_missing` is `false`, or the
/// path is not writable. The failure is logged before it is returned.
pub fn connect(config: &DatabaseConfig) -> Result<Connection, Error> {
    // No SQLITE_OPEN_URI, the path is always a plain file path.
    let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;

    if config.create_if_missing {
        flags |= OpenFlags::SQLITE_OPEN_CREATE;
    }

    let open = || -> Result<Connection, rusqlite::Error> {
        let connection = Connection::open_with_flags(&config.path, flags)?;
        connection.busy_timeout(config.busy_timeout)?;
        Ok(connection)
    };

    open().map_err(|source| {
        tracing::error!(
            "could not connect to the database at {:?}: {}",
            config.path,
            source
        );

        Error::ConnectionError {
            path: config.path.clone(),
            source,
        }
    })
}

/// Create the application tables if they do not exist yet.
///
/// Safe to call on every startup. The DDL runs in a single SQL transaction
/// which is rolled back if any statement fails.
///
/// # Errors
/// Returns an [Error::SchemaError] if any statement fails.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let create = || -> Result<(), rusqlite::Error> {
        let transaction = connection.unchecked_transaction()?;

        create_transaction_table(&transaction)?;

        transaction.commit()
    };

    create().map_err(|error| {
        tracing::error!("could not create the database schema: {error}");
        Error::SchemaError(error)
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use tempfile::TempDir;

    use crate::{
        Error,
        config::DatabaseConfig,
        db::{connect, initialize},
    };

    fn count_tables(connection: &Connection, name: &str) -> u32 {
        connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [name],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn connect_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("budget.db");

        let connection = connect(&DatabaseConfig::new(&path)).unwrap();
        initialize(&connection).unwrap();

        assert!(path.is_file());
    }

    #[test]
    fn connect_fails_on_missing_file_when_creation_is_disabled() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("budget.db");
        let config = DatabaseConfig::new(&path).create_if_missing(false);

        let result = connect(&config);

        match result {
            Err(Error::ConnectionError { path: got_path, .. }) => assert_eq!(got_path, path),
            Err(error) => panic!("want connection error, got {error}"),
            Ok(_) => panic!("want connection error, got a connection"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn connect_fails_when_directory_is_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("budget.db");

        let result = connect(&DatabaseConfig::new(path));

        assert!(matches!(result, Err(Error::ConnectionError { .. })));
    }

    #[test]
    fn connect_does_not_treat_path_as_uri() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("budget.db");
        Connection::open(&path).unwrap();
        let uri = format!("file:{}?mode=ro", path.display());
        let config = DatabaseConfig::new(&uri).create_if_missing(false);

        let result = connect(&config);

        match result {
            Err(Error::ConnectionError { path: got_path, .. }) => {
                assert_eq!(got_path.to_str(), Some(uri.as_str()))
            }
            Err(error) => panic!("want connection error, got {error}"),
            Ok(_) => panic!("want connection error, the path was opened as a URI"),
        }
    }

    #[test]
    fn initialize_creates_transactions_table() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        assert_eq!(count_tables(&connection, "transactions"), 1);
    }

    #[test]
    fn initialize_twice_succeeds_without_duplicate_table() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();
        initialize(&connection).unwrap();

        assert_eq!(count_tables(&connection, "transactions"), 1);
    }

    #[test]
    fn initialize_keeps_existing_rows() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
            .execute(
                "INSERT INTO transactions (date, category, amount, type)
                 VALUES ('2024-01-01', 'Salary', 5000, 'income')",
                (),
            )
            .unwrap();

        initialize(&connection).unwrap();

        let count: u32 = connection
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn initialize_fails_on_read_only_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("budget.db");
        Connection::open(&path)
            .unwrap()
            .execute("CREATE TABLE other (x INTEGER)", ())
            .unwrap();
        let connection = Connection::open_with_flags(
            &path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        )
        .unwrap();

        let result = initialize(&connection);

        assert!(matches!(result, Err(Error::SchemaError(_))));
    }
}
