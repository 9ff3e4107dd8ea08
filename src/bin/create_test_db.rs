use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::macros::date;

use budget_manager::{
    Amount, DatabaseConfig, Transaction, TransactionType, connect, create_transaction,
    initialize_db,
};

/// A utility for creating a test database for the budget manager.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = connect(&DatabaseConfig::new(output_path))?;

    initialize_db(&conn)?;

    println!("Creating test transactions...");

    let transactions = [
        (date!(2024 - 01 - 01), "Salary", None, 500000, TransactionType::Income),
        (date!(2024 - 01 - 02), "Rent", None, 120000, TransactionType::Expense),
        (date!(2024 - 01 - 03), "Food", Some("Groceries"), 8450, TransactionType::Expense),
        (date!(2024 - 01 - 05), "Transport", Some("Bus pass"), 4000, TransactionType::Expense),
        (date!(2024 - 01 - 09), "Food", Some("Lunch"), 1250, TransactionType::Expense),
        (date!(2024 - 01 - 12), "Freelance", Some("Logo design"), 35000, TransactionType::Income),
        (date!(2024 - 01 - 15), "Utilities", Some("Power bill"), 11299, TransactionType::Expense),
        (date!(2024 - 01 - 20), "Entertainment", None, 2500, TransactionType::Expense),
    ];

    for (date, category, description, cents, kind) in transactions {
        create_transaction(
            Transaction::build(date, category, Amount::from_cents(cents), kind)
                .description(description),
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
