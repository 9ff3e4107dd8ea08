use std::{
    error::Error,
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};

use clap::{ArgAction, Parser, Subcommand};

use budget_manager::{
    Budget, DatabaseConfig, SQLiteTransactionStore, Summary, Transaction, TransactionForm,
    TransactionId, chart_page, expense_pie_chart, setup_logging,
};

/// Record income and expenses and see where the money goes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "BUDGET_DB_PATH", default_value = "budget.db")]
    db_path: PathBuf,

    /// Create the database file if it does not exist.
    #[arg(long, env = "BUDGET_DB_CREATE", default_value_t = true, action = ArgAction::Set)]
    create: bool,

    /// How long to wait for another process to unlock the database, in milliseconds.
    #[arg(long, env = "BUDGET_BUSY_TIMEOUT_MS", default_value_t = 5000)]
    busy_timeout_ms: u64,

    /// Also write debug level logs to this file.
    #[arg(long)]
    debug_log: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the transactions table if it does not exist.
    Init,

    /// Record a new transaction.
    Add {
        /// The date of the transaction (YYYY-MM-DD).
        #[arg(long)]
        date: String,

        /// A short label such as "Food" or "Salary".
        #[arg(long)]
        category: String,

        /// The amount, e.g. 12.50.
        #[arg(long)]
        amount: String,

        /// Either "income" or "expense".
        #[arg(long = "type", default_value = "expense")]
        type_: String,

        /// An optional note.
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a transaction by its ID.
    Delete {
        /// The ID shown by `list`.
        id: TransactionId,

        /// Do not ask for confirmation.
        #[arg(long, short)]
        yes: bool,
    },

    /// Show all transactions, newest first.
    List {
        /// Print the transactions as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show total income, total expenses and the balance.
    Summary,

    /// Write a pie chart of expenses by category to an HTML file.
    Chart {
        /// Where to save the HTML page.
        #[arg(long, short, default_value = "expenses.html")]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(args.debug_log.as_deref()) {
        eprintln!("Could not open the debug log: {error}");
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = DatabaseConfig::new(args.db_path)
        .create_if_missing(args.create)
        .busy_timeout(Duration::from_millis(args.busy_timeout_ms));
    config.validate()?;

    let mut budget = Budget::open(SQLiteTransactionStore::new(config))?;

    match args.command {
        Command::Init => println!("The database is ready."),
        Command::Add {
            date,
            category,
            amount,
            type_,
            description,
        } => {
            let id = budget.add(TransactionForm {
                date,
                category,
                description,
                amount,
                type_,
            })?;
            println!("Added transaction {id}.");
        }
        Command::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete transaction {id}?"))? {
                println!("Nothing was deleted.");
                return Ok(());
            }

            if budget.delete(id)? {
                println!("Deleted transaction {id}.");
            } else {
                println!("There is no transaction with the ID {id}.");
            }
        }
        Command::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(budget.transactions())?);
            } else {
                print_table(budget.transactions());
            }
        }
        Command::Summary => print_summary(&budget.summary()?),
        Command::Chart { output } => {
            let breakdown = budget.expenses_by_category();

            if breakdown.is_empty() {
                println!("There are no expenses to chart.");
                return Ok(());
            }

            let page = chart_page(&expense_pie_chart(&breakdown));
            fs::write(&output, page.into_string())?;
            println!("Saved the expense chart to {output:?}.");
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_table(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("There are no transactions yet.");
        return;
    }

    println!(
        "{:>6}  {:<10}  {:<20}  {:<30}  {:>14}  {:<7}",
        "ID", "Date", "Category", "Description", "Amount", "Type"
    );

    for transaction in transactions {
        println!(
            "{:>6}  {:<10}  {:<20}  {:<30}  {:>14}  {:<7}",
            transaction.id,
            transaction.date.to_string(),
            transaction.category,
            transaction.description.as_deref().unwrap_or(""),
            transaction.amount.to_string(),
            transaction.kind.to_string(),
        );
    }
}

fn print_summary(summary: &Summary) {
    println!("Total income:  {:>14}", summary.income.to_string());
    println!("Total expense: {:>14}", summary.expense.to_string());
    println!("Balance:       {:>14}", summary.balance().to_string());
}
