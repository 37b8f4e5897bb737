use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use transaction_api::{
    initialize_db,
    transaction::{NewTransaction, TransactionStatus, create_transaction, update_transaction_status},
    user::create_user,
};

/// A utility for creating a test database for the transaction API server.
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
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test user...");
    let user = create_user("test", &conn)?;

    println!("Creating test transactions...");
    let samples = [
        (250.0, "DEPOSIT", TransactionStatus::Completed),
        (-40.5, "WITHDRAWAL", TransactionStatus::Failed),
        (12.0, "DEPOSIT", TransactionStatus::Pending),
    ];

    for (amount, transaction_type, status) in samples {
        let transaction_id = create_transaction(
            NewTransaction {
                amount,
                transaction_type: transaction_type.to_owned(),
                user_id: user.user_id,
            },
            &conn,
        )?;

        if status != TransactionStatus::Pending {
            update_transaction_status(transaction_id, status, &conn)?;
        }

        println!("  #{transaction_id}: {transaction_type} {amount} ({status})");
    }

    println!("Success!");

    Ok(())
}
