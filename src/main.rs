use clap::Parser;
use std::process;
use todo::cli::{Cli, Commands};
use todo::cli_handlers;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let db = cli.db.as_deref();

    let result = match cli.command {
        Commands::Add {
            title,
            priority,
            due,
        } => cli_handlers::handle_add(db, &title, priority.as_deref(), due.as_deref()),
        Commands::List {
            completed,
            active,
            json,
        } => cli_handlers::handle_list(db, completed, active, json),
        Commands::Toggle { id } => cli_handlers::handle_toggle(db, id),
        Commands::Delete { id } => cli_handlers::handle_delete(db, id),
        Commands::Clear => cli_handlers::handle_clear(db),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
