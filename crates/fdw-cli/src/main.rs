//! cfdw - drive the Contentful foreign data wrappers from a shell
//!
//! Each command builds a data source from table options the same way a
//! relational host would, then runs one scan or write against it.

mod commands;

use clap::{Parser, Subcommand};
use commands::{DeleteCommand, InsertCommand, ScanCommand, UpdateCommand};
use tracing_subscriber::{layer::SubscriberExt, Layer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "CFDW_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: compact, full
    #[arg(long, default_value = "compact", env = "CFDW_LOG_FORMAT", global = true)]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a foreign table, optionally filtered
    Scan(ScanCommand),
    /// Insert a row
    Insert(InsertCommand),
    /// Update the row with the given id
    Update(UpdateCommand),
    /// Delete the row with the given id
    Delete(DeleteCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // If RUST_LOG is set, use it directly; otherwise scope the level to our crates
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::new(format!(
            "fdw_cli={level},\
             fdw_query={level},\
             fdw_query_contentful={level},\
             hyper=warn,\
             reqwest=warn,\
             rustls=warn",
            level = cli.log_level
        )),
    };

    let fmt_layer = match cli.log_format.as_str() {
        "full" => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
        _ => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact()
            .with_target(false)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Scan(cmd) => cmd.execute(),
        Commands::Insert(cmd) => cmd.execute(),
        Commands::Update(cmd) => cmd.execute(),
        Commands::Delete(cmd) => cmd.execute(),
    }
}
