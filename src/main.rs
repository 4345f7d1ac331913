use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use orderbulk::application::engine::OrderBulkCreator;
use orderbulk::domain::errors::ErrorPolicy;
use orderbulk::domain::ports::{CatalogStoreBox, OrderStoreBox};
use orderbulk::infrastructure::in_memory::{InMemoryCatalogStore, InMemoryOrderStore};
use orderbulk::interfaces::csv::result_writer::ResultWriter;
use orderbulk::interfaces::json::catalog_reader::CatalogReader;
use orderbulk::interfaces::json::order_reader::OrderReader;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    RejectEverything,
    RejectFailedRows,
    IgnoreFailed,
}

impl From<PolicyArg> for ErrorPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::RejectEverything => ErrorPolicy::RejectEverything,
            PolicyArg::RejectFailedRows => ErrorPolicy::RejectFailedRows,
            PolicyArg::IgnoreFailed => ErrorPolicy::IgnoreFailed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input JSON file holding an array of orders
    input: PathBuf,

    /// Catalog JSON file with the channels, users, variants... orders refer to
    #[arg(long, env = "ORDERBULK_CATALOG")]
    catalog: PathBuf,

    /// What to do when some orders have errors
    #[arg(long, value_enum, env = "ORDERBULK_ERROR_POLICY", default_value = "reject-everything")]
    error_policy: PolicyArg,

    /// Output format written to stdout
    #[arg(long, value_enum, env = "ORDERBULK_FORMAT", default_value = "json")]
    format: OutputFormat,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "ORDERBULK_DB_PATH")]
    db_path: Option<PathBuf>,
}

#[cfg(feature = "storage-rocksdb")]
fn order_store(db_path: Option<PathBuf>) -> Result<OrderStoreBox> {
    use orderbulk::infrastructure::rocksdb::RocksDBOrderStore;

    Ok(match db_path {
        Some(path) => Box::new(RocksDBOrderStore::open(path).into_diagnostic()?),
        None => Box::new(InMemoryOrderStore::new()),
    })
}

#[cfg(not(feature = "storage-rocksdb"))]
fn order_store(db_path: Option<PathBuf>) -> Result<OrderStoreBox> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }
    Ok(Box::new(InMemoryOrderStore::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let catalog = CatalogReader::new(File::open(&cli.catalog).into_diagnostic()?)
        .catalog()
        .into_diagnostic()?;
    let catalog: CatalogStoreBox = Box::new(InMemoryCatalogStore::from_fixture(catalog));
    let creator = OrderBulkCreator::new(catalog, order_store(cli.db_path)?);

    let file = File::open(&cli.input).into_diagnostic()?;
    let rows = OrderReader::new(file).orders().into_diagnostic()?.collect();
    let response = creator
        .bulk_create_rows(rows, cli.error_policy.into())
        .await
        .into_diagnostic()?;

    let stdout = io::stdout();
    match cli.format {
        OutputFormat::Json => {
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &response).into_diagnostic()?;
            writeln!(out).into_diagnostic()?;
        }
        OutputFormat::Csv => {
            let mut writer = ResultWriter::new(stdout.lock());
            writer.write_response(&response).into_diagnostic()?;
        }
    }

    Ok(())
}
