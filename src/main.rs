use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use royal_stay::application::engine::HotelEngine;
use royal_stay::domain::ports::{MemberStoreBox, PaymentStoreBox};
use royal_stay::infrastructure::in_memory::{InMemoryMemberStore, InMemoryPaymentStore};
use royal_stay::interfaces::csv::operation_reader::OperationReader;
use royal_stay::interfaces::csv::report_writer::{ReportWriter, write_json};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input operations CSV file
    input: PathBuf,

    /// Format of the final report written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "royal_stay=info".into()),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let member_store: MemberStoreBox = Box::new(InMemoryMemberStore::new());
    let payment_store: PaymentStoreBox = Box::new(InMemoryPaymentStore::new());
    let engine = HotelEngine::new(member_store, payment_store);

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = OperationReader::new(file);
    // Records are numbered from 1, not counting the header
    for (index, op_result) in reader.operations().enumerate() {
        let record = index + 1;
        match op_result {
            Ok(op) => {
                if let Err(e) = engine.process_operation(op).await {
                    warn!(record, error = %e, "operation rejected");
                }
            }
            Err(e) => {
                warn!(record, error = %e, "unreadable operation");
            }
        }
    }

    let results = engine.into_results().await.into_diagnostic()?;

    let stdout = io::stdout();
    match cli.format {
        OutputFormat::Csv => ReportWriter::new(stdout.lock())
            .write_results(&results)
            .into_diagnostic()?,
        OutputFormat::Json => write_json(stdout.lock(), &results).into_diagnostic()?,
    }

    Ok(())
}
