use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use revshare::application::service::{RemittanceReceipt, RepaymentService};
use revshare::domain::compliance::{AmountLimitRule, RemittanceValidator};
use revshare::domain::payment::{BasisPoints, RevenueAmount};
use revshare::domain::ports::{LedgerClientBox, SigningCredential};
use revshare::infrastructure::in_memory::InMemoryLedger;
use revshare::interfaces::csv::remittance_writer::{RemittanceRecord, RemittanceWriter};
use revshare::interfaces::csv::revenue_reader::{RevenueEvent, RevenueReader};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input revenue events CSV file (headers: loan, revenue)
    input: PathBuf,

    /// Share of each revenue event owed to the lender, in basis points.
    #[arg(long, env = "REVSHARE_RATE_BPS", default_value_t = 2500)]
    rate_bps: u16,

    /// Authority that signs the repayments.
    #[arg(long, env = "REVSHARE_CREDENTIAL", default_value = "company-authority")]
    credential: String,

    /// Refuse any single remittance above this many units.
    #[arg(long, env = "REVSHARE_MAX_REMITTANCE")]
    max_remittance: Option<u64>,

    /// Output format for the remittance records.
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

async fn process_event(
    service: &RepaymentService,
    event: RevenueEvent,
    credential: &SigningCredential,
) -> revshare::error::Result<RemittanceReceipt> {
    let revenue = RevenueAmount::try_from(event.revenue)?;
    service
        .process_revenue_payment(&event.loan, revenue, credential)
        .await
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("revshare=info")),
        )
        .init();

    let cli = Cli::parse();

    let rate = BasisPoints::new(cli.rate_bps).into_diagnostic()?;
    let credential = SigningCredential(cli.credential);

    // Dry run: submissions go to an in-process ledger
    let ledger: LedgerClientBox = Box::new(InMemoryLedger::new());
    let mut validator = RemittanceValidator::new();
    if let Some(max_amount) = cli.max_remittance {
        validator.add_rule(Box::new(AmountLimitRule::new(max_amount)));
    }
    let service = RepaymentService::new(ledger, rate).with_validator(validator);

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = RevenueReader::new(file);
    let mut receipts: Vec<RemittanceReceipt> = Vec::new();
    for event_result in reader.events() {
        match event_result {
            Ok(event) => match process_event(&service, event, &credential).await {
                Ok(receipt) => receipts.push(receipt),
                Err(e) => eprintln!("Error processing revenue event: {}", e),
            },
            Err(e) => {
                eprintln!("Error reading revenue event: {}", e);
            }
        }
    }

    tracing::info!(
        count = receipts.len(),
        rate_bps = service.rate().value(),
        "revenue events processed"
    );

    let stdout = io::stdout();
    match cli.format {
        OutputFormat::Csv => {
            let mut writer = RemittanceWriter::new(stdout.lock());
            writer.write_receipts(&receipts).into_diagnostic()?;
        }
        OutputFormat::Json => {
            let records: Vec<RemittanceRecord> =
                receipts.iter().map(RemittanceRecord::from).collect();
            serde_json::to_writer_pretty(stdout.lock(), &records).into_diagnostic()?;
            println!();
        }
    }

    Ok(())
}
