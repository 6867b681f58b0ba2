use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use offer_cli::app::{self, ComparisonError};
use offer_cli::report::ComparisonReport;
use offer_cli::{csv_loader, logging};
use offer_core::wizard::{OfferForm, StepController};
use offer_core::{LeadContact, LeadSubmitter};
use offer_db_sqlite::{SqliteLeadStore, StoreConfig};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compares a lump-sum settlement offer against our valuation of the
/// payment stream behind it.
#[derive(Debug, Parser)]
#[command(name = "offer-compare")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log filter, e.g. `info` or `offer_core=debug`. `RUST_LOG` wins when set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Value one payment stream and compare it to an existing offer.
    Compare {
        /// Lump sum already offered, e.g. `50000` or `$50,000.00`.
        #[arg(long)]
        existing_offer: String,

        /// Amount of each payment.
        #[arg(long)]
        payment_amount: String,

        /// monthly, quarterly, semiannually or annually.
        #[arg(long, default_value = "monthly")]
        frequency: String,

        /// Name of the company that made the existing offer.
        #[arg(long)]
        company: Option<String>,

        #[command(flatten)]
        store: StoreArgs,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Compare every row of a CSV file.
    Batch {
        /// CSV with `existing_offer_amount,payment_amount[,payment_frequency][,company_name]`.
        #[arg(short, long)]
        file: PathBuf,

        #[command(flatten)]
        store: StoreArgs,
    },
}

#[derive(Debug, clap::Args)]
struct StoreArgs {
    /// Record finished comparisons in this SQLite database, e.g. `offers.db`.
    #[arg(long)]
    db: Option<String>,

    /// Do not apply schema migrations when opening `--db`.
    #[arg(long, default_value_t = false)]
    no_migrate: bool,
}

impl StoreArgs {
    fn config(&self) -> Option<StoreConfig> {
        self.db.as_ref().map(|db| StoreConfig {
            database_url: db.clone(),
            migrate: !self.no_migrate,
        })
    }
}

// ─── commands ────────────────────────────────────────────────────────────────

fn print_field_errors(err: &ComparisonError) {
    match err {
        ComparisonError::Invalid(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("  {field}: {message}");
            }
        }
        other => eprintln!("  {other}"),
    }
}

fn contact(
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
) -> LeadContact {
    LeadContact { name, email, phone }
}

fn print_report(controller: &StepController) {
    let session = controller.session();
    if let (Some(input), Some(result)) = (session.input(), session.result()) {
        println!("{}", ComparisonReport::new(input, result));
    }
}

async fn compare(
    existing_offer: String,
    payment_amount: String,
    frequency: String,
    company: Option<String>,
    store: StoreArgs,
    contact: LeadContact,
) -> Result<()> {
    let mut form = OfferForm::new(existing_offer, payment_amount, frequency);
    if let Some(company) = company {
        form = form.with_company(company);
    }

    let controller = match app::run_comparison(form) {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("Cannot compare this offer:");
            print_field_errors(&err);
            anyhow::bail!("comparison rejected");
        }
    };
    print_report(&controller);

    if let (Some(config), Some(lead)) = (store.config(), controller.lead(contact)) {
        if app::submit_lead(&config, &lead).await? {
            println!("\nComparison recorded.");
        } else {
            warn!("comparison was not recorded");
        }
    }
    Ok(())
}

async fn batch(
    file: PathBuf,
    store: StoreArgs,
) -> Result<()> {
    let records = csv_loader::load_from_file(&file)
        .with_context(|| format!("Failed to load: {}", file.display()))?;
    info!(rows = records.len(), file = %file.display(), "loaded comparisons");

    let submitter = match store.config() {
        Some(config) => Some(SqliteLeadStore::open(&config).await?),
        None => None,
    };

    let mut rejected = 0usize;
    let mut recorded = 0usize;
    for record in records {
        println!("── Row {} ──", record.row);
        let controller = match app::run_comparison(record.form) {
            Ok(controller) => controller,
            Err(err) => {
                rejected += 1;
                eprintln!("Row {} skipped:", record.row);
                print_field_errors(&err);
                continue;
            }
        };
        print_report(&controller);
        println!();

        if let (Some(submitter), Some(lead)) =
            (&submitter, controller.lead(LeadContact::default()))
        {
            if submitter.submit(&lead).await {
                recorded += 1;
            }
        }
    }

    if rejected > 0 {
        warn!(rejected, "some rows were skipped");
    }
    if submitter.is_some() {
        info!(recorded, "batch recorded");
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_file.as_deref())?;

    match cli.command {
        Command::Compare {
            existing_offer,
            payment_amount,
            frequency,
            company,
            store,
            name,
            email,
            phone,
        } => {
            compare(
                existing_offer,
                payment_amount,
                frequency,
                company,
                store,
                contact(name, email, phone),
            )
            .await
        }
        Command::Batch { file, store } => batch(file, store).await,
    }
}
