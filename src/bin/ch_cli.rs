//! Companies House Command Line Interface
//!
//! Prints company search results, PSCs, officers, filing history and
//! charges as tables, and downloads filing documents.
//!
//! # Usage
//!
//! ```bash
//! export COMPANIES_HOUSE_API_KEY=...
//!
//! ch_cli search "shell" --limit 5
//! ch_cli officers 13090621
//! ch_cli filings 13090621 --category accounts --start-index 25
//! ch_cli -o json psc 13090621
//! ch_cli document 13090621 MzM2NDcxNTAzMWFkaXF6a2N4 --out ./docs
//! ```

use anyhow::{Context, Result};
use ch_registry::companies_house::TabularRow;
use ch_registry::{ClientConfig, CompaniesHouseClient, CompanyDocument, FilingsQuery, Table};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ch_cli")]
#[command(version)]
#[command(about = "Query the UK Companies House register")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: json, text, or pretty (default)
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,

    /// Companies House API key
    #[arg(long, global = true, env = "COMPANIES_HOUSE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// API root URL
    #[arg(long, global = true, env = "COMPANIES_HOUSE_API_BASE")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "COMPANIES_HOUSE_TIMEOUT_SECS")]
    timeout: Option<u64>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Search companies by name
    Search {
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Show the company profile
    Profile { number: String },

    /// List persons with significant control
    Psc {
        number: String,

        /// Hide PSCs that have ceased
        #[arg(long)]
        active: bool,
    },

    /// List officers
    Officers {
        number: String,

        /// Hide resigned officers
        #[arg(long)]
        active: bool,
    },

    /// List one page of filing history
    Filings {
        number: String,

        /// Filing category, e.g. accounts, confirmation-statement
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        start_index: Option<u32>,

        #[arg(long)]
        per_page: Option<u32>,
    },

    /// List registered charges
    Charges { number: String },

    /// Download the document of one filing
    Document {
        number: String,
        transaction_id: String,

        /// Output file or directory (defaults to the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn build_client(cli: &Cli) -> Result<CompaniesHouseClient> {
    let mut config = ClientConfig::new();
    if let Some(key) = &cli.api_key {
        config = config.with_api_key(key.clone());
    }
    if let Some(base) = &cli.base_url {
        config = config.with_base_url(base.clone());
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    if config.api_key.is_none() {
        tracing::warn!("No API key set; Companies House will reject unauthenticated requests");
    }

    CompaniesHouseClient::from_config(&config).context("Failed to create Companies House client")
}

async fn run(cli: Cli) -> Result<()> {
    let client = build_client(&cli)?;
    let format = cli.format;

    match cli.command {
        Commands::Search { query, limit } => {
            let table = client
                .get_search_results(&query, limit)
                .await
                .with_context(|| format!("Search for '{}' failed", query))?;
            print_table(&table, format)
        }
        Commands::Profile { number } => {
            let profile = client
                .get_company_info(&number)
                .await
                .with_context(|| format!("Failed to fetch company {}", number))?;
            match format {
                OutputFormat::Json => print_json(&profile),
                OutputFormat::Text | OutputFormat::Pretty => {
                    let address = profile
                        .registered_office_address
                        .as_ref()
                        .map(|a| a.one_line())
                        .unwrap_or_default();
                    let fields = [
                        ("Name", profile.name.clone()),
                        ("Company Number", profile.number.clone()),
                        ("Status", profile.status.clone().unwrap_or_default()),
                        ("Type", profile.company_type.clone().unwrap_or_default()),
                        (
                            "Incorporated",
                            profile.incorporation_date.clone().unwrap_or_default(),
                        ),
                        ("Registered Office", address),
                        ("SIC Codes", profile.sic_codes.join(", ")),
                    ];
                    for (label, value) in fields {
                        if format == OutputFormat::Pretty {
                            println!("{:>18}  {}", label.bold(), value);
                        } else {
                            println!("{:>18}  {}", label, value);
                        }
                    }
                    Ok(())
                }
            }
        }
        Commands::Psc { number, active } => {
            let mut table = client
                .get_persons_with_significant_control(&number)
                .await
                .with_context(|| format!("Failed to fetch PSCs for {}", number))?;
            if active {
                table.retain(|row| row.is_active());
            }
            print_table(&table, format)
        }
        Commands::Officers { number, active } => {
            let mut table = client
                .get_officers(&number)
                .await
                .with_context(|| format!("Failed to fetch officers for {}", number))?;
            if active {
                table.retain(|row| row.is_active());
            }
            print_table(&table, format)
        }
        Commands::Filings {
            number,
            category,
            start_index,
            per_page,
        } => {
            let query = FilingsQuery {
                category,
                start_index,
                items_per_page: per_page,
            };
            let table = client
                .get_filings_page(&number, &query)
                .await
                .with_context(|| format!("Failed to fetch filing history for {}", number))?;
            print_table(&table, format)?;
            if format == OutputFormat::Pretty {
                if let Some(next) = table.page.next_start_index() {
                    println!("\nMore filings available: --start-index {}", next);
                }
            }
            Ok(())
        }
        Commands::Charges { number } => {
            let table = client
                .get_charges(&number)
                .await
                .with_context(|| format!("Failed to fetch charges for {}", number))?;
            print_table(&table, format)
        }
        Commands::Document {
            number,
            transaction_id,
            out,
        } => {
            let document = client
                .get_filing_document(&number, &transaction_id)
                .await
                .with_context(|| format!("Failed to fetch document {}", transaction_id))?;

            let path = match out {
                Some(dir) if dir.is_dir() => dir.join(document.file_name()),
                Some(file) => file,
                None => PathBuf::from(document.file_name()),
            };
            document
                .save_to(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            match format {
                OutputFormat::Json => print_json(&saved_document_json(&document, &path)),
                OutputFormat::Text | OutputFormat::Pretty => {
                    println!(
                        "{} {} ({} pages) -> {}",
                        "Saved".green(),
                        document.description(),
                        document.pages(),
                        path.display()
                    );
                    Ok(())
                }
            }
        }
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{}", text);
    Ok(())
}

/// Paths are shown lossily; they need not be UTF-8
fn saved_document_json(document: &CompanyDocument, path: &Path) -> serde_json::Value {
    serde_json::json!({
        "document": document,
        "path": path.display().to_string(),
        "bytes": document.content().len(),
    })
}

fn print_table<R: TabularRow>(table: &Table<R>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&table.to_records()),
        OutputFormat::Text => {
            println!("{}", table.render_text());
            Ok(())
        }
        OutputFormat::Pretty => {
            if table.is_empty() {
                println!("{}", "No results".yellow());
                return Ok(());
            }
            let text = table.render_text();
            let mut lines = text.lines();
            if let Some(header) = lines.next() {
                println!("{}", header.bold());
            }
            for line in lines {
                println!("{}", line);
            }
            if let Some(total) = table.page.total {
                println!(
                    "\n{} of {} shown",
                    table.len().to_string().green(),
                    total
                );
            }
            Ok(())
        }
    }
}
