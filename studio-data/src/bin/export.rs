use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use studio_data::InquiryExporter;
use studio_db_sqlite::SqliteRepository;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Inquiries,
    PhoneLeads,
}

/// Export collected contact inquiries or phone leads as CSV.
#[derive(Parser, Debug)]
#[command(name = "studio-export")]
#[command(version, about, long_about = None)]
struct Args {
    /// SQLite database path or URL
    #[arg(short, long, default_value = "studio.db")]
    database: String,

    /// What to export
    #[arg(short, long, value_enum, default_value_t = Kind::Inquiries)]
    kind: Kind,

    /// Only export records at or after this RFC 3339 timestamp
    #[arg(short, long)]
    since: Option<DateTime<Utc>>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let repo = SqliteRepository::connect(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;
    repo.run_migrations()
        .await
        .context("Failed to run migrations")?;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let written = match args.kind {
        Kind::Inquiries => InquiryExporter::export_inquiries(&repo, args.since, writer).await,
        Kind::PhoneLeads => InquiryExporter::export_phone_leads(&repo, args.since, writer).await,
    }
    .context("Failed to export records")?;

    eprintln!("Exported {written} {:?} record(s).", args.kind);

    Ok(())
}
