//! mediamount: store an attachment on the media API and record it on its owner.
//!
//! Set MEDIAMOUNT_API_KEY and MEDIAMOUNT_API_URL (or API_URL), plus DATABASE_URL
//! unless running with `--dry-run`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use mediamount_api_client::{ApiClient, Auth};
use mediamount_cli::{failure_exit_code, init_tracing, load_uploader_config, SourceArg};
use mediamount_core::models::{OwningRecord, RecordId};
use mediamount_core::{MountConfig, MountResult};
use mediamount_db::MemoryFieldWriter;
use mediamount_storage::{create_dry_run_storage, create_storage, StorageAdapter};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "mediamount", about = "Store attachments through the media API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file and write the reference onto the owning record
    Store {
        /// Uploader configuration (JSON)
        #[arg(long)]
        config: PathBuf,
        /// Primary key of the owning record
        #[arg(long)]
        record_id: String,
        /// Local file to upload
        #[arg(long)]
        file: Option<PathBuf>,
        /// Remote URI for the media API to fetch
        #[arg(long)]
        url: Option<String>,
        /// Version of a file already uploaded by a client
        #[arg(long)]
        preloaded_version: Option<String>,
        /// The file is already stored remotely; nothing to do
        #[arg(long)]
        already_stored: bool,
        /// Record writes in memory and print them instead of updating the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the upload request an uploader configuration produces
    Request {
        /// Uploader configuration (JSON)
        #[arg(long)]
        config: PathBuf,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{}", s);
    Ok(())
}

async fn run_store(
    adapter: &StorageAdapter,
    source: SourceArg,
    record_id: &str,
) -> MountResult<OwningRecord> {
    let mut source = source.into_source();
    let mut record = OwningRecord::new(RecordId::parse(record_id));
    adapter.store(&mut source, &mut record).await?;
    Ok(record)
}

async fn run(command: Commands, mount_config: Option<MountConfig>) -> anyhow::Result<()> {
    match command {
        Commands::Store {
            config,
            record_id,
            file,
            url,
            preloaded_version,
            already_stored,
            dry_run,
        } => {
            let mount_config = mount_config.context("Process configuration not loaded")?;
            let source = SourceArg::from_flags(file, url, preloaded_version, already_stored)?;
            let uploader_config = load_uploader_config(&config)?;

            if dry_run {
                let client = ApiClient::from_config(&mount_config)
                    .context("Failed to create API client")?;
                let writer = MemoryFieldWriter::new();
                let adapter =
                    create_dry_run_storage(uploader_config, Arc::new(client), writer.clone())
                        .context("Failed to create storage adapter")?;

                let record = run_store(&adapter, source, &record_id).await?;
                let writes: Vec<_> = writer
                    .writes()
                    .into_iter()
                    .map(|w| {
                        serde_json::json!({
                            "table": w.target.table,
                            "field": w.field,
                            "value": w.value,
                        })
                    })
                    .collect();
                print_json(&serde_json::json!({ "record": record, "writes": writes }))?;
            } else {
                let adapter = create_storage(&mount_config, uploader_config)
                    .await
                    .context("Failed to create storage adapter")?;

                let record = run_store(&adapter, source, &record_id).await?;
                if let Some(result) = adapter.last_result() {
                    tracing::info!(version = ?result.version, public_id = ?result.public_id, "Stored");
                }
                print_json(&record)?;
            }
        }
        Commands::Request { config } => {
            let uploader_config = load_uploader_config(&config)?;
            // Requests are never sent, so the client only needs a syntactically valid URL.
            let client = ApiClient::new("http://localhost".to_string(), Auth::XApiKey(String::new()))?;
            let adapter =
                create_dry_run_storage(uploader_config, Arc::new(client), MemoryFieldWriter::new())?;
            print_json(&adapter.build_request()?)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Only storing talks to the API and the database.
    let mount_config = match cli.command {
        Commands::Store { .. } => match MountConfig::from_env() {
            Ok(config) => Some(config),
            Err(err) => {
                eprintln!("Error: {:#}", err);
                return ExitCode::FAILURE;
            }
        },
        Commands::Request { .. } => None,
    };
    init_tracing(
        mount_config
            .as_ref()
            .is_some_and(|config| config.log_json || config.is_production()),
    );

    match run(cli.command, mount_config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(failure_exit_code(&err)),
    }
}
