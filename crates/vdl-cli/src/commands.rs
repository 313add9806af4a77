use colored::Colorize;

use vdl_hash::DocumentHasher;
use vdl_server::{NotaryServer, ServerConfig};
use vdl_store::{FileRecordStore, RecordStore};
use vdl_types::ParticipantName;

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Hash(args) => cmd_hash(args),
        Command::History(args) => cmd_history(args),
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    NotaryServer::new(config).serve().await?;
    Ok(())
}

fn cmd_hash(args: HashArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.file)?;
    let digest = DocumentHasher::default().digest(&bytes)?;
    println!("{}  {}", digest.to_hex().cyan(), args.file.display());
    Ok(())
}

fn cmd_history(args: HistoryArgs) -> anyhow::Result<()> {
    let name = ParticipantName::parse(&args.name)?;
    let store = FileRecordStore::open(&args.log)?;
    let records = store.history_for(&name)?;
    if records.is_empty() {
        println!("No records for {}.", name.to_string().yellow());
        return Ok(());
    }
    println!(
        "{} record(s) for {}",
        records.len().to_string().bold(),
        name.to_string().yellow().bold()
    );
    for record in records {
        println!(
            "  {}  {}  {}",
            record.timestamp.to_rfc3339().dimmed(),
            record.document_hash.short_hex().cyan(),
            record.tx_ref.to_hex().blue()
        );
    }
    Ok(())
}
