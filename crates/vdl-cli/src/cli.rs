use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vdl",
    about = "VeriDoc Ledger — blockchain document notarization",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the notarization server
    Serve(ServeArgs),
    /// Print the digest a document would be recorded under
    Hash(HashArgs),
    /// List a participant's notarized records
    History(HistoryArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Override the configured bind address
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct HashArgs {
    /// Document to hash
    pub file: PathBuf,
}

#[derive(Args)]
pub struct HistoryArgs {
    /// Participant name as recorded
    pub name: String,
    /// Record log to read
    #[arg(long, default_value = "vdl-records.log")]
    pub log: PathBuf,
}
