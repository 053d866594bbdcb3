use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub const DEFAULT_DB_PATH: &str = "susenas.db";

#[derive(Debug, Parser)]
#[command(author, version, about = "Inspect Susenas household-survey records", long_about = None)]
pub struct Cli {
    /// SQLite survey database to read
    #[arg(long, global = true, env = "SUSENAS_DB", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List districts (Kab) with their province
    Districts(ListArgs),
    /// List cluster codes (NKS) within a district
    Clusters(ClustersArgs),
    /// List household sequence numbers (Nurt) within a cluster
    Sequences(SequencesArgs),
    /// Render one household record as section tables
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ClustersArgs {
    /// District code
    #[arg(short = 'k', long = "kab")]
    pub district: String,
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct SequencesArgs {
    /// District code
    #[arg(short = 'k', long = "kab")]
    pub district: String,
    /// Cluster code
    #[arg(short = 'n', long = "nks")]
    pub cluster: String,
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// District code
    #[arg(short = 'k', long = "kab")]
    pub district: String,
    /// Cluster code
    #[arg(short = 'n', long = "nks")]
    pub cluster: String,
    /// Household sequence number within the cluster
    #[arg(short = 'u', long = "nurt")]
    pub sequence: String,
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
    /// Restrict section tables to these section ids (e.g. `B432,B6`)
    #[arg(short = 's', long = "section", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub sections: Vec<String>,
    /// Mark total rows with ANSI bold instead of a leading `*`
    #[arg(long)]
    pub color: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
