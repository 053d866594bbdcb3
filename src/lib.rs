pub mod cli;
pub mod commodity;
pub mod fields;
pub mod format;
pub mod identity;
pub mod income;
pub mod layout;
pub mod record;
pub mod sections;
pub mod store;
pub mod table;
pub mod value;
pub mod view;

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{LevelFilter, debug, info};
use serde::Serialize;

use crate::{
    cli::{Cli, ClustersArgs, Commands, ListArgs, OutputFormat, SequencesArgs, ShowArgs},
    store::{RecordKey, SqliteStore, SurveyStore},
    table::Emphasis,
    view::RecordView,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("susenas_viewer", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let store = open_store(&cli.db)?;
    match cli.command {
        Commands::Districts(args) => handle_districts(&store, &args),
        Commands::Clusters(args) => handle_clusters(&store, &args),
        Commands::Sequences(args) => handle_sequences(&store, &args),
        Commands::Show(args) => handle_show(&store, &args),
    }
}

fn open_store(path: &Path) -> Result<SqliteStore> {
    SqliteStore::open(path).with_context(|| format!("Opening survey database {path:?}"))
}

fn handle_districts(store: &dyn SurveyStore, args: &ListArgs) -> Result<()> {
    let districts = store.districts().context("Listing districts")?;
    info!("Found {} district(s)", districts.len());
    match args.format {
        OutputFormat::Json => print_json(&districts),
        OutputFormat::Text => {
            for district in &districts {
                println!("{}", district.label());
            }
            Ok(())
        }
    }
}

fn handle_clusters(store: &dyn SurveyStore, args: &ClustersArgs) -> Result<()> {
    let clusters = store
        .clusters(&args.district)
        .with_context(|| format!("Listing clusters of district {}", args.district))?;
    info!(
        "Found {} cluster(s) in district {}",
        clusters.len(),
        args.district
    );
    print_list(&clusters, args.format)
}

fn handle_sequences(store: &dyn SurveyStore, args: &SequencesArgs) -> Result<()> {
    let sequences = store.sequences(&args.district, &args.cluster).with_context(|| {
        format!(
            "Listing households of district {} cluster {}",
            args.district, args.cluster
        )
    })?;
    info!(
        "Found {} household(s) in district {} cluster {}",
        sequences.len(),
        args.district,
        args.cluster
    );
    print_list(&sequences, args.format)
}

/// Loads everything the record view needs. A missing household is an error
/// here; an existing household with only null fields renders as dashes.
pub fn load_view(store: &dyn SurveyStore, key: &RecordKey) -> Result<RecordView> {
    let record = store
        .record(key)
        .with_context(|| format!("Loading record {key}"))?
        .ok_or_else(|| anyhow!("No record found for {key}"))?;
    debug!("Record {key} has {} field(s)", record.len());
    let commodities = store
        .commodity_lines(key)
        .with_context(|| format!("Loading commodity lines for {key}"))?;
    let job_lines = store
        .job_income_lines(key)
        .with_context(|| format!("Loading job income lines for {key}"))?;
    let business_lines = store
        .business_income_lines(key)
        .with_context(|| format!("Loading business income lines for {key}"))?;
    Ok(RecordView::build(
        &record,
        &commodities,
        &job_lines,
        &business_lines,
    ))
}

fn handle_show(store: &dyn SurveyStore, args: &ShowArgs) -> Result<()> {
    let key = RecordKey::new(&args.district, &args.cluster, &args.sequence);
    info!("Rendering record {key}");
    let mut view = load_view(store, &key)?;
    let sections = args
        .sections
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_ascii_uppercase())
        .collect::<Vec<_>>();
    if !sections.is_empty() {
        debug!("Restricting section tables to {sections:?}");
        view.retain_sections(&sections);
    }
    match args.format {
        OutputFormat::Json => print_json(&view)?,
        OutputFormat::Text => {
            let emphasis = if args.color {
                Emphasis::Ansi
            } else {
                Emphasis::Marker
            };
            table::print_record(&view, emphasis);
        }
    }
    info!(
        "Rendered {} table(s) for {key}",
        view.tables().iter().filter(|t| !t.rows.is_empty()).count()
    );
    Ok(())
}

fn print_list(values: &[String], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&values),
        OutputFormat::Text => {
            for value in values {
                println!("{value}");
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Serializing output as JSON")?;
    println!("{rendered}");
    Ok(())
}
