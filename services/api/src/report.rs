use crate::infra::filter_from_parts;
use clap::Args;
use std::path::PathBuf;
use workbank::analysis::{
    apply_filter, prepare_analysis, sort_rows, summary_statistics, viability_quadrants,
    write_csv, SortKey, SortOrder, DEFAULT_QUADRANT_THRESHOLD,
};
use workbank::config::AppConfig;
use workbank::dataset::{DatasetLoader, LoadedTables, SourceProvenance};
use workbank::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Desire/capability threshold for the viability quadrants (1-5 scale)
    #[arg(long, default_value_t = DEFAULT_QUADRANT_THRESHOLD)]
    pub(crate) threshold: f64,
    /// Number of tasks to list in the desire ranking
    #[arg(long, default_value_t = 5)]
    pub(crate) top: usize,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Destination file (stdout when omitted)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Restrict the export to these domains (comma separated)
    #[arg(long)]
    pub(crate) domain: Option<String>,
    /// Restrict the export to these occupations (comma separated)
    #[arg(long)]
    pub(crate) occupation: Option<String>,
    /// Keep only tasks with at least this mean automation desire
    #[arg(long)]
    pub(crate) min_desire: Option<f64>,
    /// Keep only tasks with at most this mean automation desire
    #[arg(long)]
    pub(crate) max_desire: Option<f64>,
}

async fn load_tables() -> Result<LoadedTables, AppError> {
    let config = AppConfig::load()?;
    let loader = DatasetLoader::from_config(&config.dataset)?;
    Ok(loader.load_raw_tables().await)
}

pub(crate) async fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let loaded = load_tables().await?;
    let combined = prepare_analysis(&loaded.tables);
    let stats = summary_statistics(&combined);
    let quadrants = viability_quadrants(&combined, args.threshold);

    println!("WORKBank analysis overview");
    match &loaded.provenance {
        SourceProvenance::Remote => println!("Data source: remote dataset"),
        SourceProvenance::Fallback { reason } => {
            println!("Data source: built-in sample tables ({reason})")
        }
    }
    println!("Loaded at: {}", loaded.loaded_at.format("%Y-%m-%d %H:%M:%S UTC"));

    println!("\nHeadline metrics");
    println!("- Tasks analyzed: {}", stats.total_tasks);
    println!("- Workers surveyed: {}", stats.total_workers);
    println!(
        "- Avg automation desire: {}",
        format_rating(stats.avg_automation_desire)
    );
    println!(
        "- Avg AI capability: {}",
        format_rating(stats.avg_expert_capability)
    );
    println!(
        "- Avg automation readiness: {}",
        format_rating(stats.avg_automation_readiness)
    );
    println!(
        "- Occupations: {} | Domains: {}",
        stats.unique_occupations, stats.unique_domains
    );

    println!("\nViability quadrants (threshold {:.1})", args.threshold);
    println!("- Automation ready (high desire, high capability): {}", quadrants.automation_ready);
    println!("- Automation wanted (high desire, low capability): {}", quadrants.automation_wanted);

    let mut ranked = combined;
    sort_rows(&mut ranked, SortKey::AutomationDesire, SortOrder::Descending);
    ranked.truncate(args.top);

    println!("\nTop tasks by automation desire");
    for row in &ranked {
        println!(
            "- {} | {} | desire {:.1} | capability {} | {}",
            row.task_id,
            row.occupation,
            row.automation_desire,
            format_rating(row.expert_capability),
            row.task
        );
    }

    Ok(())
}

pub(crate) async fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let loaded = load_tables().await?;
    let combined = prepare_analysis(&loaded.tables);

    let filter = filter_from_parts(
        args.domain.as_deref(),
        args.occupation.as_deref(),
        args.min_desire,
        args.max_desire,
    );
    let rows = apply_filter(&combined, &filter);

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            write_csv(&rows, file)?;
            println!("Exported {} tasks to {}", rows.len(), path.display());
        }
        None => {
            write_csv(&rows, std::io::stdout().lock())?;
        }
    }

    Ok(())
}

fn format_rating(value: Option<f64>) -> String {
    match value {
        Some(rating) => format!("{rating:.1}/5.0"),
        None => "n/a".to_string(),
    }
}
