use anyhow::{anyhow, Context};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::env;

use shift_reports::{
    application::{dto::ReportFilters, reports::build_report_query},
    infrastructure::persistence::PostgresReportExecutor,
    ports::ReportExecutor,
    value_objects::ReportKind,
};

/// Render (and optionally run) a report query
#[derive(Parser)]
struct Cli {
    /// Report slug, e.g. work-hours
    report: String,

    /// Filter as name=value; repeat for multiple values
    #[arg(short, long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Execute against the database and print the rows
    #[arg(long)]
    execute: bool,

    #[arg(long)]
    database_url: Option<String>,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let kind: ReportKind = cli.report.parse().map_err(|e: String| anyhow!(e))?;
    let filters: ReportFilters = cli.filters.into_iter().collect();
    let query = build_report_query(kind, &filters)?;

    println!("{}", query.sql());
    println!("-- params: {}", serde_json::to_string(query.params().as_slice())?);

    if !cli.execute {
        return Ok(());
    }

    let db_url = cli
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .context("DATABASE_URL must be set or passed with --database-url")?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&db_url)
        .await?;

    let rows = PostgresReportExecutor::new(pool).fetch(kind, &query).await?;
    println!("{}", serde_json::to_string_pretty(&rows)?);

    Ok(())
}
