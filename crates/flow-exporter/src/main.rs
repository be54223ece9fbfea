//! flow-exporter: Build the USEEIO factor-flow dataset for the flow visualization.
//!
//! Loads the model workbook, computes dollar flows and embodied factor flows
//! for every key indicator, and writes one JSON document.
//!
//! Usage:
//!   cargo run -p flow-exporter
//!   cargo run -p flow-exporter -- --input data/USEEIOv2.0.1-411.xlsx --output factor_flows_data.json
//!   USEEIO_WORKBOOK=model.xlsx cargo run -p flow-exporter -- --pretty

mod export;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eio_core::FlowConfig;
use flow_map::{build_flow_document, verify_document, DEFAULT_TOLERANCE};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "flow_exporter=info,flow_map=info,useeio_workbook=info";

#[derive(Debug, Parser)]
#[command(name = "flow-exporter", version, about = "Export USEEIO dollar and factor flows as JSON")]
struct Args {
    /// USEEIO model workbook
    #[arg(long, env = "USEEIO_WORKBOOK", default_value = "data/USEEIOv2.0.1-411.xlsx")]
    input: PathBuf,

    /// Output JSON path
    #[arg(long, env = "FLOWS_OUTPUT", default_value = "factor_flows_data.json")]
    output: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Relative tolerance for the account balance check
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    balance_tolerance: f64,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_json);

    let config = FlowConfig::default();

    let tables = useeio_workbook::load_workbook(&args.input)
        .with_context(|| format!("failed to load workbook {}", args.input.display()))?;

    let report = build_flow_document(&tables, &config);

    let mut diagnostics = report.diagnostics;
    diagnostics.extend(verify_document(&report.document, args.balance_tolerance));

    tracing::info!("Saving to {}...", args.output.display());
    let bytes = export::write_document(&report.document, &args.output, args.pretty)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    export::log_summary(&report.document, &diagnostics, &args.output, bytes);
    Ok(())
}
