//! CLI entry point for the supplementary-information link gatherer.

use anyhow::{Context, Result};
use clap::Parser;
use suppinfo_core::gather::{partition_name, select_range};
use suppinfo_core::{
    ChromeRenderer, IdentifierResolver, LinkGatherer, ResultMapping, read_identifier_file,
    write_link_mapping,
};
use tracing::{debug, info, warn};

mod cli;
mod progress;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let config = args.to_config();
    config.validate()?;

    let ids = read_identifier_file(&config.input_path)?;
    let total = ids.len();
    let range = args.range();
    let selected = select_range(ids, range);
    let partition = partition_name(&range);
    info!(
        total,
        selected = selected.len(),
        partition = %partition,
        "Identifiers selected"
    );

    let mapping = if selected.is_empty() {
        info!("Nothing to gather");
        ResultMapping::new()
    } else {
        let renderer = ChromeRenderer::launch(&config.browser)
            .await
            .context("Failed to start the browser")?;
        let resolver = IdentifierResolver::with_endpoints(Box::new(renderer), config.endpoints);
        let gatherer =
            LinkGatherer::new(resolver).with_progress(progress::gather_progress_bar(args.quiet));

        let report = gatherer.gather(&selected).await;

        if let Err(error) = gatherer.resolver().shutdown().await {
            warn!(error = %error, "Browser shutdown failed");
        }
        report.mapping
    };

    let path = write_link_mapping(&mapping, &config.output_dir, &partition)?;
    info!(path = %path.display(), entries = mapping.len(), "Done");

    Ok(())
}
