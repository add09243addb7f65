use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use suppinfo_core::convert::{
    DEFAULT_CONVERTER_BINARY, DEFAULT_DOWNLOADS_DIR, LibreOfficeConverter, convert_all,
    discover_documents,
};
use tracing::{debug, info};

/// Convert downloaded Word documents to PDF next to their sources.
#[derive(Parser, Debug)]
#[command(name = "convert-to-pdf")]
#[command(
    author,
    version,
    about = "Convert downloaded Word documents (<dir>/*/*.doc*) to PDF"
)]
struct Args {
    /// Downloads root; documents are looked up one directory level below it
    #[arg(short, long, default_value = DEFAULT_DOWNLOADS_DIR)]
    downloads_dir: PathBuf,

    /// Converter executable
    #[arg(long, default_value = DEFAULT_CONVERTER_BINARY)]
    converter: String,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

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

    let documents = discover_documents(&args.downloads_dir).with_context(|| {
        format!(
            "Failed to scan downloads directory: {}",
            args.downloads_dir.display()
        )
    })?;
    info!(count = documents.len(), "Found documents to convert");

    let converter = LibreOfficeConverter::new(args.converter);
    let summary = convert_all(&converter, &documents)?;

    info!(
        scanned = documents.len(),
        converted = summary.converted,
        rejected = summary.rejected,
        "Done"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["convert-to-pdf"]).unwrap();
        assert_eq!(args.downloads_dir, PathBuf::from("../downloads"));
        assert_eq!(args.converter, "libreoffice");
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::try_parse_from([
            "convert-to-pdf",
            "--downloads-dir",
            "/tmp/dl",
            "--converter",
            "soffice",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.downloads_dir, PathBuf::from("/tmp/dl"));
        assert_eq!(args.converter, "soffice");
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_args_reject_positional() {
        assert!(Args::try_parse_from(["convert-to-pdf", "extra"]).is_err());
    }
}
