//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use suppinfo_core::config::{DEFAULT_INPUT_FILE, GatherConfig};
use suppinfo_core::resolver::{
    BrowserOptions, DEFAULT_DOI_BASE_URL, DEFAULT_PUBLISHER_BASE_URL, Endpoints,
};
use suppinfo_core::RangeSelection;

/// Gather supplementary-information document links for a list of DOIs.
///
/// Each DOI's landing page is rendered in a headless browser and links to
/// PDF / Word files are collected into a YAML mapping. START and END select
/// a slice of the sorted DOI list (negative values count from the end).
#[derive(Parser, Debug)]
#[command(name = "suppinfo")]
#[command(author, version, about)]
pub struct Args {
    /// First position of the sorted DOI list to process (0-based)
    #[arg(requires = "end", allow_negative_numbers = true)]
    pub start: Option<i64>,

    /// Position to stop before (exclusive)
    #[arg(requires = "start", allow_negative_numbers = true)]
    pub end: Option<i64>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Newline-delimited DOI list
    #[arg(short, long, env = "SUPPINFO_INPUT", default_value = DEFAULT_INPUT_FILE)]
    pub input: PathBuf,

    /// Directory for the YAML output
    #[arg(short, long, env = "SUPPINFO_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Chromium/Chrome executable (auto-detected when omitted)
    #[arg(long, env = "SUPPINFO_BROWSER")]
    pub browser: Option<PathBuf>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headful: bool,

    /// DOI redirect service base URL
    #[arg(long, env = "SUPPINFO_DOI_BASE_URL", default_value = DEFAULT_DOI_BASE_URL)]
    pub doi_base_url: String,

    /// Base URL of the supplementary-materials host for 10.31635 DOIs
    #[arg(long, env = "SUPPINFO_PUBLISHER_BASE_URL", default_value = DEFAULT_PUBLISHER_BASE_URL)]
    pub publisher_base_url: String,
}

impl Args {
    /// Returns the requested slice of the sorted DOI list.
    pub fn range(&self) -> RangeSelection {
        match (self.start, self.end) {
            (Some(start), Some(end)) => RangeSelection::bounded(start, end),
            _ => RangeSelection::all(),
        }
    }

    /// Builds the run configuration from the parsed flags.
    pub fn to_config(&self) -> GatherConfig {
        GatherConfig {
            input_path: self.input.clone(),
            output_dir: self.output_dir.clone(),
            endpoints: Endpoints::new(&self.doi_base_url, &self.publisher_base_url),
            browser: BrowserOptions {
                executable: self.browser.clone(),
                headless: !self.headful,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["suppinfo"]).unwrap();
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert_eq!(args.start, None);
        assert_eq!(args.end, None);
        assert!(!args.headful);
    }

    #[test]
    fn test_cli_default_range_is_all() {
        let args = Args::try_parse_from(["suppinfo"]).unwrap();
        assert_eq!(args.range(), RangeSelection::all());
        assert_eq!(args.range().partition_name(), "support_info_links");
    }

    #[test]
    fn test_cli_positional_range() {
        let args = Args::try_parse_from(["suppinfo", "100", "200"]).unwrap();
        assert_eq!(args.range(), RangeSelection::bounded(100, 200));
        assert_eq!(args.range().partition_name(), "support_info_links_100_200");
    }

    #[test]
    fn test_cli_negative_range_bounds() {
        let args = Args::try_parse_from(["suppinfo", "-5", "-1"]).unwrap();
        assert_eq!(args.range(), RangeSelection::bounded(-5, -1));
    }

    #[test]
    fn test_cli_start_without_end_is_rejected() {
        let result = Args::try_parse_from(["suppinfo", "3"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_non_integer_range_is_rejected() {
        let result = Args::try_parse_from(["suppinfo", "a", "2"]);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["suppinfo", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["suppinfo", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);

        let args = Args::try_parse_from(["suppinfo", "--verbose", "--verbose"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["suppinfo", "-q"]).unwrap();
        assert!(args.quiet);

        let args = Args::try_parse_from(["suppinfo", "--quiet"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_flags_mix_with_range() {
        let args = Args::try_parse_from(["suppinfo", "-v", "0", "2", "--headful"]).unwrap();
        assert_eq!(args.verbose, 1);
        assert_eq!(args.range(), RangeSelection::bounded(0, 2));
        assert!(args.headful);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let result = Args::try_parse_from(["suppinfo", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let result = Args::try_parse_from(["suppinfo", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let result = Args::try_parse_from(["suppinfo", "--invalid-flag"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_to_config_maps_flags() {
        let args = Args::try_parse_from([
            "suppinfo",
            "--input",
            "dois.txt",
            "--output-dir",
            "out",
            "--browser",
            "/usr/bin/chromium",
            "--headful",
            "--doi-base-url",
            "http://127.0.0.1:1",
            "--publisher-base-url",
            "http://127.0.0.1:2",
        ])
        .unwrap();

        let config = args.to_config();
        assert_eq!(config.input_path, PathBuf::from("dois.txt"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(
            config.browser.executable,
            Some(PathBuf::from("/usr/bin/chromium"))
        );
        assert!(!config.browser.headless);
        assert_eq!(config.endpoints.doi_base_url, "http://127.0.0.1:1");
        assert_eq!(config.endpoints.publisher_base_url, "http://127.0.0.1:2");
    }

    #[test]
    fn test_cli_defaults_match_library_defaults() {
        let config = Args::try_parse_from(["suppinfo"]).unwrap().to_config();
        let defaults = GatherConfig::default();
        assert_eq!(config.input_path, defaults.input_path);
        assert_eq!(config.endpoints, defaults.endpoints);
        assert!(config.browser.headless);
    }
}
