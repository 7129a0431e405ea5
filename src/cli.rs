//! Command-line arguments.
//!
//! ```text
//! $ yield-sniper --data-dir ~/exports --cache-ttl 600
//! $ yield-sniper --file INVESTICNI_HITPARADA_2026-10-14.xlsx
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{DEFAULT_CACHE_TTL, DEFAULT_FILE_EXTENSION, DEFAULT_FILE_PREFIX};
use crate::data::cache::DatasetSource;

#[derive(Parser, Debug)]
#[clap(about = "Yield Sniper. Browse scraped listings by rental yield and mortgage cashflow.")]
#[clap(author, version, long_about = None)]
struct CliArgs {
    /// Directory searched for the newest export.
    #[clap(long, default_value = ".")]
    data_dir: PathBuf,

    /// File-name prefix of the exports.
    #[clap(long, default_value = DEFAULT_FILE_PREFIX)]
    prefix: String,

    /// Accepted file extension; may be repeated.
    #[clap(long = "extension", default_values_t = [DEFAULT_FILE_EXTENSION.to_string()])]
    extensions: Vec<String>,

    /// Seconds a loaded export is kept before the directory is re-read.
    #[clap(long, default_value_t = DEFAULT_CACHE_TTL.as_secs(), value_parser = ttl_positive)]
    cache_ttl: u64,

    /// Open this file instead of searching `--data-dir`.
    #[clap(long)]
    file: Option<PathBuf>,
}

/// Validator for `--cache-ttl`.
fn ttl_positive(s: &str) -> Result<u64, String> {
    let secs: u64 = s.parse().map_err(|_| format!("invalid number of seconds: {s}"))?;
    if secs == 0 {
        return Err("cache TTL must be at least one second".to_string());
    }
    Ok(secs)
}

/// Startup settings derived from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub source: DatasetSource,
    pub cache_ttl: Duration,
}

impl Settings {
    fn new(args: CliArgs) -> Self {
        let source = match args.file {
            Some(path) => DatasetSource::File(path),
            None => DatasetSource::Latest {
                dir: args.data_dir,
                prefix: args.prefix,
                extensions: args
                    .extensions
                    .into_iter()
                    .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                    .collect(),
            },
        };
        Self {
            source,
            cache_ttl: Duration::from_secs(args.cache_ttl),
        }
    }
}

pub fn parse_cli_args() -> Settings {
    Settings::new(CliArgs::parse())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_search_working_directory() {
        let args = CliArgs::parse_from(["yield-sniper"]);
        let set = Settings::new(args);
        assert_eq!(set.cache_ttl, DEFAULT_CACHE_TTL);
        assert_eq!(
            set.source,
            DatasetSource::Latest {
                dir: PathBuf::from("."),
                prefix: DEFAULT_FILE_PREFIX.to_string(),
                extensions: vec!["xlsx".to_string()],
            }
        );
    }

    #[test]
    fn repeated_extensions_are_normalised() {
        let args = CliArgs::parse_from([
            "yield-sniper",
            "--extension",
            ".CSV",
            "--extension",
            "parquet",
        ]);
        let DatasetSource::Latest { extensions, .. } = Settings::new(args).source else {
            panic!("expected directory search");
        };
        assert_eq!(extensions, vec!["csv", "parquet"]);
    }

    #[test]
    fn file_flag_pins_source() {
        let args = CliArgs::parse_from(["yield-sniper", "--file", "x.xlsx", "--cache-ttl", "5"]);
        let set = Settings::new(args);
        assert_eq!(set.source, DatasetSource::File(PathBuf::from("x.xlsx")));
        assert_eq!(set.cache_ttl, Duration::from_secs(5));
    }

    #[test]
    fn ttl_validator_rejects_zero() {
        assert!(ttl_positive("0").is_err());
        assert!(ttl_positive("abc").is_err());
        assert_eq!(ttl_positive("60"), Ok(60));
    }
}
