//! Command line options and the settings derived from them.

use crate::{error::InputError, source::UrlSource};
use clap::{Parser, ValueEnum};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tokio::io::AsyncReadExt;

pub const DEFAULT_OUTPUT: &str = "meta_descriptions.csv";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub timeout: Duration,
    /// Pages fetched at the same time. Outcomes keep input order regardless.
    pub concurrency: usize,
    pub user_agent: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: 1,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
}

/// Generate meta descriptions for a list of web pages.
///
/// URLs are read from `--urls` (one per line), from the `Address` column of
/// `--csv`, or from stdin when neither is given.
#[derive(Parser, Debug, Clone)]
#[command(name = "meta-description-generator", version)]
pub struct Cli {
    /// File with one URL per line, `-` for stdin
    #[arg(long, value_name = "FILE", conflicts_with = "csv")]
    pub urls: Option<PathBuf>,

    /// CSV file with an `Address` column
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Where the results CSV is written
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// How results are printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Seconds before a single page fetch is abandoned
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Maximum pages fetched at once
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Cli {
    pub fn build_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            timeout: Duration::from_secs(self.timeout),
            concurrency: usize::from(self.concurrency),
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            path: self.output.clone(),
            format: self.format,
        }
    }

    /// Reads the selected input into a [`UrlSource`].
    pub async fn read_source(&self) -> Result<UrlSource, InputError> {
        if let Some(path) = &self.csv {
            return Ok(UrlSource::Csv(tokio::fs::read(path).await?));
        }

        let text = match &self.urls {
            Some(path) if path.as_path() != Path::new("-") => {
                tokio::fs::read_to_string(path).await?
            }
            _ => {
                let mut text = String::new();
                tokio::io::stdin().read_to_string(&mut text).await?;
                text
            }
        };
        Ok(UrlSource::Pasted(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["meta-description-generator"]);
        assert_eq!(cli.build_config(), GeneratorConfig::default());
        assert_eq!(
            cli.output_config(),
            OutputConfig {
                path: PathBuf::from("meta_descriptions.csv"),
                format: OutputFormat::Table,
            }
        );
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "meta-description-generator",
            "--csv",
            "crawl.csv",
            "--output",
            "out.csv",
            "--format",
            "json",
            "--timeout",
            "5",
            "--concurrency",
            "4",
        ]);
        assert_eq!(cli.csv, Some(PathBuf::from("crawl.csv")));
        let config = cli.build_config();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.concurrency, 4);
        assert_eq!(cli.output_config().format, OutputFormat::Json);
    }

    #[test]
    fn test_urls_and_csv_conflict() {
        let res = Cli::try_parse_from([
            "meta-description-generator",
            "--urls",
            "a.txt",
            "--csv",
            "b.csv",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let res = Cli::try_parse_from(["meta-description-generator", "--concurrency", "0"]);
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn test_read_pasted_file() {
        let cli = Cli::parse_from(["meta-description-generator", "--urls", "tests/urls.txt"]);
        let source = cli.read_source().await.unwrap();
        assert_eq!(
            source.resolve().unwrap(),
            vec![
                "https://example.com".to_string(),
                "https://example.org/about".to_string(),
            ]
        );
    }
}
