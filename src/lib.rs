use futures::{stream, StreamExt};
use scraper::Html;
use std::{io::Write, sync::Arc};
use tracing::{debug, error, info, warn};

pub mod config;
pub mod error;
pub mod formatter;
pub mod page;
pub mod report;
pub mod source;
pub mod summarizer;

pub use config::GeneratorConfig;
pub use error::{
    ExportError, FetchError, GeneratorError, InputError, ParseError, ProcessError,
    SummarizationError,
};
pub use report::{ResultsTable, SummaryResult};

use config::{OutputConfig, OutputFormat};
use page::{ContentExtractor, Page};
use source::UrlSource;
use summarizer::{Document, LsaSummarizer};

#[async_trait::async_trait]
pub trait Fetcher {
    /// Body of the page at `url`. Non-success statuses are errors.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub trait Extractor {
    fn extract(&self, doc: &Html) -> Result<Page, ParseError>;
}

/// What happened to one input URL.
#[derive(Debug)]
pub struct UrlOutcome {
    pub url: String,
    pub result: Result<SummaryResult, ProcessError>,
}

/// Outcomes of one run, in input order.
#[derive(Debug, Default)]
pub struct Batch {
    outcomes: Vec<UrlOutcome>,
}

impl Batch {
    pub fn outcomes(&self) -> &[UrlOutcome] {
        &self.outcomes
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &ProcessError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.url.as_str(), e)))
    }

    pub fn results_table(&self) -> ResultsTable {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().cloned())
            .collect()
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunStatus {
    /// The input held no URLs. Nothing was fetched.
    NoUrls,
    /// Every URL failed. Nothing was printed or saved.
    NoResults(Batch),
    /// Results were printed and written to the output CSV.
    Saved(Batch),
}

/// One full invocation: resolve the input, build the fetcher with `connect`,
/// run the batch, print the table to `out` and save the CSV.
///
/// Input errors return before `connect` is called.
pub async fn run<F, C, W>(
    source: &UrlSource,
    connect: C,
    config: &GeneratorConfig,
    output: &OutputConfig,
    out: &mut W,
) -> Result<RunStatus, GeneratorError>
where
    F: Fetcher + Sync,
    C: FnOnce(&GeneratorConfig) -> Result<F, GeneratorError>,
    W: Write,
{
    let urls = source.resolve()?;
    if urls.is_empty() {
        warn!("Please provide URLs to extract meta descriptions.");
        return Ok(RunStatus::NoUrls);
    }

    let fetcher = connect(config)?;
    let batch = generate(urls, &fetcher, config).await;

    let failed = batch.failures().count();
    if failed > 0 {
        warn!("{} of {} URLs could not be summarized", failed, batch.outcomes().len());
    }

    let table = batch.results_table();
    if table.is_empty() {
        warn!("No meta descriptions were extracted.");
        return Ok(RunStatus::NoResults(batch));
    }

    info!("Meta descriptions extracted successfully!");
    match output.format {
        OutputFormat::Table => write!(out, "{}", table),
        OutputFormat::Json => writeln!(out, "{}", table.to_json()?),
    }
    .map_err(ExportError::Io)?;

    table.write_csv(&output.path).await?;
    info!("Saved {} rows to {}", table.len(), output.path.display());

    Ok(RunStatus::Saved(batch))
}

/// Fetches and summarizes every URL. A failing URL is logged and recorded
/// in its outcome; the rest of the batch carries on.
pub async fn generate<F>(urls: Vec<String>, fetcher: &F, config: &GeneratorConfig) -> Batch
where
    F: Fetcher + Sync + ?Sized,
{
    let extractor = &ContentExtractor;
    let summarizer = Arc::new(LsaSummarizer::english());
    let total = urls.len();

    info!("Generating meta descriptions for {} URLs", total);

    let outcomes = stream::iter(urls.into_iter().enumerate())
        .map(|(i, url)| {
            let summarizer = Arc::clone(&summarizer);
            async move {
                let result = handle(&url, fetcher, extractor, summarizer).await;
                match &result {
                    Ok(_) => info!("[{}/{}] Summarized {}", i + 1, total, url),
                    Err(e) => error!("Error processing {}: {}", url, e),
                }
                UrlOutcome { url, result }
            }
        })
        .buffered(config.concurrency.max(1))
        .collect()
        .await;

    Batch { outcomes }
}

async fn handle<F, E>(
    url: &str,
    fetcher: &F,
    extractor: &E,
    summarizer: Arc<LsaSummarizer>,
) -> Result<SummaryResult, ProcessError>
where
    F: Fetcher + Sync + ?Sized,
    E: Extractor,
{
    debug!("Visit {}", url);
    let html = fetcher.fetch(url).await?;

    let page = {
        let doc = Html::parse_document(&html);
        extractor.extract(&doc)?
    };

    let document = Document::from_page(&page);
    let description = tokio::task::spawn_blocking(move || {
        summarizer
            .summarize(&document)
            .map(|sentences| formatter::format_description(&sentences))
    })
    .await
    .map_err(SummarizationError::from)??;
    if description.is_empty() {
        return Err(ParseError::NoSentences.into());
    }

    Ok(SummaryResult::new(url, description))
}
