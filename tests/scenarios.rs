use meta_description_generator::config::{OutputConfig, OutputFormat};
use meta_description_generator::source::UrlSource;
use meta_description_generator::{
    generate, run, FetchError, Fetcher, GeneratorConfig, GeneratorError, InputError,
    ProcessError, RunStatus,
};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use std::{
    fs,
    sync::atomic::{AtomicUsize, Ordering},
};

const PAGE: &str = "<html><head><title>Rock pools</title></head><body>\
    <h1>Rock pools</h1>\
    <p>Rock pools hold seawater at low tide. Crabs shelter under loose stones. \
    Limpets cling to the rock with a muscular foot. Seaweed shades the water from the sun.</p>\
    </body></html>";

#[derive(Default)]
struct SiteFetcher {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl Fetcher for SiteFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if url.ends_with("/missing") {
            Err(FetchError::Status {
                status: StatusCode::NOT_FOUND,
            })
        } else {
            Ok(PAGE.to_string())
        }
    }
}

fn output(name: &str) -> OutputConfig {
    let path = std::env::temp_dir().join(format!(
        "meta-descriptions-{}-{}.csv",
        std::process::id(),
        name
    ));
    let _ = fs::remove_file(&path);
    OutputConfig {
        path,
        format: OutputFormat::Table,
    }
}

#[tokio::test]
async fn test_single_pasted_url_has_exactly_one_outcome() {
    let urls = UrlSource::Pasted("https://example.com\n".to_string())
        .resolve()
        .unwrap();
    let fetcher = SiteFetcher::default();

    let batch = generate(urls, &fetcher, &GeneratorConfig::default()).await;

    assert_eq!(batch.outcomes().len(), 1);
    assert_eq!(batch.results_table().len(), 1);
    assert_eq!(batch.failures().count(), 0);
}

#[tokio::test]
async fn test_csv_with_one_missing_page() {
    let csv = "Address\nhttps://example.com/pools\nhttps://example.com/missing\n";
    let urls = UrlSource::Csv(csv.as_bytes().to_vec()).resolve().unwrap();
    let fetcher = SiteFetcher::default();

    let batch = generate(urls, &fetcher, &GeneratorConfig::default()).await;

    let table = batch.results_table();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0].url(), "https://example.com/pools");

    let failures: Vec<_> = batch.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "https://example.com/missing");
    assert!(matches!(
        failures[0].1,
        ProcessError::Fetch(FetchError::Status { status }) if *status == StatusCode::NOT_FOUND
    ));

    let csv = String::from_utf8(table.to_csv().unwrap()).unwrap();
    assert!(csv.starts_with("URL,Meta Description\nhttps://example.com/pools,"));
}

#[tokio::test]
async fn test_csv_without_address_column_makes_no_requests() {
    let source = UrlSource::Csv(b"URL\nhttps://example.com/pools\n".to_vec());
    let output = output("missing-column");
    let mut connected = false;
    let mut stdout = vec![];

    let res = run(
        &source,
        |_| {
            connected = true;
            Ok(SiteFetcher::default())
        },
        &GeneratorConfig::default(),
        &output,
        &mut stdout,
    )
    .await;

    assert!(matches!(
        res,
        Err(GeneratorError::Input(InputError::MissingColumn { .. }))
    ));
    assert!(!connected);
    assert!(stdout.is_empty());
    assert!(!output.path.exists());
}

#[tokio::test]
async fn test_empty_paste_writes_nothing() {
    let source = UrlSource::Pasted("\n  \n".to_string());
    let output = output("empty-paste");
    let mut connected = false;
    let mut stdout = vec![];

    let status = run(
        &source,
        |_| {
            connected = true;
            Ok(SiteFetcher::default())
        },
        &GeneratorConfig::default(),
        &output,
        &mut stdout,
    )
    .await
    .unwrap();

    assert!(matches!(status, RunStatus::NoUrls));
    assert!(!connected);
    assert!(stdout.is_empty());
    assert!(!output.path.exists());
}

#[tokio::test]
async fn test_run_without_results_writes_no_csv() {
    let source = UrlSource::Pasted("https://example.com/missing\n".to_string());
    let output = output("no-results");
    let mut stdout = vec![];

    let status = run(
        &source,
        |_| Ok(SiteFetcher::default()),
        &GeneratorConfig::default(),
        &output,
        &mut stdout,
    )
    .await
    .unwrap();

    match status {
        RunStatus::NoResults(batch) => assert_eq!(batch.failures().count(), 1),
        other => panic!("unexpected status {:?}", other),
    }
    assert!(stdout.is_empty());
    assert!(!output.path.exists());
}

#[tokio::test]
async fn test_run_prints_table_and_saves_csv() {
    let source = UrlSource::Csv(
        b"Address\nhttps://example.com/pools\nhttps://example.com/missing\n".to_vec(),
    );
    let output = output("saved");
    let mut stdout = vec![];

    let status = run(
        &source,
        |_| Ok(SiteFetcher::default()),
        &GeneratorConfig::default(),
        &output,
        &mut stdout,
    )
    .await
    .unwrap();

    let batch = match status {
        RunStatus::Saved(batch) => batch,
        other => panic!("unexpected status {:?}", other),
    };
    let table = batch.results_table();
    assert_eq!(String::from_utf8(stdout).unwrap(), table.to_string());

    let csv = fs::read(&output.path).unwrap();
    fs::remove_file(&output.path).unwrap();
    assert_eq!(csv, table.to_csv().unwrap());
}

#[tokio::test]
async fn test_description_is_three_sentences_in_page_order() {
    let fetcher = SiteFetcher::default();

    let batch = generate(
        vec!["https://example.com/pools".to_string()],
        &fetcher,
        &GeneratorConfig::default(),
    )
    .await;

    let table = batch.results_table();
    let description = table.rows()[0].meta_description();
    let sentences = [
        "Rock pools hold seawater at low tide.",
        "Crabs shelter under loose stones.",
        "Limpets cling to the rock with a muscular foot.",
        "Seaweed shades the water from the sun.",
    ];
    let used: Vec<usize> = sentences
        .iter()
        .enumerate()
        .filter(|(_, s)| description.contains(*s))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(used.len(), 3);
    let expected: Vec<&str> = used.iter().map(|&i| sentences[i]).collect();
    assert_eq!(description, expected.join(" "));
}
