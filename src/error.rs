use reqwest::StatusCode;

/// Invalid input, reported once before the batch starts.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("The uploaded CSV file must contain a column named '{column}'.")]
    MissingColumn { column: String },
    #[error("Invalid CSV file: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not read input: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP status {status}")]
    Status { status: StatusCode },
    #[error("Invalid URL '{url}'")]
    InvalidUrl { url: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("No text content found in page")]
    Empty,
    #[error("No sentences could be extracted from page")]
    NoSentences,
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizationError {
    #[error("Sentence {sentence} has a non-finite score")]
    NonFiniteScore { sentence: usize },
    #[error("Matrix has {columns} columns but document has {sentences} sentences")]
    Shape { columns: usize, sentences: usize },
    #[error("Summarization task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Failure while processing a single URL. Never aborts the batch.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Summarization(#[from] SummarizationError),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not write results: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("Could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
