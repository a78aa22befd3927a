mod extractor;
mod fetcher;

pub use extractor::ContentExtractor;
pub use fetcher::HttpFetcher;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
}

/// Visible text of one fetched page, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: Option<String>,
    pub blocks: Vec<Block>,
}
