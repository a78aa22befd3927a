use super::tokenizer::{split_sentences, split_words};
use crate::page::{Block, Page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    text: String,
    words: Vec<String>,
    is_heading: bool,
}

impl Sentence {
    pub fn new(text: &str, is_heading: bool) -> Sentence {
        Sentence {
            text: text.to_string(),
            words: split_words(text),
            is_heading,
        }
    }

    /// Verbatim surface text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

/// Sentences of a page in document order. Headings are kept as single
/// sentences; they feed the vocabulary but are never selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sentences: Vec<Sentence>,
}

impl Document {
    pub fn new(sentences: Vec<Sentence>) -> Document {
        Document { sentences }
    }

    /// Builds a document from plain paragraphs.
    pub fn from_text<S: AsRef<str>>(paragraphs: &[S]) -> Document {
        let sentences = paragraphs
            .iter()
            .flat_map(|p| split_sentences(p.as_ref()))
            .map(|s| Sentence::new(&s, false))
            .collect();
        Document { sentences }
    }

    pub fn from_page(page: &Page) -> Document {
        let mut sentences = vec![];
        for block in &page.blocks {
            match block {
                Block::Heading(text) => sentences.push(Sentence::new(text, true)),
                Block::Paragraph(text) => sentences.extend(
                    split_sentences(text)
                        .iter()
                        .map(|s| Sentence::new(s, false)),
                ),
            }
        }
        Document { sentences }
    }

    /// Sentences eligible for the summary.
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.sentences.iter().filter(|s| !s.is_heading)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.sentences
            .iter()
            .flat_map(|s| s.words.iter().map(String::as_str))
    }
}
