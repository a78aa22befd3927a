use crate::{
    error::ParseError,
    page::{Block, Page},
    Extractor,
};
use lazy_regex::regex;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

const E: &str = "Invalid selector";
lazy_static! {
    static ref TITLE: Selector = Selector::parse("head > title").expect(E);
    static ref BODY: Selector = Selector::parse("body").expect(E);
    static ref BLOCKS: Selector = Selector::parse(
        "body p, body li, body blockquote, body pre, body td, body dd, body figcaption, \
         body h1, body h2, body h3, body h4, body h5, body h6"
    )
    .expect(E);
}

const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];
const CONTENT: [&str; 7] = ["p", "li", "blockquote", "pre", "td", "dd", "figcaption"];
const SKIPPED: [&str; 13] = [
    "script", "style", "noscript", "template", "nav", "header", "footer", "aside", "form", "svg",
    "iframe", "button", "select",
];

fn is_block(name: &str) -> bool {
    CONTENT.contains(&name) || HEADINGS.contains(&name)
}

/// Pulls visible paragraphs and headings out of a page, skipping navigation,
/// scripts and other chrome.
#[derive(Debug, Default)]
pub struct ContentExtractor;

impl Extractor for ContentExtractor {
    fn extract(&self, doc: &Html) -> Result<Page, ParseError> {
        let title = doc
            .select(&TITLE)
            .next()
            .map(visible_text)
            .filter(|title| !title.is_empty());

        let mut has_h1 = false;
        let mut blocks = vec![];
        for el in doc.select(&BLOCKS) {
            let nested = el
                .ancestors()
                .filter_map(|node| node.value().as_element())
                .any(|parent| SKIPPED.contains(&parent.name()) || is_block(parent.name()));
            if nested {
                continue;
            }

            let text = visible_text(el);
            if text.is_empty() {
                continue;
            }

            let name = el.value().name();
            let block = if HEADINGS.contains(&name) {
                has_h1 |= name == "h1";
                Block::Heading(text)
            } else {
                Block::Paragraph(text)
            };
            if blocks.last() != Some(&block) {
                blocks.push(block);
            }
        }

        if blocks.is_empty() {
            if let Some(body) = doc.select(&BODY).next() {
                let text = visible_text(body);
                if !text.is_empty() {
                    blocks.push(Block::Paragraph(text));
                }
            }
        }

        if blocks.is_empty() {
            return Err(ParseError::Empty);
        }

        if !has_h1 {
            if let Some(title) = &title {
                blocks.insert(0, Block::Heading(title.clone()));
            }
        }

        Ok(Page { title, blocks })
    }
}

fn visible_text(el: ElementRef) -> String {
    let mut raw = String::new();
    push_text(el, &mut raw);
    regex!(r"\s+").replace_all(&raw, " ").trim().to_string()
}

fn push_text(el: ElementRef, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if SKIPPED.contains(&name) {
                continue;
            }
            let spaced = name == "br" || is_block(name);
            if spaced {
                out.push(' ');
            }
            push_text(child, out);
            if spaced {
                out.push(' ');
            }
        }
    }
}
