//! English sentence and word segmentation.

use lazy_regex::regex;

const TERMINATORS: [char; 3] = ['.', '!', '?'];
const CLOSING: [char; 7] = ['"', '\'', ')', ']', '}', '\u{201d}', '\u{2019}'];
const OPENING: [char; 6] = ['"', '\'', '(', '[', '\u{201c}', '\u{2018}'];
const ABBREVIATIONS: [&str; 43] = [
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "inc", "ltd",
    "co", "corp", "fig", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept",
    "oct", "nov", "dec", "u.s", "u.k", "approx", "dept", "est", "gen", "gov", "sen", "rep", "rev",
    "mt", "ft", "vol", "al",
];
// abbreviations only when a number follows, as in "No. 5"
const NUMBER_SIGNS: [&str; 2] = ["no", "nos"];

/// Splits a block of text into sentences.
///
/// A sentence ends at `.`, `!` or `?` (plus any closing quotes or brackets)
/// when the next non-space character starts a new sentence. A lone period
/// after an abbreviation or an initial does not end a sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = vec![];
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if !TERMINATORS.contains(&chars[i].1) {
            i += 1;
            continue;
        }

        let mut end = i + 1;
        while end < chars.len() && TERMINATORS.contains(&chars[end].1) {
            end += 1;
        }
        let single_period = chars[i].1 == '.' && end == i + 1;
        while end < chars.len() && CLOSING.contains(&chars[end].1) {
            end += 1;
        }

        let next = chars[end..]
            .iter()
            .map(|(_, c)| *c)
            .find(|c| !c.is_whitespace());
        let followed_by_start = match chars.get(end) {
            None => true,
            Some((_, c)) if c.is_whitespace() => next.map_or(true, starts_sentence),
            Some(_) => false,
        };
        let abbreviated = single_period && is_abbreviation(&text[start..chars[i].0], next);

        if followed_by_start && !abbreviated {
            let end_byte = chars.get(end).map_or(text.len(), |(b, _)| *b);
            push_sentence(&mut sentences, &text[start..end_byte]);
            start = end_byte;
        }
        i = end;
    }
    push_sentence(&mut sentences, &text[start..]);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, sentence: &str) {
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}

fn starts_sentence(c: char) -> bool {
    c.is_uppercase() || c.is_numeric() || OPENING.contains(&c)
}

fn is_abbreviation(preceding: &str, next: Option<char>) -> bool {
    let Some(word) = preceding.split_whitespace().last() else {
        return false;
    };
    let word = word.trim_start_matches(|c: char| OPENING.contains(&c));

    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c.is_uppercase();
    }
    let word = word.to_lowercase();
    if NUMBER_SIGNS.contains(&word.as_str()) {
        return next.map_or(false, |c| c.is_ascii_digit());
    }
    ABBREVIATIONS.contains(&word.as_str())
}

/// Word tokens of a sentence: runs of letters, allowing inner apostrophes and
/// hyphens. Numbers and punctuation are dropped.
pub fn split_words(sentence: &str) -> Vec<String> {
    regex!(r"[^\w'\-\x{2019}]+")
        .split(sentence)
        .map(|token| token.trim_matches(|c: char| c == '\'' || c == '-' || c == '\u{2019}'))
        .filter(|token| regex!(r"^[^\W\d_](?:[^\W\d_]|['\-\x{2019}])*$").is_match(token))
        .map(ToString::to_string)
        .collect()
}
