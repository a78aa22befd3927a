use crate::error::InputError;
use std::io::Read;

/// Header of the CSV column holding the URLs. Matched exactly.
pub const ADDRESS_COLUMN: &str = "Address";

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSource {
    /// Newline separated URLs.
    Pasted(String),
    /// Raw bytes of a CSV file with an `Address` column.
    Csv(Vec<u8>),
}

impl UrlSource {
    /// Resolves the source into URLs, keeping input order and duplicates.
    pub fn resolve(&self) -> Result<Vec<String>, InputError> {
        match self {
            UrlSource::Pasted(text) => Ok(urls_from_text(text)),
            UrlSource::Csv(bytes) => urls_from_csv(bytes.as_slice()),
        }
    }
}

pub fn urls_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

pub fn urls_from_csv<R: Read>(reader: R) -> Result<Vec<String>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let column = reader
        .headers()?
        .iter()
        .position(|header| header.trim_start_matches(BOM) == ADDRESS_COLUMN)
        .ok_or_else(|| InputError::MissingColumn {
            column: ADDRESS_COLUMN.to_string(),
        })?;

    let mut urls = vec![];
    for record in reader.records() {
        let record = record?;
        if let Some(url) = record.get(column).map(str::trim) {
            if !url.is_empty() {
                urls.push(url.to_string());
            }
        }
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pasted_urls_are_trimmed_and_empty_lines_dropped() {
        let text = "  https://example.com/a \n\n\r\nhttps://example.com/b\r\n   \nhttps://example.com/a\n";
        assert_eq!(
            urls_from_text(text),
            vec![
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string(),
                "https://example.com/a".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_paste_has_no_urls() {
        assert!(urls_from_text("").is_empty());
        assert!(urls_from_text("\n  \n\t\n").is_empty());
    }

    #[test]
    fn test_csv_address_column() {
        let csv = "Title,Address,Status\nHome,https://example.com/,200\nAbout, https://example.com/about ,200\n";
        let urls = UrlSource::Csv(csv.as_bytes().to_vec()).resolve().unwrap();
        assert_eq!(
            urls,
            vec![
                "https://example.com/".to_string(),
                "https://example.com/about".to_string(),
            ]
        );
    }

    #[test]
    fn test_csv_quoted_cells_and_blank_values() {
        let csv = "Address,Note\n\"https://example.com/?q=a,b\",x\n,empty\nhttps://example.com/c\n";
        let urls = urls_from_csv(csv.as_bytes()).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://example.com/?q=a,b".to_string(),
                "https://example.com/c".to_string(),
            ]
        );
    }

    #[test]
    fn test_csv_with_byte_order_mark() {
        let csv = "\u{feff}Address\nhttps://example.com\n";
        let urls = urls_from_csv(csv.as_bytes()).unwrap();
        assert_eq!(urls, vec!["https://example.com".to_string()]);
    }

    #[test]
    fn test_csv_missing_address_column() {
        let csv = "address,URL\nhttps://example.com,https://example.com\n";
        let err = urls_from_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::MissingColumn { ref column } if column == "Address"));
        assert_eq!(
            err.to_string(),
            "The uploaded CSV file must contain a column named 'Address'."
        );
    }

    #[test]
    fn test_empty_csv_is_missing_address_column() {
        let err = urls_from_csv("".as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::MissingColumn { .. }));
    }
}
