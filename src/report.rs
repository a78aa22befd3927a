use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};

/// Meta description generated for one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    #[serde(rename = "URL")]
    url: String,
    #[serde(rename = "Meta Description")]
    meta_description: String,
}

impl SummaryResult {
    pub fn new<U: Into<String>, D: Into<String>>(url: U, meta_description: D) -> SummaryResult {
        SummaryResult {
            url: url.into(),
            meta_description: meta_description.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn meta_description(&self) -> &str {
        &self.meta_description
    }
}

/// Successful results in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsTable {
    rows: Vec<SummaryResult>,
}

impl ResultsTable {
    pub fn rows(&self) -> &[SummaryResult] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// UTF-8 CSV with a `URL,Meta Description` header.
    pub fn to_csv(&self) -> Result<Vec<u8>, ExportError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        if self.rows.is_empty() {
            wtr.write_record(["URL", "Meta Description"])?;
        }
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        wtr.into_inner()
            .map_err(|err| ExportError::Io(err.into_error()))
    }

    pub async fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        tokio::fs::write(path, self.to_csv()?).await?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(&self.rows)?)
    }
}

impl FromIterator<SummaryResult> for ResultsTable {
    fn from_iter<I: IntoIterator<Item = SummaryResult>>(iter: I) -> Self {
        ResultsTable {
            rows: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ResultsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const URL: &str = "URL";
        const DESCRIPTION: &str = "Meta Description";

        let width = self
            .rows
            .iter()
            .map(|row| row.url.chars().count())
            .chain(std::iter::once(URL.len()))
            .max()
            .unwrap_or(URL.len());

        writeln!(f, "{:<width$} | {}", URL, DESCRIPTION, width = width)?;
        writeln!(
            f,
            "{}-+-{}",
            "-".repeat(width),
            "-".repeat(DESCRIPTION.len())
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<width$} | {}",
                row.url,
                row.meta_description.replace('\n', " "),
                width = width
            )?;
        }

        Ok(())
    }
}
