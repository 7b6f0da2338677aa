use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use arrow::array::Array;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::labels::Vocabulary;
use super::model::{RawTable, SalaryTable};
use super::normalize::normalize;

// ---------------------------------------------------------------------------
// Source location
// ---------------------------------------------------------------------------

/// Where the raw salary data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// `http://` and `https://` locations are URLs, anything else a path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(location.to_string())
        } else {
            Source::File(PathBuf::from(location))
        }
    }

    /// Lower-case file extension, ignoring any URL query or fragment.
    fn extension(&self) -> String {
        let path = match self {
            Source::Url(url) => {
                let end = url.find(['?', '#']).unwrap_or(url.len());
                let without_scheme = url[..end].split_once("://").map_or("", |(_, rest)| rest);
                // Only the path after the host can carry an extension.
                let path = without_scheme.find('/').map_or("", |i| &without_scheme[i..]);
                PathBuf::from(path)
            }
            Source::File(path) => path.clone(),
        };
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
    }

    fn unavailable(&self, reason: impl fmt::Display) -> LoadError {
        LoadError::SourceUnavailable {
            location: self.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{url}"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Memoized access
// ---------------------------------------------------------------------------

/// Load-once accessor for the normalized table of one source.
///
/// The first successful [`DatasetCache::get`] fetches and normalizes the
/// data; later calls return the same `Arc` without touching the source.
/// A failed load is not cached.
#[derive(Debug)]
pub struct DatasetCache {
    source: Source,
    vocabulary: Vocabulary,
    table: OnceLock<Arc<SalaryTable>>,
}

impl DatasetCache {
    pub fn new(source: Source, vocabulary: Vocabulary) -> Self {
        Self {
            source,
            vocabulary,
            table: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn get(&self) -> Result<Arc<SalaryTable>, LoadError> {
        if let Some(table) = self.table.get() {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(load_dataset(&self.source, self.vocabulary)?);
        Ok(Arc::clone(self.table.get_or_init(|| table)))
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Fetch, parse and normalize a salary dataset. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one observation per line (also the default
///   when the location has no extension)
/// * `.json`    – `[{ "work_year": 2023, ... }, ...]`
/// * `.parquet` – local files only
pub fn load_dataset(source: &Source, vocabulary: Vocabulary) -> Result<SalaryTable, LoadError> {
    log::debug!("Fetching salary data from {source}");

    let raw = match source.extension().as_str() {
        "" | "csv" => parse_csv(fetch_bytes(source)?.as_slice())?,
        "json" => parse_json(&fetch_bytes(source)?)?,
        "parquet" | "pq" => match source {
            Source::File(path) => load_parquet(path, source)?,
            Source::Url(_) => {
                return Err(LoadError::UnsupportedFormat(
                    "parquet is only read from local files".into(),
                ))
            }
        },
        other => return Err(LoadError::UnsupportedFormat(format!(".{other}"))),
    };

    let raw_rows = raw.rows.len();
    let table = normalize(&raw, vocabulary)?;
    log::info!(
        "Loaded {} salary records from {source} ({} dropped for missing year)",
        table.len(),
        raw_rows - table.len()
    );
    Ok(table)
}

fn fetch_bytes(source: &Source) -> Result<Vec<u8>, LoadError> {
    match source {
        Source::File(path) => std::fs::read(path).map_err(|e| source.unavailable(e)),
        Source::Url(url) => reqwest::blocking::get(url)
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .map(|b| b.to_vec())
            .map_err(|e| source.unavailable(e)),
    }
}

/// Cell texts treated as null, matching the usual dataframe NA markers.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn text_cell(s: &str) -> Option<String> {
    if NA_TOKENS.contains(&s) {
        None
    } else {
        Some(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Short rows are padded with nulls; extra columns are kept and ignored later.
fn parse_csv<R: Read>(input: R) -> Result<RawTable, LoadError> {
    let malformed = |e: csv::Error| LoadError::Malformed {
        format: "CSV",
        reason: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let columns: Vec<String> = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut raw = RawTable::new(columns);
    for result in reader.records() {
        let record = result.map_err(malformed)?;
        let row = (0..raw.columns.len())
            .map(|i| record.get(i).and_then(text_cell))
            .collect();
        raw.rows.push(row);
    }
    Ok(raw)
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`). Columns are the
/// union of the object keys in first-seen order.
fn parse_json(bytes: &[u8]) -> Result<RawTable, LoadError> {
    let malformed = |reason: String| LoadError::Malformed {
        format: "JSON",
        reason,
    };

    let root: JsonValue = serde_json::from_slice(bytes).map_err(|e| malformed(e.to_string()))?;
    let records = root
        .as_array()
        .ok_or_else(|| malformed("expected a top-level array".into()))?;

    let mut raw = RawTable::default();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| malformed(format!("row {i} is not an object")))?;
        for key in obj.keys() {
            if !raw.columns.contains(key) {
                raw.columns.push(key.clone());
            }
        }
    }

    for rec in records {
        let row = raw
            .columns
            .iter()
            .map(|col| rec.get(col).and_then(json_cell))
            .collect();
        raw.rows.push(row);
    }
    Ok(raw)
}

fn json_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

fn load_parquet(path: &Path, source: &Source) -> Result<RawTable, LoadError> {
    let malformed = |e: &dyn fmt::Display| LoadError::Malformed {
        format: "Parquet",
        reason: e.to_string(),
    };

    let file = std::fs::File::open(path).map_err(|e| source.unavailable(e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| malformed(&e))?;
    let columns = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().map_err(|e| malformed(&e))?;

    let mut raw = RawTable::new(columns);
    for batch_result in reader {
        let batch = batch_result.map_err(|e| malformed(&e))?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| {
                    if col.is_null(row) {
                        return Ok(None);
                    }
                    arrow::util::display::array_value_to_string(col, row).map(Some)
                })
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| malformed(&e))?;
            raw.rows.push(cells);
        }
    }
    Ok(raw)
}
