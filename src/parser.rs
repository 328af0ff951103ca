use crate::errors::{AppError, AppResult};
use crate::model::Record;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

const FIELD_SEPARATOR: char = '\t';

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DataFormatError {
    #[error("line {line}: expected 3 tab-separated fields, found {found}")]
    MissingFields { line: usize, found: usize },
}

/// Reads the tab-separated record file at `path`.
pub fn load_file(path: &Path) -> AppResult<Vec<Record>> {
    let content = fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(&content)?;
    debug!(path = %path.display(), records = records.len(), "records loaded");
    Ok(records)
}

/// Parses one record per line. The first malformed line aborts the parse.
pub fn parse_records(content: &str) -> Result<Vec<Record>, DataFormatError> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| parse_line(line, idx + 1))
        .collect()
}

fn parse_line(line: &str, line_no: usize) -> Result<Record, DataFormatError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();

    match fields.as_slice() {
        [number, date, fio, rest @ ..] => {
            if !rest.is_empty() {
                warn!(
                    line = line_no,
                    extra = rest.len(),
                    "ignoring fields after the third"
                );
            }
            Ok(Record::new(*number, *date, *fio))
        }
        _ => Err(DataFormatError::MissingFields {
            line: line_no,
            found: fields.len(),
        }),
    }
}
