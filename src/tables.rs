//! Tabular artifacts.
//!
//! The two overview matrices arrive as CSV files produced by the upstream
//! analysis. They are rendered verbatim: whatever header row and cells the
//! file has is what the page shows. No schema validation, no numeric
//! interpretation.
//!
//! Missing file and malformed file are distinct outcomes: the first is an
//! expected `Ok(None)`, the second a [`TableError::Csv`] the caller surfaces
//! as a parse-error notice.

use csv::ReaderBuilder;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// A fully loaded table: header row plus data rows, all cells as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Load the CSV at `path` in full.
///
/// Rows may be ragged (the reader is flexible); the renderer pads short rows
/// visually by leaving cells empty.
pub fn load_table(path: &Path) -> Result<Option<Table>, TableError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(TableError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    let csv_err = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| TableError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Some(Table { headers, rows }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let result = load_table(&tmp.path().join("pearson.csv")).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn loads_headers_and_rows() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pearson.csv");
        fs::write(&path, "Variable,Price T-1\nSingle_Kharif,-0.42\nDouble_Crop,0.61\n").unwrap();

        let table = load_table(&path).unwrap().unwrap();
        assert_eq!(table.headers, vec!["Variable", "Price T-1"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["Double_Crop", "0.61"]);
    }

    #[test]
    fn ragged_rows_are_accepted() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("elasticity.csv");
        fs::write(&path, "a,b,c\n1,2\n3,4,5,6\n").unwrap();

        let table = load_table(&path).unwrap().unwrap();
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[1].len(), 4);
    }

    #[test]
    fn invalid_utf8_is_csv_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.csv");
        fs::write(&path, [b'a', b',', 0xff, 0xfe, b'\n', b'1', b',', b'2']).unwrap();

        assert!(matches!(load_table(&path), Err(TableError::Csv { .. })));
    }

    #[test]
    fn empty_file_has_no_rows() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.csv");
        fs::write(&path, "").unwrap();

        let table = load_table(&path).unwrap().unwrap();
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }
}
