//! One audit file held in memory: its headers and every row.
use std::path::{Path, PathBuf};

use crate::{Error, Headers, Record};

#[derive(Debug, Clone)]
pub struct Table {
    source: PathBuf,
    headers: Headers,
    rows: Vec<Record>,
}

impl Table {
    /// Fails if the headers repeat a column name, every column must be
    /// counted exactly once per row.
    pub fn new<P: AsRef<Path>>(source: P, headers: Headers, rows: Vec<Record>) -> Result<Table, Error> {
        if let Some(column) = headers.duplicate() {
            return Err(Error::DuplicateColumn {
                path: source.as_ref().to_path_buf(),
                column: column.to_string(),
            });
        }

        Ok(Table {
            source: source.as_ref().to_path_buf(),
            headers,
            rows,
        })
    }

    /// Builds a table from an iterator of rows, the first one being the
    /// headers.
    pub fn from_rows<P, I>(source: P, rows: I) -> Result<Table, Error>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = Record>,
    {
        let mut iter = rows.into_iter();

        match iter.next() {
            Some(header) => Table::new(source, Headers::from_row(header), iter.collect()),
            None => Err(Error::EmptyInput(source.as_ref().to_path_buf())),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Table;
    use crate::{Error, Headers, Record};

    #[test]
    fn test_from_rows() {
        let t = Table::from_rows(
            "mem.csv",
            vec![
                Record::from(vec!["id", "num"]),
                Record::from(vec!["1", "40"]),
                Record::from(vec!["2", "39"]),
            ],
        )
        .unwrap();

        assert_eq!(
            *t.headers(),
            Headers::from_row(Record::from(vec!["id", "num"]))
        );
        assert_eq!(t.len(), 2);
        assert_eq!(t.rows()[1], Record::from(vec!["2", "39"]));
    }

    #[test]
    fn test_repeated_column() {
        let result = Table::from_rows(
            "dup.csv",
            vec![
                Record::from(vec!["Action_Name", "Notes", "Notes"]),
                Record::from(vec!["up", "x", ""]),
                Record::from(vec!["up", "y", ""]),
            ],
        );

        match result {
            Err(Error::DuplicateColumn { path, column }) => {
                assert_eq!(path.to_str(), Some("dup.csv"));
                assert_eq!(column, "Notes");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_no_header() {
        match Table::from_rows("mem.csv", Vec::<Record>::new()) {
            Err(Error::EmptyInput(p)) => assert_eq!(p.to_str(), Some("mem.csv")),
            _ => unreachable!(),
        }
    }
}
