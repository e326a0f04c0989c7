use csv::{ByteRecord, Reader};
use encoding::{DecoderTrap, EncodingRef};
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Error, Headers, Record, Table};

fn decode(data: &ByteRecord, encoding: EncodingRef) -> Record {
    let mut row = Record::with_capacity(data.as_slice().len(), data.len());

    for item in data.iter() {
        // DecoderTrap::Replace never fails, undecodable bytes become U+FFFD
        let field = encoding
            .decode(item, DecoderTrap::Replace)
            .unwrap_or_else(|_| String::from_utf8_lossy(item).into_owned());

        row.push_field(&field);
    }

    row
}

/// An audit file opened for reading in a given text encoding.
pub struct ReaderSource {
    reader: Reader<File>,
    path: PathBuf,
    encoding: EncodingRef,
}

impl ReaderSource {
    pub fn from_reader<P: AsRef<Path>>(
        reader: Reader<File>,
        path: P,
        encoding: EncodingRef,
    ) -> ReaderSource {
        ReaderSource {
            reader,
            path: path.as_ref().to_path_buf(),
            encoding,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P, encoding: EncodingRef) -> Result<ReaderSource, Error> {
        Ok(ReaderSource::from_reader(
            csv::ReaderBuilder::new().flexible(true).from_path(&path)?,
            path,
            encoding,
        ))
    }

    fn headers(&mut self) -> Result<Headers, Error> {
        let data = self.reader.byte_headers()?.clone();

        Ok(Headers::from_row(decode(&data, self.encoding)))
    }

    /// Reads the whole file. Every row must have as many fields as the
    /// headers.
    pub fn read_table(mut self) -> Result<Table, Error> {
        let headers = self.headers()?;
        let mut rows = Vec::new();
        let mut record = ByteRecord::new();

        while self.reader.read_byte_record(&mut record)? {
            if record.len() != headers.len() {
                return Err(Error::InconsistentSizeOfRows(self.path));
            }

            rows.push(decode(&record, self.encoding));
        }

        debug!(path = %self.path.display(), rows = rows.len(), "read table");

        Table::new(self.path, headers, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::ReaderSource;
    use crate::{Error, Record};
    use encoding::all::{UTF_8, WINDOWS_1252};

    #[test]
    fn test_read_table() {
        let table = ReaderSource::from_path("test/assets/audit_a.csv", UTF_8)
            .unwrap()
            .read_table()
            .unwrap();

        assert_eq!(
            table.headers().to_vec(),
            vec!["Action_Name", "User", "Notes", "Event_Items_0_0", "Event_Items_0_1"]
        );
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.rows()[0],
            Record::from(vec!["upload", "ana", "first", "/docs", "a.pdf"])
        );
    }

    #[test]
    fn different_encoding() {
        let table = ReaderSource::from_path("test/assets/windows1252/data.csv", WINDOWS_1252)
            .unwrap()
            .read_table()
            .unwrap();

        assert_eq!(table.headers().to_vec(), vec!["name"]);
        assert_eq!(table.rows()[0], Record::from(vec!["árbol"]));
    }

    #[test]
    fn test_repeated_column() {
        let result = ReaderSource::from_path("test/assets/repeated.csv", UTF_8)
            .unwrap()
            .read_table();

        match result {
            Err(Error::DuplicateColumn { column, .. }) => assert_eq!(column, "Notes"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_inconsistent_rows() {
        let result = ReaderSource::from_path("test/assets/ragged.csv", UTF_8)
            .unwrap()
            .read_table();

        match result {
            Err(Error::InconsistentSizeOfRows(p)) => {
                assert_eq!(p.to_str(), Some("test/assets/ragged.csv"))
            }
            _ => unreachable!(),
        }
    }
}
