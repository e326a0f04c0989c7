use csv::StringRecordIter;
use std::collections::HashMap;

use super::Record;

/// A structure for keeping relationship between the headers and their positions
#[derive(Debug, Clone)]
pub struct Headers {
    indexes: HashMap<String, usize>,
    names: Record,
}

impl Headers {
    pub fn from_row(row: Record) -> Headers {
        let mut indexes = HashMap::new();

        for (index, entry) in row.iter().enumerate() {
            indexes.entry(entry.to_string()).or_insert(index);
        }

        Headers {
            indexes,
            names: row,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn as_row(&self) -> &Record {
        &self.names
    }

    pub fn get(&self, field: &str) -> Option<usize> {
        self.indexes.get(field).copied()
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.indexes.contains_key(field)
    }

    pub fn iter(&self) -> StringRecordIter {
        self.names.iter()
    }

    /// Looks up a field of `row` by column name. `None` if the column is not
    /// part of these headers or the row is too short to have it.
    pub fn get_field<'r>(&self, row: &'r Record, field: &str) -> Option<&'r str> {
        self.get(field).and_then(|i| row.get(i))
    }

    /// A cell counts as populated when it exists and is a non-empty string.
    /// `"0"` and whitespace are populated.
    pub fn is_populated(&self, row: &Record, field: &str) -> bool {
        self.get_field(row, field).map_or(false, |v| !v.is_empty())
    }

    /// First column name that also appears at an earlier position.
    pub fn duplicate(&self) -> Option<&str> {
        self.iter()
            .enumerate()
            .find(|&(position, name)| self.get(name) != Some(position))
            .map(|(_, name)| name)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(String::from).collect()
    }
}

impl PartialEq for Headers {
    fn eq(&self, other: &Headers) -> bool {
        self.names == other.names
    }
}
