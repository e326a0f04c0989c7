use std::path::PathBuf;

use tracing::debug;

use crate::{
    tabulate::{tabulate, tabulate_by_group},
    CountMap, Error, GroupedCountMap, Headers, Table,
};

/// Running totals over every file added so far, both global and by group.
///
/// All tables must share the headers of the first one added.
#[derive(Debug)]
pub struct Accumulator {
    group_column: String,
    headers: Option<Headers>,
    files: Vec<PathBuf>,
    totals: CountMap,
    grouped_totals: GroupedCountMap,
}

impl Accumulator {
    pub fn new(group_column: &str) -> Accumulator {
        Accumulator {
            group_column: group_column.to_string(),
            headers: None,
            files: Vec::new(),
            totals: CountMap::new(),
            grouped_totals: GroupedCountMap::new(),
        }
    }

    /// Counts the table and merges its counts into the running totals.
    /// Nothing is merged if the table fails any check.
    pub fn add_table(&mut self, table: &Table) -> Result<(), Error> {
        if let Some(ref expected) = self.headers {
            if expected != table.headers() {
                return Err(Error::HeaderMismatch {
                    path: table.source().to_path_buf(),
                    expected: expected.to_vec(),
                    found: table.headers().to_vec(),
                });
            }
        }

        let counts = tabulate(table)?;
        let grouped = tabulate_by_group(table, &self.group_column)?;

        if self.headers.is_none() {
            self.headers = Some(table.headers().clone());
        }

        debug!(
            path = %table.source().display(),
            rows = table.len(),
            groups = grouped.len(),
            "merging counts"
        );

        self.totals.merge(&counts);
        self.grouped_totals.merge(&grouped);
        self.files.push(table.source().to_path_buf());

        Ok(())
    }

    pub fn group_column(&self) -> &str {
        &self.group_column
    }

    /// Headers of the first table added, if any.
    pub fn headers(&self) -> Option<&Headers> {
        self.headers.as_ref()
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn totals(&self) -> &CountMap {
        &self.totals
    }

    pub fn grouped_totals(&self) -> &GroupedCountMap {
        &self.grouped_totals
    }
}
