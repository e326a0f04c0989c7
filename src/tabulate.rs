use crate::{CountMap, Error, GroupedCountMap, Table};

/// Counts, for every column of the table's headers, in how many rows it is
/// populated and in how many it is empty.
pub fn tabulate(table: &Table) -> Result<CountMap, Error> {
    if table.is_empty() {
        return Err(Error::EmptyInput(table.source().to_path_buf()));
    }

    let headers = table.headers();
    let mut counts = CountMap::zeroed(headers.iter());

    for row in table.rows() {
        for column in headers.iter() {
            counts.entry(column).update(headers.is_populated(row, column));
        }
    }

    Ok(counts)
}

/// Like [tabulate] but keeping one [CountMap] per distinct value of
/// `group_column`. Every group gets every column, even those it never
/// touches.
pub fn tabulate_by_group(table: &Table, group_column: &str) -> Result<GroupedCountMap, Error> {
    if table.is_empty() {
        return Err(Error::EmptyInput(table.source().to_path_buf()));
    }

    let headers = table.headers();
    let mut keys = Vec::with_capacity(table.len());
    let mut grouped = GroupedCountMap::new();

    for (index, row) in table.rows().iter().enumerate() {
        match headers.get_field(row, group_column) {
            Some(key) => {
                grouped.insert_zeroed(key, headers.iter());
                keys.push(key);
            }
            None => {
                return Err(Error::MissingGroupColumn {
                    path: table.source().to_path_buf(),
                    column: group_column.to_string(),
                    row: index + 1,
                })
            }
        }
    }

    for (row, key) in table.rows().iter().zip(keys) {
        if let Some(counts) = grouped.get_mut(key) {
            for column in headers.iter() {
                counts.entry(column).update(headers.is_populated(row, column));
            }
        }
    }

    Ok(grouped)
}
