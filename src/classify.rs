use crate::{CountMap, FieldCount};

/// Columns of a [CountMap] split into those never empty and the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub always: Vec<String>,
    pub sometimes: Vec<(String, FieldCount)>,
}

/// Splits the columns of `counts`: a column is always populated iff it was
/// never empty. Column order follows the map.
pub fn classify(counts: &CountMap) -> Classification {
    let mut always = Vec::new();
    let mut sometimes = Vec::new();

    for (column, count) in counts.iter() {
        if count.empty == 0 {
            always.push(column.to_string());
        } else {
            sometimes.push((column.to_string(), *count));
        }
    }

    Classification { always, sometimes }
}

impl Classification {
    pub fn is_always(&self, column: &str) -> bool {
        self.always.iter().any(|c| c == column)
    }

    pub fn sometimes_count(&self, column: &str) -> Option<&FieldCount> {
        self.sometimes
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, f)| f)
    }

    /// Always populated columns of this (group) classification that are not
    /// always populated in `global`.
    pub fn unique_to(&self, global: &Classification) -> Vec<&str> {
        self.always
            .iter()
            .filter(|c| !global.is_always(c))
            .map(String::as_str)
            .collect()
    }

    /// Sometimes populated columns that were filled at least once.
    pub fn partially_filled(&self) -> Vec<(&str, &FieldCount)> {
        self.sometimes
            .iter()
            .filter(|(_, f)| f.populated > 0)
            .map(|(c, f)| (c.as_str(), f))
            .collect()
    }
}
