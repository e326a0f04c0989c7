//! Populated/empty counters per column and per group of columns.
use std::collections::HashMap;
use std::ops::AddAssign;

/// How many times a column was filled and how many times it was empty.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldCount {
    pub populated: u64,
    pub empty: u64,
}

impl FieldCount {
    pub fn new(populated: u64, empty: u64) -> FieldCount {
        FieldCount { populated, empty }
    }

    pub fn total(&self) -> u64 {
        self.populated + self.empty
    }

    /// Fraction of the occurrences that were populated. Only meaningful when
    /// `total()` is not zero.
    pub fn ratio(&self) -> f64 {
        self.populated as f64 / self.total() as f64
    }

    pub fn update(&mut self, populated: bool) {
        if populated {
            self.populated += 1;
        } else {
            self.empty += 1;
        }
    }
}

impl AddAssign for FieldCount {
    fn add_assign(&mut self, other: FieldCount) {
        self.populated += other.populated;
        self.empty += other.empty;
    }
}

/// Column name to [FieldCount], keeping columns in the order they were first
/// seen.
#[derive(Debug, Default, Clone)]
pub struct CountMap {
    indexes: HashMap<String, usize>,
    counts: Vec<(String, FieldCount)>,
}

impl CountMap {
    pub fn new() -> CountMap {
        Default::default()
    }

    /// A map with every given column set to zero.
    pub fn zeroed<'a, I: IntoIterator<Item = &'a str>>(columns: I) -> CountMap {
        let mut map = CountMap::new();

        for column in columns {
            map.entry(column);
        }

        map
    }

    /// Counter for `column`, inserted as zero if missing.
    pub fn entry(&mut self, column: &str) -> &mut FieldCount {
        let index = match self.indexes.get(column) {
            Some(&i) => i,
            None => {
                self.counts.push((column.to_string(), FieldCount::default()));
                self.indexes.insert(column.to_string(), self.counts.len() - 1);
                self.counts.len() - 1
            }
        };

        &mut self.counts[index].1
    }

    pub fn get(&self, column: &str) -> Option<&FieldCount> {
        self.indexes.get(column).map(|&i| &self.counts[i].1)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.counts.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldCount)> {
        self.counts.iter().map(|(c, f)| (c.as_str(), f))
    }

    /// Adds `incoming` into this map. Columns unknown so far are copied as
    /// they are, known ones are summed field by field.
    pub fn merge(&mut self, incoming: &CountMap) {
        for (column, count) in incoming.iter() {
            *self.entry(column) += *count;
        }
    }
}

/// Two maps are equal when they hold the same counts, regardless of column
/// order.
impl PartialEq for CountMap {
    fn eq(&self, other: &CountMap) -> bool {
        self.len() == other.len() && self.iter().all(|(c, f)| other.get(c) == Some(f))
    }
}

/// Group key to [CountMap], groups kept in order of first appearance.
#[derive(Debug, Default, Clone)]
pub struct GroupedCountMap {
    indexes: HashMap<String, usize>,
    groups: Vec<(String, CountMap)>,
}

impl GroupedCountMap {
    pub fn new() -> GroupedCountMap {
        Default::default()
    }

    pub fn contains_group(&self, group: &str) -> bool {
        self.indexes.contains_key(group)
    }

    /// Adds `group` with every one of `columns` set to zero. Does nothing if
    /// the group already exists.
    pub fn insert_zeroed<'a, I: IntoIterator<Item = &'a str>>(&mut self, group: &str, columns: I) {
        if !self.contains_group(group) {
            self.groups.push((group.to_string(), CountMap::zeroed(columns)));
            self.indexes.insert(group.to_string(), self.groups.len() - 1);
        }
    }

    pub fn get(&self, group: &str) -> Option<&CountMap> {
        self.indexes.get(group).map(|&i| &self.groups[i].1)
    }

    pub fn get_mut(&mut self, group: &str) -> Option<&mut CountMap> {
        match self.indexes.get(group) {
            Some(&i) => Some(&mut self.groups[i].1),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(g, _)| g.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CountMap)> {
        self.groups.iter().map(|(g, m)| (g.as_str(), m))
    }

    /// Adds `incoming` into this map. Unknown groups are copied whole, known
    /// ones are merged column by column with [CountMap::merge].
    pub fn merge(&mut self, incoming: &GroupedCountMap) {
        for (group, counts) in incoming.iter() {
            match self.get_mut(group) {
                Some(master) => master.merge(counts),
                None => {
                    self.groups.push((group.to_string(), counts.clone()));
                    self.indexes.insert(group.to_string(), self.groups.len() - 1);
                }
            }
        }
    }
}

impl PartialEq for GroupedCountMap {
    fn eq(&self, other: &GroupedCountMap) -> bool {
        self.len() == other.len() && self.iter().all(|(g, m)| other.get(g) == Some(m))
    }
}
