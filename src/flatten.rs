//! Turns families of numbered columns like `Event_Items_3_1` into a list of
//! small records, one per index.
use std::collections::HashSet;

use regex::{Captures, Regex};
use strfmt::{strfmt_map, FmtError, Formatter};

use crate::{Error, Headers, Record, Table};

pub const DEFAULT_EVENT_FORMAT: &str = "Event_Items_{index}_{subfield}";
pub const DEFAULT_MAX_EVENTS: usize = 400;

/// How the numbered event columns are named and what each position means.
#[derive(Debug, Clone, PartialEq)]
pub struct EventNaming {
    format: String,
    subfields: Vec<String>,
    max_index: usize,
}

/// Rewrites positional placeholders (`{}` or `{0}`, `{1}`) into the named
/// `{index}` and `{subfield}` ones.
fn named_placeholders(format: &str) -> String {
    let re = Regex::new(r"\{(\d*)\}").expect("placeholder regex is valid");
    let mut next = 0;

    re.replace_all(format, |caps: &Captures| {
        let position = match caps[1].parse::<usize>() {
            Ok(p) => p,
            Err(_) => {
                next += 1;
                next - 1
            }
        };

        match position {
            0 => "{index}".to_string(),
            1 => "{subfield}".to_string(),
            _ => caps[0].to_string(),
        }
    })
    .into_owned()
}

impl EventNaming {
    /// Accepts both `Event_Items_{index}_{subfield}` and the positional
    /// `Event_Items_{}_{}`.
    pub fn new(format: &str, subfields: Vec<String>, max_index: usize) -> Result<EventNaming, Error> {
        let format = named_placeholders(format);

        if !format.contains("{index") || !format.contains("{subfield") {
            return Err(Error::InvalidEventFormat(format));
        }

        let naming = EventNaming {
            format,
            subfields,
            max_index,
        };

        naming.column(0, 0)?;

        Ok(naming)
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn subfields(&self) -> &[String] {
        &self.subfields
    }

    pub fn max_index(&self) -> usize {
        self.max_index
    }

    /// Name of the column holding sub field number `subfield` of event
    /// `index`.
    pub fn column(&self, index: usize, subfield: usize) -> Result<String, Error> {
        let rendered = strfmt_map(&self.format, &|mut fmt: Formatter| {
            let v = match fmt.key {
                "index" => index.to_string(),
                "subfield" => subfield.to_string(),
                key => return Err(FmtError::KeyError(key.to_string())),
            };
            fmt.str(&v)
        });

        rendered.map_err(|_| Error::InvalidEventFormat(self.format.clone()))
    }

    /// Whether the headers have event columns at all.
    pub fn is_present(&self, headers: &Headers) -> Result<bool, Error> {
        Ok(headers.contains_key(&self.column(0, 0)?))
    }
}

impl Default for EventNaming {
    fn default() -> EventNaming {
        EventNaming {
            format: DEFAULT_EVENT_FORMAT.to_string(),
            subfields: vec!["file_path".to_string(), "file_name".to_string()],
            max_index: DEFAULT_MAX_EVENTS,
        }
    }
}

/// One event pulled out of a row, its sub fields in naming order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubRecord {
    fields: Vec<(String, String)>,
}

impl SubRecord {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Collects the events of `row` in index order. An event ends at its first
/// missing or empty sub field, and the whole list ends at the first event
/// with no sub fields or at `max_index`.
pub fn flatten(headers: &Headers, row: &Record, naming: &EventNaming) -> Result<Vec<SubRecord>, Error> {
    let mut events = Vec::new();

    for index in 0..naming.max_index {
        let mut fields = Vec::with_capacity(naming.subfields.len());

        for (position, name) in naming.subfields.iter().enumerate() {
            match headers.get_field(row, &naming.column(index, position)?) {
                Some(value) if !value.is_empty() => fields.push((name.clone(), value.to_string())),
                _ => break,
            }
        }

        if fields.is_empty() {
            break;
        }

        events.push(SubRecord { fields });
    }

    Ok(events)
}

/// For each group, in order of appearance, the events of the first row of that
/// group that has any. Groups without events are left out.
pub fn sample_events_by_group(
    table: &Table,
    group_column: &str,
    naming: &EventNaming,
) -> Result<Vec<(String, Vec<SubRecord>)>, Error> {
    let headers = table.headers();
    let mut seen = HashSet::new();
    let mut samples = Vec::new();

    for (index, row) in table.rows().iter().enumerate() {
        let key = match headers.get_field(row, group_column) {
            Some(key) => key,
            None => {
                return Err(Error::MissingGroupColumn {
                    path: table.source().to_path_buf(),
                    column: group_column.to_string(),
                    row: index + 1,
                })
            }
        };

        if seen.contains(key) {
            continue;
        }

        let events = flatten(headers, row, naming)?;

        if !events.is_empty() {
            seen.insert(key);
            samples.push((key.to_string(), events));
        }
    }

    Ok(samples)
}
