//! Command line options.
use std::collections::HashSet;
use std::path::PathBuf;

use clap::{App, Arg, ArgMatches};
use encoding::label::encoding_from_whatwg_label;
use encoding::EncodingRef;
use tracing::warn;

use crate::{
    flatten::{DEFAULT_EVENT_FORMAT, DEFAULT_MAX_EVENTS},
    DisplayFormat, Error, EventNaming,
};

pub const DEFAULT_GROUP_COLUMN: &str = "Action_Name";

pub struct Options {
    pub input_file: Option<String>,
    pub input_list: Vec<String>,
    pub input_glob: Option<String>,
    pub group_column: String,
    pub event_naming: EventNaming,
    pub encoding: EncodingRef,
    pub disp_all_flds: bool,
    pub disp_all_always: bool,
    pub disp_action_always: Option<DisplayFormat>,
    pub disp_action_sometimes: Option<DisplayFormat>,
    pub disp_event_split: bool,
    pub verbosity: u64,
}

pub fn app() -> App<'static, 'static> {
    App::new("auditcsv")
        .version("1.01")
        .about("Reports how often each column of audit log CSV exports is populated")
        .arg(
            Arg::with_name("input_file")
                .long("input-file")
                .value_name("FILE")
                .help("Audit file to process")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("input_list")
                .long("input-list")
                .value_name("FILES")
                .help("Comma separated list of audit files to process")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("input_glob")
                .long("input-glob")
                .value_name("PATTERN")
                .help("Glob matching the audit files to process")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("group_column")
                .long("group-column")
                .value_name("COLUMN")
                .help("Column used to break the counts down")
                .default_value(DEFAULT_GROUP_COLUMN),
        )
        .arg(
            Arg::with_name("event_format")
                .long("event-format")
                .value_name("FORMAT")
                .help("Name of the event columns, with {index} and {subfield} placeholders")
                .default_value(DEFAULT_EVENT_FORMAT),
        )
        .arg(
            Arg::with_name("event_fields")
                .long("event-fields")
                .value_name("NAMES")
                .help("Comma separated names of the event sub fields")
                .default_value("file_path,file_name"),
        )
        .arg(
            Arg::with_name("max_events")
                .long("max-events")
                .value_name("N")
                .help("Maximum number of events read from a row")
                .default_value("400"),
        )
        .arg(
            Arg::with_name("encoding")
                .long("encoding")
                .value_name("LABEL")
                .help("Text encoding of the input files")
                .default_value("utf-8"),
        )
        .arg(
            Arg::with_name("disp_all_flds")
                .long("disp-all-flds")
                .help("Print populated/empty counts of every column"),
        )
        .arg(
            Arg::with_name("disp_all_always")
                .long("disp-all-always")
                .help("Print columns populated in every record"),
        )
        .arg(
            Arg::with_name("disp_action_always")
                .long("disp-action-always")
                .value_name("FORMAT")
                .help("Print columns always populated for each action")
                .possible_values(&["csv", "pivot"]),
        )
        .arg(
            Arg::with_name("disp_action_sometimes")
                .long("disp-action-sometimes")
                .value_name("FORMAT")
                .help("Print columns sometimes populated for each action")
                .possible_values(&["csv", "pivot"]),
        )
        .arg(
            Arg::with_name("disp_event_split")
                .long("disp-event-split")
                .help("Print one sample of flattened events per action"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more, can be repeated"),
        )
}

fn comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn display_format(matches: &ArgMatches, name: &str) -> Result<Option<DisplayFormat>, Error> {
    match matches.value_of(name) {
        Some(v) => Ok(Some(v.parse()?)),
        None => Ok(None),
    }
}

impl Options {
    pub fn from_matches(matches: &ArgMatches) -> Result<Options, Error> {
        let max_events = match matches.value_of("max_events") {
            Some(n) => n
                .parse()
                .map_err(|_| Error::InvalidOption(format!("max-events is not a number: {}", n)))?,
            None => DEFAULT_MAX_EVENTS,
        };

        let event_naming = EventNaming::new(
            matches.value_of("event_format").unwrap_or(DEFAULT_EVENT_FORMAT),
            comma_list(matches.value_of("event_fields").unwrap_or("")),
            max_events,
        )?;

        let label = matches.value_of("encoding").unwrap_or("utf-8");
        let encoding = encoding_from_whatwg_label(label)
            .ok_or_else(|| Error::InvalidOption(format!("unknown encoding: {}", label)))?;

        Ok(Options {
            input_file: matches.value_of("input_file").map(String::from),
            input_list: matches.value_of("input_list").map(comma_list).unwrap_or_default(),
            input_glob: matches.value_of("input_glob").map(String::from),
            group_column: matches
                .value_of("group_column")
                .unwrap_or(DEFAULT_GROUP_COLUMN)
                .to_string(),
            event_naming,
            encoding,
            disp_all_flds: matches.is_present("disp_all_flds"),
            disp_all_always: matches.is_present("disp_all_always"),
            disp_action_always: display_format(matches, "disp_action_always")?,
            disp_action_sometimes: display_format(matches, "disp_action_sometimes")?,
            disp_event_split: matches.is_present("disp_event_split"),
            verbosity: matches.occurrences_of("verbose"),
        })
    }

    /// Parses the given command line, program name included.
    pub fn from_args<I, T>(args: I) -> Result<Options, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = app()
            .get_matches_from_safe(args)
            .map_err(|e| Error::InvalidOption(e.message))?;

        Options::from_matches(&matches)
    }

    /// Every file named by `input_file`, `input_list` and `input_glob`, in
    /// that order and without repetitions.
    pub fn input_files(&self) -> Result<Vec<PathBuf>, Error> {
        let mut files: Vec<PathBuf> = self
            .input_file
            .iter()
            .chain(self.input_list.iter())
            .map(PathBuf::from)
            .collect();

        if let Some(ref pattern) = self.input_glob {
            for entry in glob::glob(pattern)? {
                match entry {
                    Ok(path) => files.push(path),
                    Err(e) => warn!(error = %e, "skipping unreadable glob entry"),
                }
            }
        }

        let mut seen = HashSet::new();
        files.retain(|f| seen.insert(f.clone()));

        if files.is_empty() {
            return Err(Error::NoInputFiles);
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::{app, Options};
    use crate::flatten::DEFAULT_MAX_EVENTS;
    use crate::{DisplayFormat, Error};
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let o = Options::from_args(vec!["auditcsv", "--input-file", "a.csv"]).unwrap();

        assert_eq!(o.group_column, "Action_Name");
        assert_eq!(o.event_naming.column(2, 1).unwrap(), "Event_Items_2_1");
        assert_eq!(o.event_naming.subfields(), &["file_path", "file_name"]);
        assert_eq!(o.event_naming.max_index(), 400);
        assert_eq!(o.encoding.name(), "utf-8");
        assert!(!o.disp_all_flds);
        assert_eq!(o.disp_action_always, None);
        assert_eq!(o.verbosity, 0);
    }

    #[test]
    fn test_max_events_default_is_declared() {
        let matches = app().get_matches_from(vec!["auditcsv"]);

        assert_eq!(matches.value_of("max_events"), Some("400"));
        assert_eq!(
            matches.value_of("max_events").unwrap().parse::<usize>().unwrap(),
            DEFAULT_MAX_EVENTS
        );
    }

    #[test]
    fn test_display_options() {
        let o = Options::from_args(vec![
            "auditcsv",
            "--input-file",
            "a.csv",
            "--disp-all-flds",
            "--disp-action-always",
            "pivot",
            "--disp-action-sometimes",
            "csv",
            "--event-format",
            "Ev_{}_{}",
            "--max-events",
            "7",
            "-vv",
        ])
        .unwrap();

        assert!(o.disp_all_flds);
        assert_eq!(o.disp_action_always, Some(DisplayFormat::Pivot));
        assert_eq!(o.disp_action_sometimes, Some(DisplayFormat::Csv));
        assert_eq!(o.event_naming.column(0, 1).unwrap(), "Ev_0_1");
        assert_eq!(o.event_naming.max_index(), 7);
        assert_eq!(o.verbosity, 2);
    }

    #[test]
    fn test_bad_options() {
        match Options::from_args(vec!["auditcsv", "--disp-action-always", "table"]) {
            Err(Error::InvalidOption(_)) => {}
            _ => unreachable!(),
        }
        match Options::from_args(vec!["auditcsv", "--encoding", "klingon"]) {
            Err(Error::InvalidOption(_)) => {}
            _ => unreachable!(),
        }
        match Options::from_args(vec!["auditcsv", "--max-events", "many"]) {
            Err(Error::InvalidOption(_)) => {}
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_input_files() {
        let o = Options::from_args(vec![
            "auditcsv",
            "--input-file",
            "test/assets/audit_a.csv",
            "--input-list",
            "x.csv, test/assets/audit_a.csv",
            "--input-glob",
            "test/assets/audit_*.csv",
        ])
        .unwrap();

        assert_eq!(
            o.input_files().unwrap(),
            vec![
                PathBuf::from("test/assets/audit_a.csv"),
                PathBuf::from("x.csv"),
                PathBuf::from("test/assets/audit_b.csv"),
            ]
        );
    }

    #[test]
    fn test_no_input_files() {
        let o = Options::from_args(vec!["auditcsv"]).unwrap();

        match o.input_files() {
            Err(Error::NoInputFiles) => {}
            _ => unreachable!(),
        }
    }
}
