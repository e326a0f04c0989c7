//! Text reports over the accumulated counts, written as CSV lines.
use std::io::{self, Write};
use std::iter;
use std::str::FromStr;

use csv::{Writer, WriterBuilder};

use crate::{classify::classify, Classification, CountMap, Error, GroupedCountMap, SubRecord};

/// Layout of the per group reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    /// One line per group listing all its columns
    Csv,

    /// One line per group and column
    Pivot,
}

impl FromStr for DisplayFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<DisplayFormat, Self::Err> {
        match s {
            "csv" => Ok(DisplayFormat::Csv),
            "pivot" => Ok(DisplayFormat::Pivot),
            other => Err(Error::InvalidOption(format!(
                "display format must be csv or pivot, got {}",
                other
            ))),
        }
    }
}

pub struct Reporter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Reporter<W> {
        Reporter {
            writer: WriterBuilder::new().flexible(true).from_writer(out),
        }
    }

    /// Populated and empty counts of every column.
    pub fn all_fields(&mut self, counts: &CountMap) -> Result<(), Error> {
        self.writer.write_record(&["Field", "Populated", "Empty"])?;

        for (column, count) in counts.iter() {
            let populated = count.populated.to_string();
            let empty = count.empty.to_string();

            self.writer.write_record(&[column, populated.as_str(), empty.as_str()])?;
        }

        Ok(())
    }

    pub fn always(&mut self, global: &Classification) -> Result<(), Error> {
        self.writer.write_record(&["AlwaysFld"])?;

        for column in global.always.iter() {
            self.writer.write_record(&[column])?;
        }

        Ok(())
    }

    /// Columns always populated for a group but not always populated
    /// globally.
    pub fn action_always(
        &mut self,
        grouped: &GroupedCountMap,
        global: &Classification,
        format: DisplayFormat,
    ) -> Result<(), Error> {
        if format == DisplayFormat::Pivot {
            self.writer.write_record(&["Action_Name", "AlwaysFld"])?;
        }

        for (group, counts) in grouped.iter() {
            let by_group = classify(counts);
            let unique = by_group.unique_to(global);

            match format {
                DisplayFormat::Csv => {
                    self.writer.write_record(iter::once(group).chain(unique))?;
                }
                DisplayFormat::Pivot => {
                    for column in unique {
                        self.writer.write_record(&[group, column])?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Columns filled only in some of a group's rows, with the filled ratio
    /// in the pivot form.
    pub fn action_sometimes(
        &mut self,
        grouped: &GroupedCountMap,
        format: DisplayFormat,
    ) -> Result<(), Error> {
        if format == DisplayFormat::Pivot {
            self.writer
                .write_record(&["Action_Name", "SometimesFld", "Percent"])?;
        }

        for (group, counts) in grouped.iter() {
            let by_group = classify(counts);
            let partial = by_group.partially_filled();

            match format {
                DisplayFormat::Csv => {
                    self.writer
                        .write_record(iter::once(group).chain(partial.iter().map(|(c, _)| *c)))?;
                }
                DisplayFormat::Pivot => {
                    for (column, count) in partial {
                        let ratio = count.ratio().to_string();

                        self.writer.write_record(&[group, column, ratio.as_str()])?;
                    }
                }
            }
        }

        Ok(())
    }

    /// One line per sampled event: group, event index and its sub fields.
    pub fn event_split(&mut self, samples: &[(String, Vec<SubRecord>)]) -> Result<(), Error> {
        self.writer
            .write_record(&["Action_Name", "EventIndex", "Fields"])?;

        for (group, events) in samples {
            for (index, event) in events.iter().enumerate() {
                let fields = event.iter().map(|(n, v)| format!("{}={}", n, v));

                self.writer.write_record(
                    vec![group.clone(), index.to_string()].into_iter().chain(fields),
                )?;
            }
        }

        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        Ok(self.writer.flush()?)
    }

    pub fn into_inner(self) -> Result<W, Error> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::Other, e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::{DisplayFormat, Reporter};
    use crate::{
        classify::classify, flatten::sample_events_by_group, Accumulator, EventNaming, Record,
        Table,
    };

    fn accumulator() -> Accumulator {
        let table = Table::from_rows(
            "a.csv",
            vec![
                Record::from(vec!["Action_Name", "User", "Notes", "File"]),
                Record::from(vec!["upload", "ana", "a, b", "x.pdf"]),
                Record::from(vec!["upload", "bo", "", "y.pdf"]),
                Record::from(vec!["login", "ana", "", ""]),
                Record::from(vec!["login", "cy", "hi", ""]),
            ],
        )
        .unwrap();
        let mut acc = Accumulator::new("Action_Name");

        acc.add_table(&table).unwrap();

        acc
    }

    fn output<F>(f: F) -> String
    where
        F: FnOnce(&mut Reporter<Vec<u8>>),
    {
        let mut reporter = Reporter::new(Vec::new());

        f(&mut reporter);

        String::from_utf8(reporter.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_display_format() {
        assert_eq!("csv".parse::<DisplayFormat>().unwrap(), DisplayFormat::Csv);
        assert_eq!("pivot".parse::<DisplayFormat>().unwrap(), DisplayFormat::Pivot);
        assert!("table".parse::<DisplayFormat>().is_err());
    }

    #[test]
    fn test_all_fields() {
        let acc = accumulator();
        let out = output(|r| r.all_fields(acc.totals()).unwrap());

        assert_eq!(
            out,
            "Field,Populated,Empty\nAction_Name,4,0\nUser,4,0\nNotes,2,2\nFile,2,2\n"
        );
    }

    #[test]
    fn test_always() {
        let acc = accumulator();
        let global = classify(acc.totals());
        let out = output(|r| r.always(&global).unwrap());

        assert_eq!(out, "AlwaysFld\nAction_Name\nUser\n");
    }

    #[test]
    fn test_action_always() {
        let acc = accumulator();
        let global = classify(acc.totals());

        let csv = output(|r| {
            r.action_always(acc.grouped_totals(), &global, DisplayFormat::Csv)
                .unwrap()
        });
        assert_eq!(csv, "upload,File\nlogin\n");

        let pivot = output(|r| {
            r.action_always(acc.grouped_totals(), &global, DisplayFormat::Pivot)
                .unwrap()
        });
        assert_eq!(pivot, "Action_Name,AlwaysFld\nupload,File\n");
    }

    #[test]
    fn test_action_sometimes() {
        let acc = accumulator();

        let csv = output(|r| {
            r.action_sometimes(acc.grouped_totals(), DisplayFormat::Csv)
                .unwrap()
        });
        assert_eq!(csv, "upload,Notes\nlogin,Notes\n");

        let pivot = output(|r| {
            r.action_sometimes(acc.grouped_totals(), DisplayFormat::Pivot)
                .unwrap()
        });
        assert_eq!(
            pivot,
            "Action_Name,SometimesFld,Percent\nupload,Notes,0.5\nlogin,Notes,0.5\n"
        );
    }

    #[test]
    fn test_event_split() {
        let table = Table::from_rows(
            "a.csv",
            vec![
                Record::from(vec!["Action_Name", "Event_Items_0_0", "Event_Items_0_1"]),
                Record::from(vec!["upload", "/docs", "a,b.pdf"]),
            ],
        )
        .unwrap();
        let samples =
            sample_events_by_group(&table, "Action_Name", &EventNaming::default()).unwrap();
        let out = output(|r| r.event_split(&samples).unwrap());

        assert_eq!(
            out,
            "Action_Name,EventIndex,Fields\nupload,0,file_path=/docs,\"file_name=a,b.pdf\"\n"
        );
    }
}
