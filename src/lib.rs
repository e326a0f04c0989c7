//! Field population statistics over audit log CSV exports.
//!
//! Each file is read into a [Table], counted with [tabulate] and
//! [tabulate_by_group] and merged into the running totals of an
//! [Accumulator]. Once every file is in, [classify] tells the always
//! populated columns apart from the sometimes populated ones.
mod accumulate;
mod count;
mod error;
mod headers;
mod input;
mod table;

pub mod classify;
pub mod config;
pub mod flatten;
pub mod report;
pub mod tabulate;

pub use accumulate::Accumulator;
pub use classify::{classify, Classification};
pub use config::Options;
pub use count::{CountMap, FieldCount, GroupedCountMap};
pub use error::{Error, Result};
pub use flatten::{flatten, EventNaming, SubRecord};
pub use headers::Headers;
pub use input::ReaderSource;
pub use report::{DisplayFormat, Reporter};
pub use table::Table;
pub use tabulate::{tabulate, tabulate_by_group};

pub type Record = csv::StringRecord;
