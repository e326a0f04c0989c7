use std::io;
use std::path::PathBuf;
use std::result;

/// An error found while reading, counting or reporting on the audit files.
#[derive(Debug)]
pub enum Error {
    Csv(csv::Error),
    Io(io::Error),
    Pattern(glob::PatternError),
    InconsistentSizeOfRows(PathBuf),

    /// A table had no rows to count
    EmptyInput(PathBuf),

    /// A row lacks the column used for grouping
    MissingGroupColumn {
        path: PathBuf,
        column: String,
        row: usize,
    },

    /// A file's header differs from the first file's header
    HeaderMismatch {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A header names the same column more than once
    DuplicateColumn {
        path: PathBuf,
        column: String,
    },

    InvalidEventFormat(String),
    InvalidOption(String),
    NoInputFiles,
}

pub type Result<T> = result::Result<T, Error>;

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Error {
        Error::Csv(error)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        Error::Io(error)
    }
}

impl From<glob::PatternError> for Error {
    fn from(error: glob::PatternError) -> Error {
        Error::Pattern(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Csv(ref e) => Some(e),
            Error::Io(ref e) => Some(e),
            Error::Pattern(ref e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Error::Csv(ref e) => write!(f, "CSV error: {}", e),
            Error::Io(ref e) => write!(f, "IO error: {}", e),
            Error::Pattern(ref e) => write!(f, "invalid input glob: {}", e),
            Error::InconsistentSizeOfRows(ref p) => {
                write!(f, "inconsistent size of rows in {:?}", p)
            }
            Error::EmptyInput(ref p) => write!(f, "no records to count in {:?}", p),
            Error::MissingGroupColumn {
                ref path,
                ref column,
                row,
            } => write!(
                f,
                "invalid record {} in {:?}: missing grouping column {}",
                row, path, column
            ),
            Error::HeaderMismatch {
                ref path,
                ref expected,
                ref found,
            } => write!(
                f,
                "header of {:?} does not match previous files: expected [{}], found [{}]",
                path,
                expected.join(","),
                found.join(",")
            ),
            Error::DuplicateColumn {
                ref path,
                ref column,
            } => write!(f, "column {} appears more than once in the header of {:?}", column, path),
            Error::InvalidEventFormat(ref s) => {
                write!(f, "event column format needs {{index}} and {{subfield}}: {}", s)
            }
            Error::InvalidOption(ref s) => write!(f, "invalid option: {}", s),
            Error::NoInputFiles => write!(
                f,
                "must specify at least one file to process in: input_file, input_list or input_glob"
            ),
        }
    }
}
