use std::error::Error;
use std::fmt;
use std::fmt::Formatter;
use std::io;

/// Reasons a line of input does not describe an entry. None of these are
/// fatal: the loader skips the line and moves on.
#[derive(Debug, PartialEq)]
pub enum EntryError {
    Empty,
    Comment,
    MissingField(&'static str),
    InvalidAmount(String),
}

#[derive(Debug, PartialEq)]
pub enum StoreError {
    OutOfMemory,
}

#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
}

#[derive(Debug)]
pub enum ReportError {
    Io(io::Error),
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EntryError::Empty => write!(f, "line is empty"),
            EntryError::Comment => write!(f, "line is a comment"),
            EntryError::MissingField(field) => write!(f, "line has no {} field", field),
            EntryError::InvalidAmount(token) => {
                write!(f, "unable to read an amount from {:?}", token)
            }
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::OutOfMemory => {
                write!(f, "unable to grow the entry store, entry was not stored")
            }
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "failed to read input: {}", err),
        }
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Io(err) => write!(f, "failed to write report: {}", err),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<io::Error> for ReportError {
    fn from(err: io::Error) -> Self {
        ReportError::Io(err)
    }
}

impl Error for EntryError {}
impl Error for StoreError {}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReportError::Io(err) => Some(err),
        }
    }
}
