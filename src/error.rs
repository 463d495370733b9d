use std::error::Error;
use std::fmt::{
    Display,
    Formatter,
};

use itertools::Itertools;

/// A reference that could not be resolved when its synchronization scope
/// closed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DanglingRef {
    /// Id the reference points to.
    pub target:    String,
    /// Attribute that carried the reference, e.g. `Parent`.
    pub attribute: String,
}

impl Display for DanglingRef {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{} -> '{}'", self.attribute, self.target)
    }
}

/// Fatal conditions raised by the parser. Every variant except
/// [`GtfError::InvalidConfig`] carries the 1-based number of the line being
/// processed when the condition was detected.
#[derive(Debug, Clone, PartialEq)]
pub enum GtfError {
    /// Text matches none of the recognised line shapes.
    MalformedLine { line: usize, text: String },
    /// Line looks like a feature but its columns could not be tokenized.
    InvalidFeature { line: usize, reason: String },
    /// References left unresolved when a `###` scope or the input ended.
    DanglingReferences {
        line:       usize,
        unresolved: Vec<DanglingRef>,
    },
    /// Parser options rejected before any input was processed.
    InvalidConfig(String),
    /// The underlying reader failed.
    Io { line: usize, reason: String },
}

impl GtfError {
    pub fn line(&self) -> Option<usize> {
        match self {
            GtfError::MalformedLine { line, .. }
            | GtfError::InvalidFeature { line, .. }
            | GtfError::DanglingReferences { line, .. }
            | GtfError::Io { line, .. } => Some(*line),
            GtfError::InvalidConfig(_) => None,
        }
    }

    pub fn unresolved(&self) -> &[DanglingRef] {
        match self {
            GtfError::DanglingReferences { unresolved, .. } => unresolved,
            _ => &[],
        }
    }
}

impl Display for GtfError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            GtfError::MalformedLine { line, text } => {
                write!(f, "{}: GTF parse error. Cannot parse '{}'", line, text)
            },
            GtfError::InvalidFeature { line, reason } => {
                write!(f, "{}: invalid feature line: {}", line, reason)
            },
            GtfError::DanglingReferences { line, unresolved } => {
                write!(
                    f,
                    "{}: some features reference other features that do not \
                     exist in the file (or in the same '###' scope): {}",
                    line,
                    unresolved.iter().join(", ")
                )
            },
            GtfError::InvalidConfig(reason) => {
                write!(f, "invalid parser configuration: {}", reason)
            },
            GtfError::Io { line, reason } => {
                write!(f, "{}: failed to read input: {}", line, reason)
            },
        }
    }
}

impl Error for GtfError {}

pub type GtfResult<T> = Result<T, GtfError>;
