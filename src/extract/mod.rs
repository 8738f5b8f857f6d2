//! Locating integers inside the fixed-layout text printed by system tools.
//!
//! Each supported layout is a [`FieldRule`]; samplers pick a rule per field, so a layout
//! change in one tool is handled by swapping a rule rather than touching the samplers.

mod fixed_column;
mod header_relative;
mod number;

use thiserror::Error;

pub use fixed_column::column_field;
pub use header_relative::labelled_field;
pub use number::NumberError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("table of {len} bytes is too short to hold column {column}")]
    TableTooShort { len: usize, column: usize },
    #[error("column {column} holds no number")]
    EmptyField { column: usize },
    #[error("label {label:?} not found in the header line")]
    LabelNotFound { label: String },
    #[error("no data line follows the header line")]
    MissingDataLine,
    #[error("field at offset {offset} does not fit in {len} bytes of output")]
    OutOfBounds { offset: usize, len: usize },
    #[error("failed to parse number {raw:?}: {source}")]
    Number { raw: String, source: NumberError },
}

impl FieldError {
    /// Whether the output is unusable as a whole, as opposed to one unreadable value.
    pub fn aborts_phase(&self) -> bool {
        matches!(
            self,
            FieldError::LabelNotFound { .. } | FieldError::MissingDataLine
        )
    }

    /// The substring that failed to parse, when there was one.
    pub fn raw(&self) -> Option<&str> {
        match self {
            FieldError::Number { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Logical column of a single-line table made of four equal-width columns.
    FixedColumn { column: usize },
    /// `width` bytes of the second line, `skip` bytes past where `label` starts in the first.
    HeaderRelative {
        label: &'static str,
        skip: usize,
        width: usize,
    },
}

impl FieldRule {
    pub fn extract(&self, output: &str) -> Result<i32, FieldError> {
        match *self {
            FieldRule::FixedColumn { column } => column_field(output, column),
            FieldRule::HeaderRelative { label, skip, width } => {
                labelled_field(output, label, skip, width)
            }
        }
    }
}
