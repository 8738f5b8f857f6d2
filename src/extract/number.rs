use std::num::IntErrorKind;

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NumberError {
    #[error("no digits")]
    Empty,
    #[error("unexpected character")]
    InvalidDigit,
    #[error("outside the 32-bit integer range")]
    OutOfRange,
}

/// Parses a base-10 `i32` the way `strtol` reads a field: leading whitespace is skipped and a
/// single sign is accepted, but anything after the digits is rejected and overflow is an error.
pub fn parse_int(raw: &str) -> Result<i32, NumberError> {
    let trimmed = raw.trim_start();
    if trimmed.is_empty() {
        return Err(NumberError::Empty);
    }

    trimmed.parse::<i32>().map_err(|error| match error.kind() {
        IntErrorKind::Empty => NumberError::Empty,
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => NumberError::OutOfRange,
        _ => NumberError::InvalidDigit,
    })
}
