use super::{FieldError, number::parse_int};

pub const COLUMN_COUNT: usize = 4;
/// Eight-character header plus the separating space.
pub const HEADER_WIDTH: usize = 9;

/// Reads the right-aligned integer of logical `column` from a single-line table of
/// [`COLUMN_COUNT`] equal-width columns followed by a newline.
pub fn column_field(table: &str, column: usize) -> Result<i32, FieldError> {
    let len = table.len();
    let column_width = len.saturating_sub(1) / COLUMN_COUNT;
    if column >= COLUMN_COUNT || column_width <= HEADER_WIDTH {
        return Err(FieldError::TableTooShort { len, column });
    }

    let start = column_width * column + HEADER_WIDTH;
    let end = column_width * (column + 1);

    let Some(offset) = table.as_bytes()[start..end]
        .iter()
        .position(|&byte| byte != b' ')
    else {
        return Err(FieldError::EmptyField { column });
    };

    let number_start = start + offset;
    let raw = table
        .get(number_start..end)
        .ok_or(FieldError::OutOfBounds {
            offset: number_start,
            len,
        })?;

    // the column separator or the final newline may trail the digits
    parse_int(raw.trim_end()).map_err(|source| FieldError::Number {
        raw: raw.to_string(),
        source,
    })
}
