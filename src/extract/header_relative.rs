use super::{FieldError, number::parse_int};

/// Reads the `width`-byte field of the second line that sits `skip` bytes past the start of
/// `label` in the first line.
pub fn labelled_field(
    output: &str,
    label: &str,
    skip: usize,
    width: usize,
) -> Result<i32, FieldError> {
    let bytes = output.as_bytes();
    let needle = label.as_bytes();

    let mut label_offset = None;
    let mut data_start = None;
    for (index, &byte) in bytes.iter().enumerate() {
        if label_offset.is_none() && matches_at(bytes, needle, index) {
            label_offset = Some(index);
        }

        if byte == b'\n' {
            data_start = Some(index + 1);
            break;
        }
    }

    let Some(label_offset) = label_offset else {
        return Err(FieldError::LabelNotFound {
            label: label.to_string(),
        });
    };
    let data_start = data_start.ok_or(FieldError::MissingDataLine)?;

    let field_start = data_start + label_offset + skip;
    let raw = output
        .get(field_start..field_start + width)
        .ok_or(FieldError::OutOfBounds {
            offset: field_start,
            len: bytes.len(),
        })?;

    parse_int(raw).map_err(|source| FieldError::Number {
        raw: raw.to_string(),
        source,
    })
}

fn matches_at(haystack: &[u8], needle: &[u8], position: usize) -> bool {
    if needle.is_empty() || position + needle.len() > haystack.len() {
        return false;
    }

    for (index, &expected) in needle.iter().enumerate() {
        if haystack[position + index] != expected {
            return false;
        }
    }

    true
}
