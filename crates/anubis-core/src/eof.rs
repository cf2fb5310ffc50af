//! End of file marker handling for recovered data.
//!
//! The marker is appended to the payload on inject. On eject the whole carrier
//! capacity is recovered and cut at the first occurrence of the marker, so a
//! payload must never contain the marker itself.

use log::warn;

use crate::error::AnubisError;
use crate::result::Result;

/// Index of the earliest full occurrence of `marker` in `buffer`.
pub fn find_marker(buffer: &[u8], marker: &[u8]) -> Option<usize> {
    let first = *marker.first()?;

    buffer
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == first)
        .map(|(i, _)| i)
        .find(|&i| buffer.get(i..i + marker.len()) == Some(marker))
}

/// Cuts `buffer` right before the first occurrence of `marker`.
///
/// An empty marker disables the protocol and the buffer is returned as is.
/// If the marker is missing, `ensure_success` decides between failing with
/// [`AnubisError::EofNotFound`] and handing back the full, untruncated buffer,
/// including whatever carrier noise follows the real payload.
pub fn find_and_truncate(
    mut buffer: Vec<u8>,
    marker: &[u8],
    ensure_success: bool,
) -> Result<Vec<u8>> {
    if marker.is_empty() {
        return Ok(buffer);
    }

    match find_marker(&buffer, marker) {
        Some(end) => {
            buffer.truncate(end);
            Ok(buffer)
        }
        None if ensure_success => Err(AnubisError::EofNotFound),
        None => {
            warn!(
                "EOF marker not found, returning all {} recovered bytes",
                buffer.len()
            );
            Ok(buffer)
        }
    }
}
