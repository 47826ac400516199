//! Helpers for type bitmaps.

/// Returns the shortest prefix of `data` that ends in a non-zero octet.
///
/// Type bitmap windows must not have trailing zero octets. If all octets
/// are zero, the first octet is kept so the result is only empty if `data`
/// is.
#[must_use]
pub fn truncate_trailing_zeros(data: &[u8]) -> &[u8] {
    match data.iter().rposition(|&ch| ch != 0) {
        Some(pos) => &data[..=pos],
        None => &data[..data.len().min(1)],
    }
}

//============ Test ==========================================================
