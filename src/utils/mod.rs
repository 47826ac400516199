//! Various utility modules.

pub mod base16;
pub mod base64;
pub mod bitmap;
pub mod freeze;
pub mod text;

/// Inserts a space every `chunk_size` characters of an ASCII string.
///
/// Zero disables breaking.
fn break_into_chunks(s: String, chunk_size: usize) -> String {
    if chunk_size == 0 || s.len() <= chunk_size {
        return s;
    }
    let mut res = String::with_capacity(s.len() + s.len() / chunk_size);
    for (i, ch) in s.chars().enumerate() {
        if i > 0 && i % chunk_size == 0 {
            res.push(' ');
        }
        res.push(ch);
    }
    res
}
