//! Naming utilities: automatic column names, slugs, and duplicate
//! disambiguation.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// Returns the letter name for a zero-based column position: `a` through
/// `z`, then `aa`, `ab`, and so on.
pub fn letter_name(index: usize) -> String {
    let mut n = index + 1;
    let mut out = Vec::new();

    while n > 0 {
        n -= 1;
        out.push(b'a' + (n % 26) as u8);
        n /= 26;
    }

    out.reverse();
    // Only ASCII letters are pushed above.
    String::from_utf8(out).unwrap_or_default()
}

/// Slugifies text: lowercase ASCII, every run of non-alphanumeric
/// characters becomes a single underscore, leading and trailing
/// underscores are trimmed.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_separator = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    out
}

/// Makes `name` unique against `taken` by appending `_2`, `_3`, ... when
/// needed. Returns the chosen name and whether it was changed.
pub fn deduplicate(name: &str, taken: &[String]) -> (String, bool) {
    if !taken.iter().any(|t| t == name) {
        return (String::from(name), false);
    }

    let mut suffix = 2usize;
    loop {
        let candidate = format!("{}_{}", name, suffix);
        if !taken.iter().any(|t| *t == candidate) {
            return (candidate, true);
        }
        suffix += 1;
    }
}
