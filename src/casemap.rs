//! IRC case-mapping functions.
//!
//! Buffer titles are compared with the `rfc1459` case mapping, where the
//! characters `[]\~` fold to `{}|^` in addition to ASCII lowercasing. This
//! is what servers apply to channel names and nicknames, so the directory
//! must apply it too or `#Chan` and `#chan` would become distinct buffers.

#[inline]
fn fold_char(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        'A'..='Z' => c.to_ascii_lowercase(),
        _ => c,
    }
}

/// Fold a string to IRC lowercase using the RFC 1459 case mapping.
///
/// Used to derive directory lookup keys from buffer titles.
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// Compare two strings with IRC case-insensitive equality.
pub fn irc_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.chars()
        .zip(b.chars())
        .all(|(ca, cb)| fold_char(ca) == fold_char(cb))
}
