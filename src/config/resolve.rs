//! Wildcard substitution for configuration values.
//!
//! A wildcard is `%name%` where `name` is one or more ASCII word characters
//! (`[A-Za-z0-9_]`). A `%` that does not open a wildcard is kept as-is.

use super::ConfigError;

/// Replaces every `%name%` wildcard in `s` with `lookup(name)`.
///
/// Substitution is a single left-to-right pass; replacement text is not
/// scanned again. The first lookup failure aborts the whole replacement.
pub fn replace_wildcards<F>(s: &str, mut lookup: F) -> Result<String, ConfigError>
where
    F: FnMut(&str) -> Result<String, ConfigError>,
{
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find('%') {
        result.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let name_len = after.find(|c: char| !is_word_char(c)).unwrap_or(after.len());
        if name_len > 0 && after[name_len..].starts_with('%') {
            result.push_str(&lookup(&after[..name_len])?);
            rest = &after[name_len + 1..];
        } else {
            // Not a wildcard; rescan from the next character.
            result.push('%');
            rest = after;
        }
    }

    result.push_str(rest);
    Ok(result)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
