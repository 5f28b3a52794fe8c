//! Label derivation from property keys.

/// Turn a property key into a display label.
///
/// A space goes before every ASCII capital, the result is trimmed and its first
/// character upper-cased: `firstName` becomes `First Name`.
pub fn format_label(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }

    let trimmed = spaced.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
