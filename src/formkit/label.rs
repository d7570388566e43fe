//! Human-readable labels generated from attribute names.

/// Turns an attribute name into words: `user_first_name` and `UserFirstName`
/// both become `User First Name`.
///
/// - `_`, `-` and `.` separate words
/// - camelCase humps, the end of an acronym (`HTMLParser`) and the start of a
///   digit run (`line2`) separate words
/// - the first letter of each word is upper-cased, the rest left as-is
///
/// Applying it to its own output changes nothing.
pub fn generate(name: &str) -> String {
    let chars: Vec<char> = name
        .chars()
        .map(|c| if matches!(c, '_' | '-' | '.') { ' ' } else { c })
        .collect();

    let mut spaced = String::with_capacity(chars.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && starts_word(chars[i - 1], c, chars.get(i + 1).copied()) {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn starts_word(prev: char, c: char, next: Option<char>) -> bool {
    if c.is_uppercase() {
        if prev.is_lowercase() || prev.is_ascii_digit() {
            return true;
        }
        // acronym end: the last capital of "HTMLParser" belongs to "Parser".
        // Any non-lowercase letter counts, so titlecase letters (`ǅ`) split the
        // same before and after capitalization.
        return prev.is_alphabetic()
            && !prev.is_lowercase()
            && next.is_some_and(char::is_lowercase);
    }
    c.is_ascii_digit() && prev.is_alphabetic()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => std::iter::once(single).chain(chars).collect(),
        _ => word.to_string(),
    }
}
