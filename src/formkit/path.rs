//! # Attribute Paths
//!
//! Attributes of nested models are addressed by paths written either in dot
//! notation (`address.city`), bracket notation (`address[city]`, the shape HTML
//! input names take) or a mix of both (`tags[0].name`). All of them normalize to
//! the same ordered list of segments.
//!
//! Normalization steps:
//!
//! 1. every `][` becomes `.`
//! 2. every remaining `[` becomes `.`
//! 3. trailing `]` characters are stripped
//! 4. the result is split on `.`
//!
//! Paths with empty segments (`a..b`, `.a`, `a.`, `a[]`) and segments that
//! still hold a stray `]` (`a[b]c`) are rejected rather than collapsed.

use crate::error::{FormError, Result};
use std::fmt;
use std::str::FromStr;

/// A normalized, non-empty attribute path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributePath {
    segments: Vec<String>,
}

/// Normalizes a raw dot/bracket path into its segments.
pub fn normalize(raw: &str) -> Result<AttributePath> {
    if raw.is_empty() {
        return Err(malformed(raw, "path is empty"));
    }

    let dotted = raw.replace("][", ".").replace('[', ".");
    let dotted = dotted.trim_end_matches(']');

    let mut segments = Vec::new();
    for segment in dotted.split('.') {
        if segment.is_empty() {
            return Err(malformed(raw, "path contains an empty segment"));
        }
        if segment.contains(']') {
            return Err(malformed(raw, "unbalanced bracket"));
        }
        segments.push(segment.to_string());
    }

    Ok(AttributePath { segments })
}

fn malformed(raw: &str, reason: &'static str) -> FormError {
    FormError::MalformedPath {
        path: raw.to_string(),
        reason,
    }
}

impl AttributePath {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments; never zero.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The attribute's own name (final segment).
    pub fn last(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Dot-joined sub-path starting at segment `from`.
    ///
    /// Returns an empty string when `from` is past the end.
    pub fn remaining(&self, from: usize) -> String {
        self.segments
            .get(from..)
            .map(|rest| rest.join("."))
            .unwrap_or_default()
    }

    pub fn to_dotted(&self) -> String {
        self.segments.join(".")
    }

    /// Bracket form: `a[b][c]`.
    pub fn to_bracketed(&self) -> String {
        let mut out = self.segments[0].clone();
        for segment in &self.segments[1..] {
            out.push('[');
            out.push_str(segment);
            out.push(']');
        }
        out
    }

    /// HTML input name, scoped by the form name when there is one:
    /// `User[address][city]`.
    pub fn input_name(&self, form_name: &str) -> String {
        if form_name.is_empty() {
            return self.to_bracketed();
        }
        let mut out = form_name.to_string();
        for segment in &self.segments {
            out.push('[');
            out.push_str(segment);
            out.push(']');
        }
        out
    }

    /// HTML id: lowercase, non-word characters replaced by `-`: `user-address-city`.
    pub fn input_id(&self, form_name: &str) -> String {
        let raw = if form_name.is_empty() {
            self.segments.join("-")
        } else {
            format!("{}-{}", form_name, self.segments.join("-"))
        };
        let mut id = String::with_capacity(raw.len());
        for c in raw.chars() {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                id.extend(c.to_lowercase());
            } else {
                id.push('-');
            }
        }
        id
    }
}

impl FromStr for AttributePath {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        normalize(s)
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dotted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn segments(raw: &str) -> Vec<String> {
        normalize(raw).unwrap().segments().to_vec()
    }

    #[test]
    fn test_dot_notation() {
        assert_eq!(segments("a.b.c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_bracket_notation() {
        assert_eq!(segments("a[b][c]"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_mixed_notation() {
        assert_eq!(segments("a[b].c"), vec!["a", "b", "c"]);
        assert_eq!(segments("tags[0].name"), vec!["tags", "0", "name"]);
    }

    #[test]
    fn test_single_segment() {
        assert_eq!(segments("title"), vec!["title"]);
    }

    #[test]
    fn test_end_to_end_bracket_path() {
        assert_eq!(
            segments("profile[address][city]"),
            vec!["profile", "address", "city"]
        );
    }

    #[test]
    fn test_empty_path_is_malformed() {
        assert!(matches!(
            normalize(""),
            Err(FormError::MalformedPath { .. })
        ));
    }

    #[test]
    fn test_empty_segments_are_rejected() {
        for raw in ["a..b", ".a", "a.", "a[]", "[a]", "a[b][]"] {
            assert!(
                matches!(normalize(raw), Err(FormError::MalformedPath { .. })),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_stray_bracket_is_rejected() {
        assert!(matches!(
            normalize("a[b]c"),
            Err(FormError::MalformedPath { .. })
        ));
    }

    #[test]
    fn test_trailing_brackets_are_trimmed() {
        assert_eq!(segments("a[b]]"), vec!["a", "b"]);
        assert_eq!(normalize("a[b]]").unwrap(), normalize("a[b]").unwrap());
    }

    #[test]
    fn test_remaining() {
        let path = normalize("a.b.c").unwrap();
        assert_eq!(path.remaining(0), "a.b.c");
        assert_eq!(path.remaining(1), "b.c");
        assert_eq!(path.remaining(2), "c");
        assert_eq!(path.remaining(3), "");
    }

    #[test]
    fn test_bracketed_and_dotted_forms() {
        let path = normalize("profile.address[city]").unwrap();
        assert_eq!(path.to_dotted(), "profile.address.city");
        assert_eq!(path.to_bracketed(), "profile[address][city]");
        assert_eq!(path.to_string(), "profile.address.city");
        assert_eq!(path.last(), "city");
    }

    #[test]
    fn test_input_name() {
        let path = normalize("address.city").unwrap();
        assert_eq!(path.input_name("User"), "User[address][city]");
        assert_eq!(path.input_name(""), "address[city]");
    }

    #[test]
    fn test_input_id() {
        let path = normalize("address.city").unwrap();
        assert_eq!(path.input_id("User"), "user-address-city");
        assert_eq!(path.input_id(""), "address-city");

        let odd = normalize("my field").unwrap();
        assert_eq!(odd.input_id("Sign Up"), "sign-up-my-field");

        let accented = normalize("Élan").unwrap();
        assert_eq!(accented.input_id("Ünité"), "ünité-élan");
    }

    #[test]
    fn test_from_str() {
        let path: AttributePath = "a[b]".parse().unwrap();
        assert_eq!(path, normalize("a.b").unwrap());
    }

    fn identifier() -> impl Strategy<Value = String> {
        "[a-zA-Z_][a-zA-Z0-9_]{0,8}"
    }

    proptest! {
        #[test]
        fn prop_dot_and_bracket_forms_agree(parts in prop::collection::vec(identifier(), 1..6)) {
            let dotted = parts.join(".");
            let dotted_path = normalize(&dotted).unwrap();
            let bracketed_path = normalize(&dotted_path.to_bracketed()).unwrap();
            prop_assert_eq!(dotted_path, bracketed_path);
        }

        #[test]
        fn prop_segment_count_is_separators_plus_one(parts in prop::collection::vec(identifier(), 1..6)) {
            let dotted = parts.join(".");
            let separators = dotted.matches('.').count();
            prop_assert_eq!(normalize(&dotted).unwrap().len(), separators + 1);
        }
    }
}
