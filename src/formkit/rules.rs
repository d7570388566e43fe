//! Validation rules as HTML attribute sources.
//!
//! Validation itself happens elsewhere; these descriptors only let the renderer
//! mirror server-side constraints as client-side HTML attributes. Rule-derived
//! attributes never override anything already set.

use crate::attrs::HtmlAttrs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    Required,
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
    Range {
        min: Option<f64>,
        max: Option<f64>,
    },
    Pattern {
        regex: String,
    },
    Email,
    Url,
}

const TEXT_LIKE: &[&str] = &["text", "email", "password", "search", "tel", "url", "textarea"];
const NUMERIC: &[&str] = &["number", "range"];

pub fn is_required(rules: &[Rule]) -> bool {
    rules.iter().any(|rule| matches!(rule, Rule::Required))
}

/// Input type implied by the rules; `text` when nothing more specific applies.
pub fn suggested_input_type(rules: &[Rule]) -> &'static str {
    for rule in rules {
        match rule {
            Rule::Email => return "email",
            Rule::Url => return "url",
            Rule::Range { .. } => return "number",
            _ => {}
        }
    }
    "text"
}

/// Adds the attributes implied by `rules` to an input of `input_type`
/// (`textarea` for text areas).
pub fn enrich(attrs: &mut HtmlAttrs, rules: &[Rule], input_type: &str) {
    let text_like = TEXT_LIKE.contains(&input_type);
    let numeric = NUMERIC.contains(&input_type);

    for rule in rules {
        match rule {
            Rule::Required => {
                attrs.set_default_flag("required");
                attrs.set_default("aria-required", "true");
            }
            Rule::Length { min, max } if text_like => {
                if let Some(min) = min {
                    attrs.set_default("minlength", min.to_string());
                }
                if let Some(max) = max {
                    attrs.set_default("maxlength", max.to_string());
                }
            }
            Rule::Range { min, max } if numeric => {
                if let Some(min) = min {
                    attrs.set_default("min", min.to_string());
                }
                if let Some(max) = max {
                    attrs.set_default("max", max.to_string());
                }
            }
            Rule::Pattern { regex } if text_like && input_type != "textarea" => {
                attrs.set_default("pattern", regex.as_str());
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::AttrValue;

    #[test]
    fn test_required_adds_flag_and_aria() {
        let mut attrs = HtmlAttrs::new();
        enrich(&mut attrs, &[Rule::Required], "text");
        assert_eq!(attrs.get("required"), Some(&AttrValue::Flag));
        assert_eq!(attrs.get_text("aria-required"), Some("true"));
    }

    #[test]
    fn test_length_only_for_text_like_inputs() {
        let rules = [Rule::Length {
            min: Some(2),
            max: Some(40),
        }];

        let mut text = HtmlAttrs::new();
        enrich(&mut text, &rules, "textarea");
        assert_eq!(text.get_text("minlength"), Some("2"));
        assert_eq!(text.get_text("maxlength"), Some("40"));

        let mut checkbox = HtmlAttrs::new();
        enrich(&mut checkbox, &rules, "checkbox");
        assert!(checkbox.is_empty());
    }

    #[test]
    fn test_range_only_for_numeric_inputs() {
        let rules = [Rule::Range {
            min: Some(0.0),
            max: Some(10.5),
        }];

        let mut number = HtmlAttrs::new();
        enrich(&mut number, &rules, "number");
        assert_eq!(number.get_text("min"), Some("0"));
        assert_eq!(number.get_text("max"), Some("10.5"));

        let mut text = HtmlAttrs::new();
        enrich(&mut text, &rules, "text");
        assert!(text.is_empty());
    }

    #[test]
    fn test_rules_never_override_existing_attributes() {
        let mut attrs = HtmlAttrs::new();
        attrs.set("maxlength", "8");
        enrich(
            &mut attrs,
            &[Rule::Length {
                min: None,
                max: Some(255),
            }],
            "text",
        );
        assert_eq!(attrs.get_text("maxlength"), Some("8"));
    }

    #[test]
    fn test_pattern() {
        let mut attrs = HtmlAttrs::new();
        enrich(
            &mut attrs,
            &[Rule::Pattern {
                regex: "[0-9]{5}".into(),
            }],
            "text",
        );
        assert_eq!(attrs.get_text("pattern"), Some("[0-9]{5}"));
    }

    #[test]
    fn test_suggested_input_type() {
        assert_eq!(suggested_input_type(&[Rule::Required, Rule::Email]), "email");
        assert_eq!(suggested_input_type(&[Rule::Url]), "url");
        assert_eq!(
            suggested_input_type(&[Rule::Range {
                min: None,
                max: None
            }]),
            "number"
        );
        assert_eq!(suggested_input_type(&[Rule::Required]), "text");
    }

    #[test]
    fn test_rules_deserialize_from_json() {
        let rules: Vec<Rule> = serde_json::from_str(
            r#"[{"rule":"required"},{"rule":"length","min":null,"max":12},{"rule":"email"}]"#,
        )
        .unwrap();
        assert!(is_required(&rules));
        assert_eq!(
            rules[1],
            Rule::Length {
                min: None,
                max: Some(12)
            }
        );
    }
}
