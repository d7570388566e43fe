//! # Field Templates
//!
//! Markup for each part of a field lives in stand-alone template files under
//! `templates/`, included here as string constants. Keeping them out of the
//! Rust code makes them easier to diff and edit.
//!
//! Templates are minijinja based and rendered with HTML auto-escaping. A few
//! conventions:
//!
//! 1. Templates refer to semantic roles (`{{ "hint" | class }}`), never to CSS
//!    class names. The theme decides what a role looks like.
//! 2. Attribute lists arrive pre-merged as `attrs` entries of
//!    `{name, value, flag}`. Precedence is decided in Rust, not here.
//! 3. The `field` template only composes already rendered parts, which it
//!    receives as a list and marks `safe`.

pub const LABEL_TEMPLATE: &str = include_str!("templates/label.tmp");
pub const INPUT_TEMPLATE: &str = include_str!("templates/input.tmp");
pub const TEXTAREA_TEMPLATE: &str = include_str!("templates/textarea.tmp");
pub const HINT_TEMPLATE: &str = include_str!("templates/hint.tmp");
pub const ERROR_TEMPLATE: &str = include_str!("templates/error.tmp");
pub const FIELD_TEMPLATE: &str = include_str!("templates/field.tmp");

/// Template names paired with their sources, in registration order.
pub const ALL: &[(&str, &str)] = &[
    ("label", LABEL_TEMPLATE),
    ("input", INPUT_TEMPLATE),
    ("textarea", TEXTAREA_TEMPLATE),
    ("hint", HINT_TEMPLATE),
    ("error", ERROR_TEMPLATE),
    ("field", FIELD_TEMPLATE),
];
