//! Default theme for rendered fields.
//!
//! Templates and the renderer refer to semantic roles only; this module maps
//! those roles to classes. The defaults follow Bootstrap naming, and every role
//! can be overridden through [`RenderConfig::classes`].

use crate::config::RenderConfig;
use formtheme::Theme;
use once_cell::sync::Lazy;

pub mod roles {
    pub const FIELD: &str = "field";
    pub const CHECKBOX_FIELD: &str = "checkbox_field";
    pub const LABEL: &str = "label";
    pub const INPUT: &str = "input";
    pub const INPUT_ERROR: &str = "input_error";
    pub const CHECKBOX: &str = "checkbox";
    pub const HINT: &str = "hint";
    pub const ERROR: &str = "error";
}

pub static DEFAULT_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add(roles::FIELD, "mb-3")
        .add(roles::CHECKBOX_FIELD, "form-check mb-3")
        .add(roles::LABEL, "form-label")
        .add(roles::INPUT, "form-control")
        .add(roles::INPUT_ERROR, "is-invalid")
        .add(roles::CHECKBOX, "form-check-input")
        .add(roles::HINT, "form-text")
        .add(roles::ERROR, "invalid-feedback")
});

/// The default theme with the config's overrides applied.
pub fn configured(config: &RenderConfig) -> Theme {
    DEFAULT_THEME
        .clone()
        .missing_indicator(&config.missing_class_indicator)
        .merge(
            config
                .classes
                .iter()
                .map(|(role, classes)| (role.as_str(), classes.as_str())),
        )
}
