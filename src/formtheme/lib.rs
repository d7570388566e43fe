//! # Formtheme - Themed HTML Template Rendering
//!
//! A lightweight system for rendering HTML fragments from templates while keeping
//! CSS class names out of the templates themselves.
//!
//! ## The Problem
//!
//! Form markup needs framework-specific classes (`form-control`, `is-invalid`, ...), but:
//! - Hard-coding class names in templates ties every template to one CSS framework
//! - Switching frameworks means editing every template
//! - Typos in class names fail silently in the browser
//!
//! ## The Solution
//!
//! Formtheme separates concerns:
//! - **Templates** define structure using Jinja2 syntax (via minijinja)
//! - **Themes** map semantic *roles* (`label`, `input`, `hint`) to CSS classes
//! - **The `class` filter** resolves a role inside a template
//!
//! ## Quick Example
//!
//! ```rust
//! use formtheme::{render, Theme};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data {
//!     label: String,
//! }
//!
//! let theme = Theme::new()
//!     .add("label", "form-label")
//!     .add("input", "form-control");
//!
//! let template = r#"<label class="{{ "label" | class }}">{{ label }}</label>"#;
//!
//! let data = Data { label: "Name & Surname".into() };
//! let output = render(template, &data, &theme).unwrap();
//! assert_eq!(output, r#"<label class="form-label">Name &amp; Surname</label>"#);
//! ```
//!
//! ## Escaping
//!
//! Every template is registered under a `.html` name, so minijinja's HTML
//! auto-escaping applies to all interpolated values. Use the `safe` filter for
//! pre-rendered markup.
//!
//! ## Renderer for Multiple Templates
//!
//! ```rust
//! use formtheme::{Renderer, Theme};
//! # use serde::Serialize;
//! # #[derive(Serialize)]
//! # struct HintData { text: String }
//!
//! let theme = Theme::new().add("hint", "form-text");
//!
//! let mut renderer = Renderer::new(theme);
//! renderer.add_template("hint", r#"<div class="{{ "hint" | class }}">{{ text }}</div>"#).unwrap();
//!
//! let output = renderer.render("hint", &HintData { text: "optional".into() }).unwrap();
//! assert_eq!(output, r#"<div class="form-text">optional</div>"#);
//! ```

use minijinja::{Environment, Error};
use serde::Serialize;
use std::collections::HashMap;

/// Default prefix used when a role is not found.
pub const DEFAULT_MISSING_CLASS_INDICATOR: &str = "unstyled";

const INLINE_TEMPLATE: &str = "_inline.html";

/// A collection of named class roles.
///
/// Roles are registered by name and resolved via the `class` filter in templates.
/// When a role is not found, the missing indicator is joined with the role name
/// (`unstyled-hint`) so a forgotten role is visible in the generated markup.
///
/// # Example
///
/// ```rust
/// use formtheme::Classes;
///
/// let classes = Classes::new()
///     .add("input", "form-control")
///     .add("error", "invalid-feedback");
///
/// assert_eq!(classes.apply("input"), "form-control");
/// assert_eq!(classes.apply("typo"), "unstyled-typo");
/// ```
#[derive(Debug, Clone)]
pub struct Classes {
    roles: HashMap<String, String>,
    missing_indicator: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            roles: HashMap::new(),
            missing_indicator: DEFAULT_MISSING_CLASS_INDICATOR.to_string(),
        }
    }
}

impl Classes {
    /// Creates an empty registry with the default missing indicator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indicator used for unknown roles. An empty indicator renders
    /// unknown roles as an empty class list.
    ///
    /// ```rust
    /// use formtheme::Classes;
    ///
    /// let classes = Classes::new().missing_indicator("todo");
    /// assert_eq!(classes.apply("label"), "todo-label");
    ///
    /// let silent = Classes::new().missing_indicator("");
    /// assert_eq!(silent.apply("label"), "");
    /// ```
    pub fn missing_indicator(mut self, indicator: &str) -> Self {
        self.missing_indicator = indicator.to_string();
        self
    }

    /// Adds a role. If the role exists, it is replaced.
    pub fn add(mut self, role: &str, classes: &str) -> Self {
        self.roles.insert(role.to_string(), classes.to_string());
        self
    }

    /// Resolves a role to its class string.
    pub fn apply(&self, role: &str) -> String {
        match self.roles.get(role) {
            Some(classes) => classes.clone(),
            None if self.missing_indicator.is_empty() => String::new(),
            None => format!("{}-{}", self.missing_indicator, role),
        }
    }

    /// Returns the classes for a role, if registered.
    pub fn get(&self, role: &str) -> Option<&str> {
        self.roles.get(role).map(String::as_str)
    }

    /// Returns true if a role with the given name exists.
    pub fn has(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    /// Returns the number of registered roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns true if no roles are registered.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// A named collection of class roles used when rendering templates.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    classes: Classes,
}

impl Theme {
    /// Creates an empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a role, returning an updated theme for chaining.
    pub fn add(mut self, role: &str, classes: &str) -> Self {
        self.classes = self.classes.add(role, classes);
        self
    }

    /// Sets the indicator used for unknown roles.
    pub fn missing_indicator(mut self, indicator: &str) -> Self {
        self.classes = self.classes.missing_indicator(indicator);
        self
    }

    /// Overlays `(role, classes)` pairs onto this theme. Overridden roles take
    /// the new classes; the missing indicator is kept.
    pub fn merge<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (role, classes) in overrides {
            self.classes = self.classes.add(role, classes);
        }
        self
    }

    /// Returns the underlying class registry.
    pub fn classes(&self) -> &Classes {
        &self.classes
    }
}

/// Renders an inline template once.
///
/// # Arguments
///
/// * `template` - A minijinja template string
/// * `data` - Any serializable data to pass to the template
/// * `theme` - Theme used by the `class` filter
pub fn render<T: Serialize>(template: &str, data: &T, theme: &Theme) -> Result<String, Error> {
    let mut env = Environment::new();
    register_class_filter(&mut env, theme);

    env.add_template_owned(INLINE_TEMPLATE.to_string(), template.to_string())?;
    let tmpl = env.get_template(INLINE_TEMPLATE)?;
    tmpl.render(data)
}

/// A renderer with pre-registered templates.
///
/// Templates are compiled once and reused. Names are registered with an
/// `.html` suffix so auto-escaping applies; callers use the bare name.
pub struct Renderer {
    env: Environment<'static>,
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        let mut env = Environment::new();
        register_class_filter(&mut env, &theme);
        Self { env, theme }
    }

    /// Registers a named template.
    ///
    /// The template is compiled immediately; errors are returned if syntax is invalid.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), Error> {
        self.env
            .add_template_owned(html_name(name), source.to_string())
    }

    /// Renders a registered template with the given data.
    ///
    /// # Errors
    ///
    /// Returns an error if the template name is not found or rendering fails.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, Error> {
        let tmpl = self.env.get_template(&html_name(name))?;
        tmpl.render(data)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}

fn html_name(name: &str) -> String {
    format!("{}.html", name)
}

/// Registers the `class` filter on a minijinja environment.
fn register_class_filter(env: &mut Environment<'static>, theme: &Theme) {
    let classes = theme.classes.clone();
    env.add_filter("class", move |role: String| -> String { classes.apply(&role) });
}
