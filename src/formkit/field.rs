//! # Field Rendering
//!
//! Renders one attribute of a [`Form`] as HTML: label, input, hint and error,
//! optionally wrapped in a field container.
//!
//! Layout and precedence decisions stay in Rust; templates only receive
//! pre-computed strings and attribute lists. Attributes are merged in this
//! order, highest precedence first:
//!
//! 1. caller attributes from [`FieldOptions::attrs`]
//! 2. computed attributes (`type`, `id`, `name`, `value`, `placeholder`, aria)
//! 3. rule-derived attributes (`required`, `maxlength`, ...)
//!
//! A caller-supplied `id` is also what the label's `for` and the hint's id
//! point at.
//!
//! A path that does not exist on the model renders with an empty value; any
//! other resolution failure is returned.

use crate::attrs::HtmlAttrs;
use crate::error::{FormError, Result};
use crate::form::Form;
use crate::meta;
use crate::model::{Node, Scalar};
use crate::path::AttributePath;
use crate::resolve;
use crate::rules::{self, Rule};
use crate::templates;
use crate::theme::{roles, DEFAULT_THEME};
use formtheme::{Renderer, Theme};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Password,
    Number,
    Url,
    Hidden,
    Textarea,
    Checkbox,
}

impl InputKind {
    /// Value of the `type` attribute (`textarea` for text areas).
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Email => "email",
            InputKind::Password => "password",
            InputKind::Number => "number",
            InputKind::Url => "url",
            InputKind::Hidden => "hidden",
            InputKind::Textarea => "textarea",
            InputKind::Checkbox => "checkbox",
        }
    }

    /// Kind implied by validation rules.
    pub fn from_rules(rules: &[Rule]) -> Self {
        rules::suggested_input_type(rules)
            .parse()
            .unwrap_or_default()
    }
}

impl FromStr for InputKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(InputKind::Text),
            "email" => Ok(InputKind::Email),
            "password" => Ok(InputKind::Password),
            "number" => Ok(InputKind::Number),
            "url" => Ok(InputKind::Url),
            "hidden" => Ok(InputKind::Hidden),
            "textarea" => Ok(InputKind::Textarea),
            "checkbox" => Ok(InputKind::Checkbox),
            other => Err(format!("Unknown input type: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldOptions {
    pub kind: InputKind,
    pub attrs: HtmlAttrs,
    pub show_hint: bool,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            kind: InputKind::Text,
            attrs: HtmlAttrs::new(),
            show_hint: true,
        }
    }
}

impl FieldOptions {
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.set(name, value);
        self
    }

    pub fn flag(mut self, name: &str) -> Self {
        self.attrs.set_flag(name);
        self
    }

    pub fn class(mut self, classes: &str) -> Self {
        self.attrs.add_class(classes);
        self
    }

    pub fn hide_hint(mut self) -> Self {
        self.show_hint = false;
        self
    }
}

#[derive(Serialize)]
struct LabelData<'a> {
    id: &'a str,
    label: &'a str,
}

#[derive(Serialize)]
struct InputData<'a> {
    attrs: Vec<crate::attrs::AttrEntry<'a>>,
    value: &'a str,
}

#[derive(Serialize)]
struct HintData<'a> {
    id: &'a str,
    hint: &'a str,
}

#[derive(Serialize)]
struct ErrorData<'a> {
    error: &'a str,
}

#[derive(Serialize)]
struct FieldData<'a> {
    wrapper: &'a str,
    parts: Vec<String>,
}

pub struct FieldRenderer {
    renderer: Renderer,
}

impl FieldRenderer {
    /// Creates a renderer for `theme`, compiling the field templates.
    pub fn new(theme: Theme) -> Result<Self> {
        let mut renderer = Renderer::new(theme);
        for (name, source) in templates::ALL {
            renderer.add_template(name, source)?;
        }
        Ok(Self { renderer })
    }

    pub fn with_default_theme() -> Result<Self> {
        Self::new(DEFAULT_THEME.clone())
    }

    fn classes(&self, role: &str) -> String {
        self.renderer.theme().classes().apply(role)
    }

    pub fn render_label(&self, form: &Form, raw_path: &str) -> Result<String> {
        let path = form.path(raw_path)?;
        self.label_html(form, &path, &path.input_id(form.name()))
    }

    fn label_html(&self, form: &Form, path: &AttributePath, id: &str) -> Result<String> {
        let label = meta::label(form.root(), path);
        Ok(self.renderer.render("label", &LabelData { id, label: &label })?)
    }

    pub fn render_hint(&self, form: &Form, raw_path: &str) -> Result<String> {
        let path = form.path(raw_path)?;
        self.hint_html(form, &path, &path.input_id(form.name()))
    }

    fn hint_html(&self, form: &Form, path: &AttributePath, id: &str) -> Result<String> {
        let hint = meta::hint(form.root(), path);
        Ok(self.renderer.render("hint", &HintData { id, hint: &hint })?)
    }

    /// Renders the first error recorded for the attribute, or nothing.
    pub fn render_error(&self, form: &Form, raw_path: &str) -> Result<String> {
        let path = form.path(raw_path)?;
        self.error_html(form, &path)
    }

    fn error_html(&self, form: &Form, path: &AttributePath) -> Result<String> {
        let error = form.first_error(path).unwrap_or_default();
        Ok(self.renderer.render("error", &ErrorData { error })?)
    }

    pub fn render_input(&self, form: &Form, raw_path: &str, options: &FieldOptions) -> Result<String> {
        let path = form.path(raw_path)?;
        self.input_html(form, &path, options)
    }

    fn input_html(&self, form: &Form, path: &AttributePath, options: &FieldOptions) -> Result<String> {
        let node = value_node(form.root(), path)?;
        let kind = options.kind;
        let id = field_id(form, path, options);
        let has_error = form.first_error(path).is_some();

        let mut attrs = HtmlAttrs::new();
        if kind != InputKind::Textarea {
            attrs.set("type", kind.as_str());
        }
        attrs.set("id", id.as_str());
        attrs.set("name", path.input_name(form.name()));

        let text = node.map(display_value).unwrap_or_default();
        match kind {
            InputKind::Checkbox => {
                attrs.set("value", "1");
                if node.is_some_and(is_checked) {
                    attrs.set_flag("checked");
                }
            }
            InputKind::Password | InputKind::Textarea => {}
            _ => attrs.set("value", text.as_str()),
        }

        if kind != InputKind::Hidden {
            let placeholder = meta::placeholder(form.root(), path);
            if !placeholder.is_empty() && kind != InputKind::Checkbox {
                attrs.set("placeholder", placeholder);
            }
            if options.show_hint && !meta::hint(form.root(), path).is_empty() {
                attrs.set("aria-describedby", format!("{}-hint", id));
            }
            if has_error {
                attrs.set("aria-invalid", "true");
            }
            rules::enrich(&mut attrs, form.rules_for(path), kind.as_str());

            let role = match kind {
                InputKind::Checkbox => roles::CHECKBOX,
                _ => roles::INPUT,
            };
            attrs.add_class(&self.classes(role));
            if has_error {
                attrs.add_class(&self.classes(roles::INPUT_ERROR));
            }
        }
        attrs.merge(&options.attrs);

        let template = match kind {
            InputKind::Textarea => "textarea",
            _ => "input",
        };
        let value = match kind {
            InputKind::Textarea => text.as_str(),
            _ => "",
        };
        Ok(self.renderer.render(
            template,
            &InputData {
                attrs: attrs.entries(),
                value,
            },
        )?)
    }

    /// Renders the complete field. Hidden inputs render bare.
    pub fn render_field(&self, form: &Form, raw_path: &str, options: &FieldOptions) -> Result<String> {
        let path = form.path(raw_path)?;
        tracing::debug!(path = %path, kind = options.kind.as_str(), "rendering field");

        let input = self.input_html(form, &path, options)?;
        if options.kind == InputKind::Hidden {
            return Ok(input);
        }

        let id = field_id(form, &path, options);
        let label = self.label_html(form, &path, &id)?;
        let mut parts = match options.kind {
            InputKind::Checkbox => vec![input, label],
            _ => vec![label, input],
        };
        if options.show_hint {
            parts.push(self.hint_html(form, &path, &id)?);
        }
        parts.push(self.error_html(form, &path)?);
        parts.retain(|part| !part.is_empty());

        let wrapper = match options.kind {
            InputKind::Checkbox => roles::CHECKBOX_FIELD,
            _ => roles::FIELD,
        };
        Ok(self
            .renderer
            .render("field", &FieldData { wrapper, parts })?)
    }
}

/// The input's id: the caller's `id` attribute when given, else the computed one.
fn field_id(form: &Form, path: &AttributePath, options: &FieldOptions) -> String {
    match options.attrs.get_text("id") {
        Some(id) => id.to_string(),
        None => path.input_id(form.name()),
    }
}

/// Resolves the rendered node; an undefined attribute has no value.
fn value_node<'a>(root: &'a Node, path: &AttributePath) -> Result<Option<&'a Node>> {
    match resolve::read(root, path) {
        Ok(node) => Ok(Some(node)),
        Err(FormError::UndefinedAttribute { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

fn display_value(node: &Node) -> String {
    match node {
        Node::Leaf(scalar) => scalar.to_string(),
        _ => String::new(),
    }
}

fn is_checked(node: &Node) -> bool {
    match node {
        Node::Leaf(Scalar::Bool(b)) => *b,
        Node::Leaf(Scalar::Int(i)) => *i != 0,
        Node::Leaf(Scalar::Str(s)) => s == "1" || s == "true" || s == "on",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn renderer() -> FieldRenderer {
        FieldRenderer::with_default_theme().unwrap()
    }

    fn signup() -> Form {
        Form::new(
            "User",
            Record::new("User")
                .with_label("email", "E-mail")
                .with_hint("email", "We never share it")
                .with_placeholder("email", "you@example.com")
                .with_field("email", "ada@example.com")
                .with_field("password", "hunter2")
                .with_field("bio", "<b>hi</b>")
                .with_field("newsletter", true)
                .with_field("token", "abc")
                .with_field(
                    "address",
                    Record::new("Address")
                        .with_label("city", "Town")
                        .with_field("city", "Lyon"),
                ),
        )
    }

    #[test]
    fn test_render_label() {
        let html = renderer().render_label(&signup(), "address[city]").unwrap();
        assert_eq!(
            html,
            r#"<label for="user-address-city" class="form-label">Town</label>"#
        );
    }

    #[test]
    fn test_render_input_attribute_order() {
        let form = Form::new("", Record::new("Search").with_field("q", "rust"));
        let html = renderer()
            .render_input(&form, "q", &FieldOptions::default())
            .unwrap();
        assert_eq!(
            html,
            r#"<input type="text" id="q" name="q" value="rust" class="form-control">"#
        );
    }

    #[test]
    fn test_render_input_computed_attributes() {
        let html = renderer()
            .render_input(&signup(), "email", &FieldOptions::new(InputKind::Email))
            .unwrap();
        assert!(html.starts_with("<input "));
        assert!(html.contains(r#"type="email""#));
        assert!(html.contains(r#"name="User[email]""#));
        assert!(html.contains(r#"id="user-email""#));
        assert!(html.contains(r#"placeholder="you@example.com""#));
        assert!(html.contains(r#"aria-describedby="user-email-hint""#));
        assert!(html.contains(r#"class="form-control""#));
    }

    #[test]
    fn test_caller_attributes_win() {
        let options = FieldOptions::default()
            .attr("id", "custom")
            .attr("maxlength", "5")
            .class("wide");
        let form = signup()
            .with_rules(
                "address.city",
                vec![Rule::Length {
                    min: None,
                    max: Some(64),
                }],
            )
            .unwrap();
        let html = renderer()
            .render_input(&form, "address.city", &options)
            .unwrap();
        assert!(html.contains(r#"id="custom""#));
        assert!(html.contains(r#"maxlength="5""#));
        assert!(!html.contains(r#"maxlength="64""#));
        assert!(html.contains(r#"class="form-control wide""#));
    }

    #[test]
    fn test_rules_enrich_input() {
        let form = signup()
            .with_rules("address.city", vec![Rule::Required])
            .unwrap();
        let html = renderer()
            .render_input(&form, "address.city", &FieldOptions::default())
            .unwrap();
        assert!(html.contains(" required"));
        assert!(html.contains(r#"aria-required="true""#));
    }

    #[test]
    fn test_error_marks_input_invalid() {
        let form = signup()
            .with_error("address[city]", "Unknown city")
            .unwrap();
        let renderer = renderer();
        let input = renderer
            .render_input(&form, "address.city", &FieldOptions::default())
            .unwrap();
        assert!(input.contains(r#"aria-invalid="true""#));
        assert!(input.contains(r#"class="form-control is-invalid""#));

        let error = renderer.render_error(&form, "address.city").unwrap();
        assert_eq!(error, r#"<div class="invalid-feedback">Unknown city</div>"#);
    }

    #[test]
    fn test_no_error_renders_nothing() {
        let html = renderer().render_error(&signup(), "email").unwrap();
        assert_eq!(html, "");
    }

    #[test]
    fn test_password_never_echoes_value() {
        let html = renderer()
            .render_input(&signup(), "password", &FieldOptions::new(InputKind::Password))
            .unwrap();
        assert!(!html.contains("hunter2"));
        assert!(!html.contains("value="));
    }

    #[test]
    fn test_textarea_escapes_body() {
        let html = renderer()
            .render_input(&signup(), "bio", &FieldOptions::new(InputKind::Textarea))
            .unwrap();
        assert!(html.starts_with("<textarea "));
        assert!(!html.contains("type="));
        assert!(html.contains("&lt;b&gt;hi&lt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_checkbox() {
        let html = renderer()
            .render_input(&signup(), "newsletter", &FieldOptions::new(InputKind::Checkbox))
            .unwrap();
        assert!(html.contains(r#"type="checkbox""#));
        assert!(html.contains(r#"value="1""#));
        assert!(html.contains(" checked"));
        assert!(html.contains(r#"class="form-check-input""#));
    }

    #[test]
    fn test_hidden_field_renders_bare_input() {
        let html = renderer()
            .render_field(&signup(), "token", &FieldOptions::new(InputKind::Hidden))
            .unwrap();
        assert_eq!(
            html,
            r#"<input type="hidden" id="user-token" name="User[token]" value="abc">"#
        );
    }

    #[test]
    fn test_render_field_composes_parts() {
        let html = renderer()
            .render_field(&signup(), "email", &FieldOptions::new(InputKind::Email))
            .unwrap();
        let expected_start = "<div class=\"mb-3\">\n  <label for=\"user-email\" class=\"form-label\">E-mail</label>\n  <input ";
        assert!(html.starts_with(expected_start), "got: {html}");
        assert!(html.contains(
            "\n  <div id=\"user-email-hint\" class=\"form-text\">We never share it</div>"
        ));
        assert!(html.ends_with("\n</div>"));
        assert!(!html.contains("invalid-feedback"));
    }

    #[test]
    fn test_render_field_follows_caller_id() {
        let html = renderer()
            .render_field(
                &signup(),
                "email",
                &FieldOptions::new(InputKind::Email).attr("id", "custom"),
            )
            .unwrap();
        assert!(html.contains(r#"<label for="custom""#), "got: {html}");
        assert!(html.contains(r#"id="custom""#));
        assert!(html.contains(r#"aria-describedby="custom-hint""#));
        assert!(html.contains(r#"<div id="custom-hint""#));
        assert!(!html.contains("user-email"));
    }

    #[test]
    fn test_render_field_without_hint() {
        let html = renderer()
            .render_field(
                &signup(),
                "email",
                &FieldOptions::new(InputKind::Email).hide_hint(),
            )
            .unwrap();
        assert!(!html.contains("We never share it"));
        assert!(!html.contains("aria-describedby"));
    }

    #[test]
    fn test_checkbox_field_puts_input_first() {
        let html = renderer()
            .render_field(&signup(), "newsletter", &FieldOptions::new(InputKind::Checkbox))
            .unwrap();
        assert!(html.starts_with("<div class=\"form-check mb-3\">\n  <input "));
        assert!(html.contains("Newsletter</label>"));
    }

    #[test]
    fn test_undefined_attribute_renders_empty_value() {
        let html = renderer()
            .render_input(&signup(), "address.zip", &FieldOptions::default())
            .unwrap();
        assert!(html.contains(r#"value="""#));
    }

    #[test]
    fn test_not_nestable_propagates() {
        let result = renderer().render_input(&signup(), "email.domain", &FieldOptions::default());
        assert!(matches!(result, Err(FormError::NotNestable { .. })));
    }

    #[test]
    fn test_custom_theme_missing_role_indicator() {
        let theme = Theme::new().add("input", "input");
        let renderer = FieldRenderer::new(theme).unwrap();
        let html = renderer.render_label(&signup(), "email").unwrap();
        assert!(html.contains(r#"class="unstyled-label""#));
    }

    #[test]
    fn test_input_kind_from_rules() {
        assert_eq!(InputKind::from_rules(&[Rule::Email]), InputKind::Email);
        assert_eq!(InputKind::from_rules(&[Rule::Required]), InputKind::Text);
        assert_eq!("textarea".parse::<InputKind>(), Ok(InputKind::Textarea));
        assert!("select".parse::<InputKind>().is_err());
    }
}
