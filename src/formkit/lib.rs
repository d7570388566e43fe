//! # Formkit Architecture
//!
//! Formkit renders HTML form fields on the server. Given a model and an attribute path such as
//! `address[city]`, it produces the label, input, hint and error markup for that attribute.
//!
//! The interesting part is not the markup but getting from a path to the right value and the
//! right label when models nest.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Loads JSON models and config, prints results             │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Rendering (field.rs, templates.rs, theme.rs, attrs.rs,     │
//! │  rules.rs)                                                  │
//! │  - Merges attributes, applies the theme, renders templates  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Form facade (form.rs)                                      │
//! │  - Root model + form name + caller-supplied errors/rules    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Resolution core (path.rs, resolve.rs, meta.rs, label.rs)   │
//! │  - Stateless, read-only walks over the model graph          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Resolution Is Stateless
//!
//! Every call normalizes its path and walks the model from the root again. Nothing is cached and
//! the model is only ever borrowed immutably, so a model cannot change under a running walk.
//!
//! Resolution failures ([`error::FormError::MalformedPath`],
//! [`error::FormError::UndefinedAttribute`], [`error::FormError::NotNestable`]) are returned to
//! the caller untouched. Deciding that a missing attribute simply renders empty is the
//! renderer's call, not the resolver's.
//!
//! ## Example
//!
//! ```rust
//! use formkit::field::{FieldOptions, FieldRenderer, InputKind};
//! use formkit::form::Form;
//! use formkit::model::Record;
//!
//! let user = Record::new("User").with_field(
//!     "address",
//!     Record::new("Address")
//!         .with_label("city", "Town")
//!         .with_field("city", "Lyon"),
//! );
//! let form = Form::new("User", user);
//!
//! assert_eq!(form.label("address[city]").unwrap(), "Town");
//!
//! let renderer = FieldRenderer::with_default_theme().unwrap();
//! let html = renderer
//!     .render_input(&form, "address.city", &FieldOptions::new(InputKind::Text))
//!     .unwrap();
//! assert!(html.contains(r#"name="User[address][city]""#));
//! ```
//!
//! ## Module Overview
//!
//! - [`path`]: Path normalization (`a[b].c` → `a`, `b`, `c`)
//! - [`model`]: The model graph (`Node`, `Record`, `Container`, `Metadata`)
//! - [`resolve`]: Value reader and resolution trails
//! - [`meta`]: Label/hint/placeholder reader
//! - [`label`]: Label generation from attribute names
//! - [`form`]: The form facade
//! - [`attrs`]: Ordered HTML attribute maps
//! - [`rules`]: Validation rules as attribute sources
//! - [`field`]: Field rendering
//! - [`theme`]: Default theme and roles
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod attrs;
pub mod config;
pub mod error;
pub mod field;
pub mod form;
pub mod label;
pub mod meta;
pub mod model;
pub mod path;
pub mod resolve;
pub mod rules;
pub mod templates;
pub mod theme;
