//! # Form
//!
//! A [`Form`] pairs a root model with everything the renderer needs besides the
//! model itself: the form name used to scope input names, validation errors
//! produced by the caller's validator, and the rules used for attribute
//! enrichment.
//!
//! Errors and rules are keyed by normalized attribute path, so `address[city]`
//! and `address.city` address the same attribute.

use crate::error::Result;
use crate::meta;
use crate::model::{MetaKind, Node};
use crate::path::{normalize, AttributePath};
use crate::resolve;
use crate::rules::Rule;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Form {
    name: String,
    root: Node,
    errors: BTreeMap<String, Vec<String>>,
    rules: BTreeMap<String, Vec<Rule>>,
}

impl Form {
    /// Creates a form. An empty `name` leaves input names unscoped.
    pub fn new(name: &str, root: impl Into<Node>) -> Self {
        Self {
            name: name.to_string(),
            root: root.into(),
            errors: BTreeMap::new(),
            rules: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Records a validation error for an attribute.
    pub fn add_error(&mut self, raw_path: &str, message: &str) -> Result<()> {
        let key = normalize(raw_path)?.to_dotted();
        self.errors.entry(key).or_default().push(message.to_string());
        Ok(())
    }

    /// Declares validation rules for an attribute.
    pub fn add_rules(&mut self, raw_path: &str, rules: Vec<Rule>) -> Result<()> {
        let key = normalize(raw_path)?.to_dotted();
        self.rules.entry(key).or_default().extend(rules);
        Ok(())
    }

    pub fn with_error(mut self, raw_path: &str, message: &str) -> Result<Self> {
        self.add_error(raw_path, message)?;
        Ok(self)
    }

    pub fn with_rules(mut self, raw_path: &str, rules: Vec<Rule>) -> Result<Self> {
        self.add_rules(raw_path, rules)?;
        Ok(self)
    }

    pub fn path(&self, raw_path: &str) -> Result<AttributePath> {
        normalize(raw_path)
    }

    pub fn value(&self, raw_path: &str) -> Result<&Node> {
        resolve::read(&self.root, &normalize(raw_path)?)
    }

    pub fn has_attribute(&self, raw_path: &str) -> Result<bool> {
        resolve::has_attribute(&self.root, &normalize(raw_path)?)
    }

    pub fn meta(&self, raw_path: &str, kind: MetaKind) -> Result<Option<&str>> {
        Ok(meta::read_meta(&self.root, &normalize(raw_path)?, kind))
    }

    pub fn label(&self, raw_path: &str) -> Result<String> {
        Ok(meta::label(&self.root, &normalize(raw_path)?))
    }

    pub fn hint(&self, raw_path: &str) -> Result<String> {
        Ok(meta::hint(&self.root, &normalize(raw_path)?))
    }

    pub fn placeholder(&self, raw_path: &str) -> Result<String> {
        Ok(meta::placeholder(&self.root, &normalize(raw_path)?))
    }

    pub fn input_name(&self, raw_path: &str) -> Result<String> {
        Ok(normalize(raw_path)?.input_name(&self.name))
    }

    pub fn input_id(&self, raw_path: &str) -> Result<String> {
        Ok(normalize(raw_path)?.input_id(&self.name))
    }

    pub fn errors_for(&self, path: &AttributePath) -> &[String] {
        self.errors
            .get(&path.to_dotted())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn first_error(&self, path: &AttributePath) -> Option<&str> {
        self.errors_for(path).first().map(String::as_str)
    }

    /// Whether any attribute has errors.
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|messages| !messages.is_empty())
    }

    pub fn rules_for(&self, path: &AttributePath) -> &[Rule] {
        self.rules
            .get(&path.to_dotted())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
