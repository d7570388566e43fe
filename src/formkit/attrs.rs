//! Ordered HTML attribute maps.
//!
//! Rendering an input merges attributes from several sources. The order of
//! precedence, highest first:
//!
//! 1. attributes passed by the caller
//! 2. attributes computed from the form (`id`, `name`, `value`, `placeholder`)
//! 3. attributes derived from validation rules
//!
//! Higher sources are applied first and lower ones only fill gaps through
//! [`HtmlAttrs::set_default`]. `class` is the exception: classes accumulate.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    /// Boolean attribute rendered by name alone (`required`).
    Flag,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlAttrs {
    entries: Vec<(String, AttrValue)>,
}

/// Template view of one attribute.
#[derive(Debug, Serialize)]
pub struct AttrEntry<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub flag: bool,
}

impl HtmlAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `key=value` pairs; a bare `key` is a flag.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut attrs = Self::new();
        for pair in pairs {
            match pair.as_ref().split_once('=') {
                Some((name, value)) => attrs.set(name.trim(), value),
                None => attrs.set_flag(pair.as_ref().trim()),
            }
        }
        attrs
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    fn put(&mut self, name: &str, value: AttrValue) {
        match self.position(name) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.put(name, AttrValue::Text(value.into()));
    }

    pub fn set_flag(&mut self, name: &str) {
        self.put(name, AttrValue::Flag);
    }

    /// Sets `name` only when it is not present yet.
    pub fn set_default(&mut self, name: &str, value: impl Into<String>) {
        if !self.contains(name) {
            self.set(name, value);
        }
    }

    pub fn set_default_flag(&mut self, name: &str) {
        if !self.contains(name) {
            self.set_flag(name);
        }
    }

    /// Appends classes, skipping ones already present.
    pub fn add_class(&mut self, classes: &str) {
        let mut current: Vec<String> = match self.get("class") {
            Some(AttrValue::Text(existing)) => {
                existing.split_whitespace().map(str::to_string).collect()
            }
            _ => Vec::new(),
        };
        for class in classes.split_whitespace() {
            if !current.iter().any(|c| c == class) {
                current.push(class.to_string());
            }
        }
        if current.is_empty() {
            return;
        }
        self.set("class", current.join(" "));
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.position(name).map(|i| &self.entries[i].1)
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(AttrValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        self.position(name).map(|i| self.entries.remove(i).1)
    }

    /// Overlays `other`; its values win, except `class`, which accumulates.
    pub fn merge(&mut self, other: &HtmlAttrs) {
        for (name, value) in &other.entries {
            match (name.as_str(), value) {
                ("class", AttrValue::Text(classes)) => self.add_class(classes),
                _ => self.put(name, value.clone()),
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> Vec<AttrEntry<'_>> {
        self.entries
            .iter()
            .map(|(name, value)| match value {
                AttrValue::Text(text) => AttrEntry {
                    name,
                    value: text,
                    flag: false,
                },
                AttrValue::Flag => AttrEntry {
                    name,
                    value: "",
                    flag: true,
                },
            })
            .collect()
    }
}
