//! # Model Graph
//!
//! Forms are backed by a graph of [`Node`]s. Each node is classified once, when
//! it is built, into one of three shapes:
//!
//! - [`Node::Leaf`]: a scalar that cannot be descended into
//! - [`Node::Container`]: an indexed list or a string-keyed map
//! - [`Node::Record`]: a named bag of instance fields, optionally carrying its
//!   own label/hint/placeholder declarations ([`Metadata`])
//!
//! Records distinguish instance fields from class-level fields. Class-level
//! fields are kept for completeness but are never listed nor resolved.
//!
//! ## Building from JSON
//!
//! [`Node::from_json`] maps JSON onto the graph. An object with a `"$model"`
//! key becomes a record:
//!
//! ```json
//! {
//!   "$model": "Address",
//!   "$labels": { "city": "Town" },
//!   "$hints": { "zip": "" },
//!   "$placeholders": { "city": "e.g. Lyon" },
//!   "$class": { "table": "addresses" },
//!   "city": "Lyon",
//!   "zip": "69001"
//! }
//! ```
//!
//! Other objects become keyed containers and arrays indexed containers.

use crate::error::{FormError, Result};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

const MODEL_KEY: &str = "$model";
const LABELS_KEY: &str = "$labels";
const HINTS_KEY: &str = "$hints";
const PLACEHOLDERS_KEY: &str = "$placeholders";
const CLASS_KEY: &str = "$class";

/// A scalar value stored at a leaf of the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Display form used when a value is rendered into an input; `Null` is empty.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{}", if *b { "1" } else { "0" }),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

/// An indexed or keyed collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Container {
    Indexed(Vec<Node>),
    Keyed(BTreeMap<String, Node>),
}

impl Container {
    /// Looks up an entry. Indexed containers accept decimal indexes only.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Container::Indexed(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            Container::Keyed(entries) => entries.get(key),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Container::Indexed(items) => items.len(),
            Container::Keyed(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which metadata map a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKind {
    Label,
    Hint,
    Placeholder,
}

impl MetaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaKind::Label => "label",
            MetaKind::Hint => "hint",
            MetaKind::Placeholder => "placeholder",
        }
    }
}

impl std::str::FromStr for MetaKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "label" => Ok(MetaKind::Label),
            "hint" => Ok(MetaKind::Hint),
            "placeholder" => Ok(MetaKind::Placeholder),
            other => Err(format!("Unknown metadata kind: {}", other)),
        }
    }
}

/// Label, hint and placeholder declarations of a record, keyed by sub-path
/// relative to that record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    labels: BTreeMap<String, String>,
    hints: BTreeMap<String, String>,
    placeholders: BTreeMap<String, String>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, kind: MetaKind) -> &BTreeMap<String, String> {
        match kind {
            MetaKind::Label => &self.labels,
            MetaKind::Hint => &self.hints,
            MetaKind::Placeholder => &self.placeholders,
        }
    }

    fn map_mut(&mut self, kind: MetaKind) -> &mut BTreeMap<String, String> {
        match kind {
            MetaKind::Label => &mut self.labels,
            MetaKind::Hint => &mut self.hints,
            MetaKind::Placeholder => &mut self.placeholders,
        }
    }

    /// Presence-checked lookup; `Some("")` is an explicit empty declaration.
    pub fn get(&self, kind: MetaKind, sub_path: &str) -> Option<&str> {
        self.map(kind).get(sub_path).map(String::as_str)
    }

    pub fn with(mut self, kind: MetaKind, sub_path: &str, text: &str) -> Self {
        self.map_mut(kind)
            .insert(sub_path.to_string(), text.to_string());
        self
    }
}

/// A structured record: instance fields plus optional metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    fields: BTreeMap<String, Node>,
    class_fields: BTreeMap<String, Node>,
    meta: Option<Metadata>,
}

impl Record {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            fields: BTreeMap::new(),
            class_fields: BTreeMap::new(),
            meta: None,
        }
    }

    /// Builds a record whose instance fields are the serialized fields of `value`.
    ///
    /// `value` must serialize to a map (a struct or a map type).
    pub fn from_serialize<T: Serialize>(type_name: &str, value: &T) -> Result<Self> {
        match serde_json::to_value(value)? {
            serde_json::Value::Object(entries) => {
                let mut record = Record::new(type_name);
                for (name, value) in entries {
                    record.fields.insert(name, Node::from_json(value)?);
                }
                Ok(record)
            }
            other => Err(FormError::InvalidModel(format!(
                "{} does not serialize to a map (got {})",
                type_name,
                json_kind(&other)
            ))),
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<Node>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn with_class_field(mut self, name: &str, value: impl Into<Node>) -> Self {
        self.class_fields.insert(name.to_string(), value.into());
        self
    }

    pub fn with_meta(mut self, meta: Metadata) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_label(self, sub_path: &str, text: &str) -> Self {
        self.declare(MetaKind::Label, sub_path, text)
    }

    pub fn with_hint(self, sub_path: &str, text: &str) -> Self {
        self.declare(MetaKind::Hint, sub_path, text)
    }

    pub fn with_placeholder(self, sub_path: &str, text: &str) -> Self {
        self.declare(MetaKind::Placeholder, sub_path, text)
    }

    fn declare(mut self, kind: MetaKind, sub_path: &str, text: &str) -> Self {
        let meta = self.meta.take().unwrap_or_default();
        self.meta = Some(meta.with(kind, sub_path, text));
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Names of instance fields. Class-level fields are never listed.
    pub fn list_instance_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Reads an instance field.
    pub fn field(&self, name: &str) -> Option<&Node> {
        self.fields.get(name)
    }

    pub fn class_field(&self, name: &str) -> Option<&Node> {
        self.class_fields.get(name)
    }

    /// Metadata declarations, present only for records that declare any.
    pub fn meta(&self) -> Option<&Metadata> {
        self.meta.as_ref()
    }
}

/// A node of the model graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Scalar),
    Container(Container),
    Record(Record),
}

impl Node {
    pub fn null() -> Self {
        Node::Leaf(Scalar::Null)
    }

    pub fn list(items: Vec<Node>) -> Self {
        Node::Container(Container::Indexed(items))
    }

    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Node)>,
        K: Into<String>,
    {
        Node::Container(Container::Keyed(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    pub fn as_leaf(&self) -> Option<&Scalar> {
        match self {
            Node::Leaf(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Node::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Name used for this node in diagnostics.
    pub fn type_name(&self) -> &str {
        match self {
            Node::Leaf(_) => "scalar",
            Node::Container(Container::Indexed(_)) => "list",
            Node::Container(Container::Keyed(_)) => "map",
            Node::Record(record) => record.type_name(),
        }
    }

    /// Builds a graph from JSON. See the module docs for the record convention.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        Ok(match value {
            Value::Null => Node::Leaf(Scalar::Null),
            Value::Bool(b) => Node::Leaf(Scalar::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Node::Leaf(Scalar::Int(i)),
                None => Node::Leaf(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Value::String(s) => Node::Leaf(Scalar::Str(s)),
            Value::Array(items) => Node::list(
                items
                    .into_iter()
                    .map(Node::from_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(mut entries) => match entries.remove(MODEL_KEY) {
                Some(Value::String(type_name)) => {
                    Node::Record(record_from_json(&type_name, entries)?)
                }
                Some(other) => {
                    return Err(FormError::InvalidModel(format!(
                        "\"{}\" must be a string, got {}",
                        MODEL_KEY,
                        json_kind(&other)
                    )))
                }
                None => Node::Container(Container::Keyed(
                    entries
                        .into_iter()
                        .map(|(k, v)| Node::from_json(v).map(|node| (k, node)))
                        .collect::<Result<BTreeMap<_, _>>>()?,
                )),
            },
        })
    }
}

fn record_from_json(
    type_name: &str,
    mut entries: serde_json::Map<String, serde_json::Value>,
) -> Result<Record> {
    let mut record = Record::new(type_name);

    let declarations = [
        (LABELS_KEY, MetaKind::Label),
        (HINTS_KEY, MetaKind::Hint),
        (PLACEHOLDERS_KEY, MetaKind::Placeholder),
    ];
    for (key, kind) in declarations {
        if let Some(value) = entries.remove(key) {
            for (sub_path, text) in string_map(type_name, key, value)? {
                record = record.declare(kind, &sub_path, &text);
            }
        }
    }

    if let Some(value) = entries.remove(CLASS_KEY) {
        match value {
            serde_json::Value::Object(class_fields) => {
                for (name, value) in class_fields {
                    record.class_fields.insert(name, Node::from_json(value)?);
                }
            }
            other => {
                return Err(FormError::InvalidModel(format!(
                    "{}.{} must be an object, got {}",
                    type_name,
                    CLASS_KEY,
                    json_kind(&other)
                )))
            }
        }
    }

    for (name, value) in entries {
        record.fields.insert(name, Node::from_json(value)?);
    }
    Ok(record)
}

fn string_map(
    type_name: &str,
    key: &str,
    value: serde_json::Value,
) -> Result<Vec<(String, String)>> {
    let serde_json::Value::Object(entries) = value else {
        return Err(FormError::InvalidModel(format!(
            "{}.{} must be an object of strings",
            type_name, key
        )));
    };
    entries
        .into_iter()
        .map(|(sub_path, text)| match text {
            serde_json::Value::String(text) => Ok((sub_path, text)),
            other => Err(FormError::InvalidModel(format!(
                "{}.{}[\"{}\"] must be a string, got {}",
                type_name,
                key,
                sub_path,
                json_kind(&other)
            ))),
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Node::Leaf(value)
    }
}

impl From<Record> for Node {
    fn from(value: Record) -> Self {
        Node::Record(value)
    }
}

impl From<Container> for Node {
    fn from(value: Container) -> Self {
        Node::Container(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Leaf(value.into())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Leaf(value.into())
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Leaf(value.into())
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Leaf(value.into())
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Leaf(value.into())
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_none(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Float(x) => serializer.serialize_f64(*x),
            Scalar::Str(s) => serializer.serialize_str(s),
        }
    }
}

/// Records serialize their instance fields only.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Node::Leaf(scalar) => scalar.serialize(serializer),
            Node::Container(Container::Indexed(items)) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Container(Container::Keyed(entries)) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Node::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.fields.len()))?;
                for (k, v) in &record.fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
