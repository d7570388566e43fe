//! # Attribute Metadata Reader
//!
//! Labels, hints and placeholders can be declared by any record on the path to
//! an attribute, keyed by the sub-path relative to that record. Given a root
//! `User` holding an `address: Address` record:
//!
//! ```text
//! User     declares label["address.city"]
//! Address  declares label["city"]
//! ```
//!
//! Both describe `address.city`. The closest enclosing record wins, so the
//! `Address` declaration is used regardless of declaration order.
//!
//! The walk descends through record fields only. It stops at the first segment
//! that does not name a record field (a container, a leaf, a missing field);
//! records reached before that point are still consulted.

use crate::label::generate;
use crate::model::{MetaKind, Node};
use crate::path::AttributePath;

/// Looks up `kind` metadata for `path`, closest declaring record first.
///
/// `Some("")` is an explicit empty declaration, distinct from `None`.
pub fn read_meta<'a>(root: &'a Node, path: &AttributePath, kind: MetaKind) -> Option<&'a str> {
    let mut candidates = Vec::new();
    let mut current = root;

    for (position, segment) in path.segments().iter().enumerate() {
        let Node::Record(record) = current else {
            break;
        };
        if let Some(meta) = record.meta() {
            candidates.push((position, meta));
        }
        match record.field(segment) {
            Some(next) => current = next,
            None => break,
        }
    }

    candidates.into_iter().rev().find_map(|(position, meta)| {
        let sub_path = path.remaining(position);
        let found = meta.get(kind, &sub_path);
        if found.is_some() {
            tracing::trace!(kind = kind.as_str(), sub_path = sub_path.as_str(), "metadata found");
        }
        found
    })
}

/// Declared label, or one generated from the attribute's own name.
pub fn label(root: &Node, path: &AttributePath) -> String {
    match read_meta(root, path, MetaKind::Label) {
        Some(text) => text.to_string(),
        None => generate(path.last()),
    }
}

/// Declared hint, or an empty string.
pub fn hint(root: &Node, path: &AttributePath) -> String {
    read_meta(root, path, MetaKind::Hint)
        .unwrap_or_default()
        .to_string()
}

/// Declared placeholder, or an empty string.
pub fn placeholder(root: &Node, path: &AttributePath) -> String {
    read_meta(root, path, MetaKind::Placeholder)
        .unwrap_or_default()
        .to_string()
}
