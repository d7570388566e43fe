//! # Attribute Value Reader
//!
//! Walks a root [`Node`] one path segment at a time:
//!
//! - containers are dereferenced by key (or decimal index)
//! - records are dereferenced by instance field name
//! - leaves cannot be descended into
//!
//! Every step is recorded in a [`ResolutionTrail`], which exists only to build
//! readable error messages such as `User::address[city]`. Failures are returned
//! to the caller as-is; nothing here recovers from them.

use crate::error::{FormError, Result};
use crate::model::Node;
use crate::path::{normalize, AttributePath};
use std::fmt;

/// Shape of the node reached at a trail frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Record,
    Container,
    Leaf,
}

impl FrameKind {
    fn of(node: &Node) -> Self {
        match node {
            Node::Record(_) => FrameKind::Record,
            Node::Container(_) => FrameKind::Container,
            Node::Leaf(_) => FrameKind::Leaf,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailFrame {
    pub segment: String,
    pub kind: FrameKind,
}

/// The dereferencing steps taken so far. The first frame names the root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolutionTrail {
    frames: Vec<TrailFrame>,
}

impl ResolutionTrail {
    fn start(root: &Node) -> Self {
        Self {
            frames: vec![TrailFrame {
                segment: root.type_name().to_string(),
                kind: FrameKind::of(root),
            }],
        }
    }

    fn push(&mut self, segment: &str, node: &Node) {
        self.frames.push(TrailFrame {
            segment: segment.to_string(),
            kind: FrameKind::of(node),
        });
    }

    pub fn frames(&self) -> &[TrailFrame] {
        &self.frames
    }

    /// Segment of the last successfully dereferenced frame.
    pub fn last_segment(&self) -> Option<&str> {
        self.frames.last().map(|frame| frame.segment.as_str())
    }
}

/// `User::address[city]`: `::` after a record, brackets after a container.
impl fmt::Display for ResolutionTrail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous: Option<FrameKind> = None;
        for frame in &self.frames {
            match previous {
                None | Some(FrameKind::Leaf) => write!(f, "{}", frame.segment)?,
                Some(FrameKind::Record) => write!(f, "::{}", frame.segment)?,
                Some(FrameKind::Container) => write!(f, "[{}]", frame.segment)?,
            }
            previous = Some(frame.kind);
        }
        Ok(())
    }
}

/// Reads the node at `path` below `root`.
pub fn read<'a>(root: &'a Node, path: &AttributePath) -> Result<&'a Node> {
    let mut current = root;
    let mut trail = ResolutionTrail::start(root);

    for segment in path.segments() {
        let next = match current {
            Node::Container(container) => container.get(segment),
            Node::Record(record) => record.field(segment),
            Node::Leaf(_) => {
                return Err(FormError::NotNestable {
                    segment: segment.clone(),
                    trail,
                })
            }
        };

        let Some(next) = next else {
            tracing::trace!(%trail, segment = segment.as_str(), "attribute not found");
            return Err(FormError::UndefinedAttribute {
                segment: segment.clone(),
                trail,
            });
        };

        tracing::trace!(segment = segment.as_str(), kind = next.type_name(), "descended");
        trail.push(segment, next);
        current = next;
    }

    Ok(current)
}

/// Normalizes `raw` and reads it.
pub fn read_str<'a>(root: &'a Node, raw: &str) -> Result<&'a Node> {
    read(root, &normalize(raw)?)
}

/// Whether `path` resolves. Only `UndefinedAttribute` counts as absence; other
/// failures propagate.
pub fn has_attribute(root: &Node, path: &AttributePath) -> Result<bool> {
    match read(root, path) {
        Ok(_) => Ok(true),
        Err(FormError::UndefinedAttribute { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, Scalar};

    fn path(raw: &str) -> AttributePath {
        normalize(raw).unwrap()
    }

    fn nested() -> Node {
        Node::from(Record::new("Root").with_field("a", Record::new("A").with_field("b", 5i64)))
    }

    #[test]
    fn test_reads_nested_value() {
        let root = nested();
        assert_eq!(read(&root, &path("a.b")).unwrap(), &Node::from(5i64));
    }

    #[test]
    fn test_missing_segment_trail_stops_before_it() {
        let root = nested();
        let err = read(&root, &path("a.c")).unwrap_err();
        match err {
            FormError::UndefinedAttribute { segment, trail } => {
                assert_eq!(segment, "c");
                assert_eq!(trail.last_segment(), Some("a"));
                assert_eq!(trail.to_string(), "Root::a");
            }
            other => panic!("Expected UndefinedAttribute, got {other:?}"),
        }
    }

    #[test]
    fn test_leaf_is_not_nestable() {
        let root = Node::from(Record::new("Root").with_field("a", "leaf"));
        let err = read(&root, &path("a.b")).unwrap_err();
        assert!(matches!(err, FormError::NotNestable { ref segment, .. } if segment == "b"));
    }

    #[test]
    fn test_leaf_root_is_not_nestable() {
        let root = Node::from(3i64);
        assert!(matches!(
            read(&root, &path("x")),
            Err(FormError::NotNestable { .. })
        ));
    }

    #[test]
    fn test_class_field_is_undefined() {
        let root = Node::from(Record::new("User").with_class_field("table", "users"));
        assert!(matches!(
            read(&root, &path("table")),
            Err(FormError::UndefinedAttribute { .. })
        ));
    }

    #[test]
    fn test_reads_through_containers() {
        let root = Node::from(
            Record::new("Post").with_field(
                "tags",
                Node::list(vec![Node::map([("name", Node::from("rust"))])]),
            ),
        );
        assert_eq!(
            read(&root, &path("tags[0][name]")).unwrap(),
            &Node::from("rust")
        );
        assert!(matches!(
            read(&root, &path("tags[1]")),
            Err(FormError::UndefinedAttribute { .. })
        ));
        assert!(matches!(
            read(&root, &path("tags.first")),
            Err(FormError::UndefinedAttribute { .. })
        ));
    }

    #[test]
    fn test_trail_formatting_mixes_records_and_containers() {
        let root = Node::from(
            Record::new("User").with_field(
                "address",
                Node::map([("city", Node::from(Record::new("City")))]),
            ),
        );
        let err = read(&root, &path("address.city.zip")).unwrap_err();
        let FormError::UndefinedAttribute { trail, .. } = err else {
            panic!("Expected UndefinedAttribute");
        };
        assert_eq!(trail.to_string(), "User::address[city]");
        assert_eq!(trail.frames().len(), 3);
    }

    #[test]
    fn test_error_message_names_segment_and_trail() {
        let root = nested();
        let err = read(&root, &path("a.c")).unwrap_err();
        assert_eq!(err.to_string(), "Undefined attribute \"c\" on Root::a");
    }

    #[test]
    fn test_end_to_end_bracket_path() {
        let root = Node::from(
            Record::new("User").with_field(
                "profile",
                Record::new("Profile")
                    .with_field("address", Record::new("Address").with_field("city", "Lyon")),
            ),
        );
        let value = read_str(&root, "profile[address][city]").unwrap();
        assert_eq!(value.as_leaf(), Some(&Scalar::from("Lyon")));
    }

    #[test]
    fn test_read_str_rejects_malformed_path() {
        let root = nested();
        assert!(matches!(
            read_str(&root, "a..b"),
            Err(FormError::MalformedPath { .. })
        ));
    }

    #[test]
    fn test_has_attribute() {
        let root = nested();
        assert!(has_attribute(&root, &path("a.b")).unwrap());
        assert!(!has_attribute(&root, &path("a.z")).unwrap());
        assert!(has_attribute(&root, &path("a.b.c")).is_err());
    }

    #[test]
    fn test_resolution_does_not_mutate_root() {
        let root = nested();
        let before = root.clone();
        let _ = read(&root, &path("a.b"));
        let _ = read(&root, &path("a.missing"));
        assert_eq!(root, before);
    }
}
