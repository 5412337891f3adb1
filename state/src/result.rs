//! Deletion result types.

use soil_core::{Link, Object};

/// A resolved link, distinguishing plain links from link objects.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkKind {
    /// A plain link.
    Link(Link),
    /// A link object, by object name.
    Object(String),
}

impl LinkKind {
    /// Returns true if this is a link object.
    pub fn is_object(&self) -> bool {
        matches!(self, LinkKind::Object(_))
    }
}

/// Snapshot of everything removed by one deletion.
///
/// Link objects appear in `removed_objects` only (their object snapshot
/// carries the link ends); `removed_links` holds plain links. The
/// partition keeps later classification independent of removal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteResult {
    /// Removed objects and link objects, full snapshots.
    pub removed_objects: Vec<Object>,
    /// Removed plain links.
    pub removed_links: Vec<Link>,
}

impl DeleteResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Result for a single removed plain link.
    pub fn link(link: Link) -> Self {
        Self {
            removed_objects: Vec::new(),
            removed_links: vec![link],
        }
    }

    /// Record a removed object unless already present.
    pub fn add_object(&mut self, object: Object) {
        if !self.removed_objects.iter().any(|o| o.name == object.name) {
            self.removed_objects.push(object);
        }
    }

    /// Record a removed plain link unless already present.
    pub fn add_link(&mut self, link: Link) {
        if !self.removed_links.contains(&link) {
            self.removed_links.push(link);
        }
    }

    /// Look up a removed object snapshot by name.
    pub fn removed_object(&self, name: &str) -> Option<&Object> {
        self.removed_objects.iter().find(|o| o.name == name)
    }

    /// Returns true if nothing was removed.
    pub fn is_empty(&self) -> bool {
        self.removed_objects.is_empty() && self.removed_links.is_empty()
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: DeleteResult) {
        for object in other.removed_objects {
            self.add_object(object);
        }
        for link in other.removed_links {
            self.add_link(link);
        }
    }
}
