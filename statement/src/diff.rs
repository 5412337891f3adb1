//! State difference bookkeeping.

use soil_core::Link;
use soil_state::DeleteResult;

/// The set of graph entities created, removed or modified by one
/// evaluation. Entries are deduplicated by identity (object name, link
/// triple).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateDifference {
    new_objects: Vec<String>,
    new_link_objects: Vec<String>,
    new_links: Vec<Link>,
    deleted_objects: Vec<String>,
    deleted_links: Vec<Link>,
    modified_objects: Vec<String>,
}

impl StateDifference {
    /// Create an empty difference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly created object.
    pub fn add_new_object(&mut self, name: impl Into<String>) {
        push_unique(&mut self.new_objects, name.into());
    }

    /// Record a newly created link object.
    pub fn add_new_link_object(&mut self, name: impl Into<String>) {
        push_unique(&mut self.new_link_objects, name.into());
    }

    /// Record a newly created link.
    pub fn add_new_link(&mut self, link: Link) {
        if !self.new_links.contains(&link) {
            self.new_links.push(link);
        }
    }

    /// Record a modified object.
    pub fn add_modified_object(&mut self, name: impl Into<String>) {
        push_unique(&mut self.modified_objects, name.into());
    }

    /// Record everything removed by a deletion.
    pub fn add_delete_result(&mut self, deleted: &DeleteResult) {
        for object in &deleted.removed_objects {
            push_unique(&mut self.deleted_objects, object.name.clone());
        }
        for link in &deleted.removed_links {
            if !self.deleted_links.contains(link) {
                self.deleted_links.push(link.clone());
            }
        }
    }

    /// Newly created objects.
    pub fn new_objects(&self) -> &[String] {
        &self.new_objects
    }

    /// Newly created link objects.
    pub fn new_link_objects(&self) -> &[String] {
        &self.new_link_objects
    }

    /// Newly created links.
    pub fn new_links(&self) -> &[Link] {
        &self.new_links
    }

    /// Deleted objects (link objects included).
    pub fn deleted_objects(&self) -> &[String] {
        &self.deleted_objects
    }

    /// Deleted plain links.
    pub fn deleted_links(&self) -> &[Link] {
        &self.deleted_links
    }

    /// Modified objects.
    pub fn modified_objects(&self) -> &[String] {
        &self.modified_objects
    }

    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.new_objects.is_empty()
            && self.new_link_objects.is_empty()
            && self.new_links.is_empty()
            && self.deleted_objects.is_empty()
            && self.deleted_links.is_empty()
            && self.modified_objects.is_empty()
    }
}

fn push_unique(entries: &mut Vec<String>, entry: String) {
    if !entries.contains(&entry) {
        entries.push(entry);
    }
}
