//! Core system state implementation.

use crate::error::{StateError, StateResult};
use crate::result::{DeleteResult, LinkKind};
use soil_core::{Association, Attributes, Link, Model, Object, Value};
use std::collections::{HashMap, HashSet, VecDeque};

/// The in-memory object/link graph.
#[derive(Debug)]
pub struct SystemState {
    /// The structural model this state instantiates.
    model: Model,
    /// Object storage, keyed by unique object name.
    objects: HashMap<String, Object>,
    /// Plain link storage, keyed by association name.
    links: HashMap<String, Vec<Link>>,
    /// Per-class counters for generated object names.
    name_counters: HashMap<String, u64>,
}

impl SystemState {
    /// Create an empty state for the given model.
    pub fn new(model: Model) -> Self {
        Self {
            model,
            objects: HashMap::new(),
            links: HashMap::new(),
            name_counters: HashMap::new(),
        }
    }

    /// The structural model.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Get an object by name.
    pub fn object(&self, name: &str) -> Option<&Object> {
        self.objects.get(name)
    }

    /// Iterate all objects.
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    /// Iterate all plain links of an association.
    pub fn links_of(&self, association: &str) -> impl Iterator<Item = &Link> {
        self.links.get(association).into_iter().flatten()
    }

    /// Number of objects (link objects included).
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    // ==================== Object Operations ====================

    /// Create a new object of the given class.
    ///
    /// When `name` is `None` a fresh `Class1, Class2, …` name is generated.
    pub fn create_object(&mut self, class: &str, name: Option<&str>) -> StateResult<&Object> {
        let class_def = self
            .model
            .class(class)
            .ok_or_else(|| StateError::unknown_class(class))?;
        if self.model.association_class(class).is_some() {
            return Err(StateError::association_class(class));
        }

        let attributes = initial_attributes(class_def);
        let name = match name {
            Some(name) => {
                if self.objects.contains_key(name) {
                    return Err(StateError::name_conflict(name));
                }
                name.to_string()
            }
            None => self.generate_name(class),
        };

        let mut object = Object::new(name.clone(), class);
        object.attributes = attributes;
        self.objects.insert(name.clone(), object);
        Ok(&self.objects[&name])
    }

    /// Generate a fresh object name for a class.
    pub fn generate_name(&mut self, class: &str) -> String {
        loop {
            let counter = self.name_counters.entry(class.to_string()).or_insert(0);
            *counter += 1;
            let candidate = format!("{}{}", class, counter);
            if !self.objects.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    // ==================== Link Operations ====================

    /// Create a new link in a plain association.
    pub fn create_link(
        &mut self,
        association: &str,
        participants: Vec<String>,
        qualifiers: Vec<Vec<Value>>,
    ) -> StateResult<Link> {
        let assoc = self
            .model
            .association(association)
            .ok_or_else(|| StateError::unknown_association(association))?
            .clone();
        if assoc.is_association_class() {
            return Err(StateError::link_on_association_class(association));
        }

        self.validate_link(&assoc, &participants, &qualifiers)?;

        let link = Link::new(association, participants, qualifiers);
        self.links
            .entry(association.to_string())
            .or_default()
            .push(link.clone());
        Ok(link)
    }

    /// Create a new link object in an association class.
    pub fn create_link_object(
        &mut self,
        association: &str,
        name: Option<&str>,
        participants: Vec<String>,
        qualifiers: Vec<Vec<Value>>,
    ) -> StateResult<&Object> {
        let assoc = self
            .model
            .association(association)
            .ok_or_else(|| StateError::unknown_association(association))?
            .clone();
        if !assoc.is_association_class() {
            return Err(StateError::not_an_association_class(association));
        }

        self.validate_link(&assoc, &participants, &qualifiers)?;

        let class_def = self
            .model
            .class(association)
            .ok_or_else(|| StateError::unknown_class(association))?;
        let attributes = initial_attributes(class_def);
        let name = match name {
            Some(name) => {
                if self.objects.contains_key(name) {
                    return Err(StateError::name_conflict(name));
                }
                name.to_string()
            }
            None => self.generate_name(association),
        };

        let mut object = Object::new_link_object(name.clone(), association, participants, qualifiers);
        object.attributes = attributes;
        self.objects.insert(name.clone(), object);
        Ok(&self.objects[&name])
    }

    /// Resolve the link connecting the given participants, if any.
    pub fn link_between_objects(
        &self,
        association: &str,
        participants: &[String],
        qualifiers: &[Vec<Value>],
    ) -> Option<LinkKind> {
        if let Some(link) = self
            .links_of(association)
            .find(|l| l.connects(participants, qualifiers))
        {
            return Some(LinkKind::Link(link.clone()));
        }
        self.link_objects_of(association)
            .find(|o| link_object_connects(o, participants, qualifiers))
            .map(|o| LinkKind::Object(o.name.clone()))
    }

    /// Delete a plain link identified by its participants.
    ///
    /// Link objects are not deleted through this primitive; they cascade
    /// through [`SystemState::delete_object`].
    pub fn delete_link(
        &mut self,
        association: &str,
        participants: &[String],
        qualifiers: &[Vec<Value>],
    ) -> StateResult<DeleteResult> {
        self.model
            .association(association)
            .ok_or_else(|| StateError::unknown_association(association))?;

        let links = self.links.entry(association.to_string()).or_default();
        let index = links
            .iter()
            .position(|l| l.connects(participants, qualifiers))
            .ok_or_else(|| StateError::link_not_found(association, participants))?;
        let link = links.remove(index);
        Ok(DeleteResult::link(link))
    }

    // ==================== Destruction ====================

    /// Compute the transitive set of objects affected by destroying
    /// `name`: the object itself plus every link object reachable through
    /// incident links, recursively.
    pub fn objects_affected_by_destruction(&self, name: &str) -> Vec<String> {
        let mut affected = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(name.to_string());

        while let Some(current) = queue.pop_front() {
            if !seen.insert(current.clone()) {
                continue;
            }
            affected.push(current.clone());

            for object in self.objects.values() {
                if let Some(ends) = &object.link {
                    let attached = ends.participants.iter().any(|p| *p == current);
                    if attached && !seen.contains(&object.name) {
                        queue.push_back(object.name.clone());
                    }
                }
            }
        }

        affected
    }

    /// Delete an object and everything that cascades with it: incident
    /// plain links, attached link objects, and their own cascades.
    pub fn delete_object(&mut self, name: &str) -> StateResult<DeleteResult> {
        if !self.objects.contains_key(name) {
            return Err(StateError::unknown_object(name));
        }

        let mut result = DeleteResult::new();
        let mut queue = VecDeque::new();
        queue.push_back(name.to_string());

        while let Some(current) = queue.pop_front() {
            let Some(object) = self.objects.remove(&current) else {
                continue;
            };

            // Incident plain links go first; their snapshots are part of
            // the cascade result.
            for links in self.links.values_mut() {
                let mut index = 0;
                while index < links.len() {
                    if links[index].involves(&current) {
                        result.add_link(links.remove(index));
                    } else {
                        index += 1;
                    }
                }
            }

            // Attached link objects cascade as objects of their own.
            let attached: Vec<String> = self
                .objects
                .values()
                .filter(|o| {
                    o.link
                        .as_ref()
                        .is_some_and(|ends| ends.participants.iter().any(|p| *p == current))
                })
                .map(|o| o.name.clone())
                .collect();
            queue.extend(attached);

            result.add_object(object);
        }

        Ok(result)
    }

    /// Reinsert every entity recorded in a deletion snapshot.
    ///
    /// This is the state-level inverse of [`SystemState::delete_object`];
    /// the caller is responsible for restoring variable bindings.
    pub fn restore(&mut self, deleted: &DeleteResult) -> StateResult<()> {
        for object in &deleted.removed_objects {
            if self.objects.contains_key(&object.name) {
                return Err(StateError::name_conflict(&object.name));
            }
        }

        for object in &deleted.removed_objects {
            self.objects.insert(object.name.clone(), object.clone());
        }
        for link in &deleted.removed_links {
            self.links
                .entry(link.association.clone())
                .or_default()
                .push(link.clone());
        }
        Ok(())
    }

    // ==================== Attribute Operations ====================

    /// Read an attribute slot.
    pub fn attribute_value(&self, object: &str, attribute: &str) -> StateResult<Value> {
        let object = self
            .objects
            .get(object)
            .ok_or_else(|| StateError::unknown_object(object))?;
        object
            .attributes
            .get(attribute)
            .cloned()
            .ok_or_else(|| StateError::unknown_attribute(&object.class, attribute))
    }

    /// Overwrite an attribute slot, returning the previous value.
    pub fn set_attribute(
        &mut self,
        object: &str,
        attribute: &str,
        value: Value,
    ) -> StateResult<Value> {
        let object = self
            .objects
            .get_mut(object)
            .ok_or_else(|| StateError::unknown_object(object))?;
        if !object.attributes.contains_key(attribute) {
            return Err(StateError::unknown_attribute(&object.class, attribute));
        }
        let old = object.attributes.insert(attribute.to_string(), value);
        Ok(old.unwrap_or(Value::Undefined))
    }

    // ==================== Internal ====================

    fn link_objects_of(&self, association: &str) -> impl Iterator<Item = &Object> {
        let association = association.to_string();
        self.objects.values().filter(move |o| {
            o.link
                .as_ref()
                .is_some_and(|ends| ends.association == association)
        })
    }

    /// Validate a prospective link against the association's structure:
    /// participant existence and classes, qualifier shape, duplicates,
    /// and end multiplicities.
    fn validate_link(
        &self,
        assoc: &Association,
        participants: &[String],
        qualifiers: &[Vec<Value>],
    ) -> StateResult<()> {
        if participants.len() != assoc.ends.len() {
            return Err(StateError::end_count_mismatch(
                &assoc.name,
                assoc.ends.len(),
                participants.len(),
            ));
        }
        if !qualifiers.is_empty() && qualifiers.len() != assoc.ends.len() {
            return Err(StateError::end_count_mismatch(
                &assoc.name,
                assoc.ends.len(),
                qualifiers.len(),
            ));
        }

        for (end, participant) in assoc.ends.iter().zip(participants) {
            let object = self
                .objects
                .get(participant)
                .ok_or_else(|| StateError::unknown_object(participant))?;
            if object.class != end.class {
                return Err(StateError::end_class_mismatch(
                    participant,
                    &end.role,
                    &end.class,
                    &object.class,
                ));
            }
        }

        for (end, values) in assoc.ends.iter().zip(qualifiers) {
            if values.len() != end.qualifiers.len() {
                return Err(StateError::qualifier_count_mismatch(
                    &assoc.name,
                    &end.role,
                    end.qualifiers.len(),
                    values.len(),
                ));
            }
        }
        if qualifiers.is_empty() {
            if let Some(end) = assoc.ends.iter().find(|e| !e.qualifiers.is_empty()) {
                return Err(StateError::qualifier_count_mismatch(
                    &assoc.name,
                    &end.role,
                    end.qualifiers.len(),
                    0,
                ));
            }
        }

        let instances = self.link_instances(&assoc.name);
        if instances
            .iter()
            .any(|(parts, quals)| parts == participants && qualifiers_equal(quals, qualifiers))
        {
            return Err(StateError::duplicate_link(&assoc.name, participants));
        }

        // An end with upper bound n admits at most n links sharing the
        // participants of all other ends. Qualified associations partition
        // their ends per qualifier value; their bounds are checked at
        // navigation time instead.
        if assoc.has_qualifiers() {
            return Ok(());
        }
        for (index, end) in assoc.ends.iter().enumerate() {
            let Some(upper) = end.multiplicity.upper else {
                continue;
            };
            let occupied = instances
                .iter()
                .filter(|(parts, _)| {
                    parts
                        .iter()
                        .enumerate()
                        .all(|(j, p)| j == index || *p == participants[j])
                })
                .count();
            if occupied as u32 + 1 > upper {
                return Err(StateError::multiplicity_violation(
                    &assoc.name,
                    participants,
                    &end.role,
                    end.multiplicity.to_string(),
                ));
            }
        }

        Ok(())
    }

    /// All instances of an association: plain links and link objects in
    /// one view of (participants, qualifiers).
    fn link_instances(&self, association: &str) -> Vec<(Vec<String>, Vec<Vec<Value>>)> {
        let mut instances: Vec<(Vec<String>, Vec<Vec<Value>>)> = self
            .links_of(association)
            .map(|l| (l.participants.clone(), l.qualifiers.clone()))
            .collect();
        instances.extend(self.link_objects_of(association).filter_map(|o| {
            o.link
                .as_ref()
                .map(|ends| (ends.participants.clone(), ends.qualifiers.clone()))
        }));
        instances
    }
}

fn initial_attributes(class: &soil_core::Class) -> Attributes {
    class
        .attributes
        .iter()
        .map(|a| (a.name.clone(), Value::Undefined))
        .collect()
}

fn link_object_connects(object: &Object, participants: &[String], qualifiers: &[Vec<Value>]) -> bool {
    object.link.as_ref().is_some_and(|ends| {
        ends.participants == participants && qualifiers_equal(&ends.qualifiers, qualifiers)
    })
}

fn qualifiers_equal(stored: &[Vec<Value>], requested: &[Vec<Value>]) -> bool {
    if requested.is_empty() {
        return stored.iter().all(|q| q.is_empty());
    }
    stored == requested
}
