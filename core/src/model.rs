//! Structural model definitions.
//!
//! The model describes what a running system instance may contain: classes
//! with attributes and operations, and associations connecting classes.
//! An association may itself be a class (an association class); its
//! instances are link objects, which behave both as objects and as links.

use crate::error::ModelError;
use regex_lite::Regex;
use std::collections::HashMap;

/// Attribute definition within a class.
#[derive(Debug, Clone)]
pub struct AttributeDef {
    /// Attribute name.
    pub name: String,
    /// Declared type name (String, Integer, Real, Boolean, or a class).
    pub type_name: String,
}

impl AttributeDef {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Operation definition within a class.
///
/// Only the signature is modeled; operation bodies are statements supplied
/// by the caller at invocation time.
#[derive(Debug, Clone)]
pub struct OperationDef {
    /// Operation name.
    pub name: String,
    /// Parameter names, in declaration order.
    pub params: Vec<String>,
    /// Query operations are side-effect free and never enter the call
    /// stack of non-query invocations.
    pub is_query: bool,
}

impl OperationDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            is_query: false,
        }
    }

    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(name.into());
        self
    }

    pub fn query(mut self) -> Self {
        self.is_query = true;
        self
    }
}

/// A class in the structural model.
#[derive(Debug, Clone)]
pub struct Class {
    /// Class name.
    pub name: String,
    /// Attribute definitions.
    pub attributes: Vec<AttributeDef>,
    /// Operation definitions.
    pub operations: Vec<OperationDef>,
}

impl Class {
    /// Look up an attribute definition by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Look up an operation definition by name.
    pub fn operation(&self, name: &str) -> Option<&OperationDef> {
        self.operations.iter().find(|o| o.name == name)
    }
}

/// Multiplicity of an association end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multiplicity {
    /// Lower bound.
    pub lower: u32,
    /// Upper bound; `None` means unbounded (`*`).
    pub upper: Option<u32>,
}

impl Multiplicity {
    /// `0..*`
    pub fn many() -> Self {
        Self {
            lower: 0,
            upper: None,
        }
    }

    /// `lower..upper`
    pub fn range(lower: u32, upper: u32) -> Self {
        Self {
            lower,
            upper: Some(upper),
        }
    }

    /// `0..1`
    pub fn optional() -> Self {
        Self::range(0, 1)
    }

    /// `1..1`
    pub fn one() -> Self {
        Self::range(1, 1)
    }

    /// Returns true if at most one instance may occupy this end.
    pub fn is_to_one(&self) -> bool {
        self.upper == Some(1)
    }
}

impl std::fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.upper {
            Some(upper) if upper == self.lower => write!(f, "{}", upper),
            Some(upper) => write!(f, "{}..{}", self.lower, upper),
            None if self.lower == 0 => write!(f, "*"),
            None => write!(f, "{}..*", self.lower),
        }
    }
}

/// One end of an association.
#[derive(Debug, Clone)]
pub struct AssociationEnd {
    /// Role name of this end.
    pub role: String,
    /// Participating class name.
    pub class: String,
    /// Multiplicity constraint of this end.
    pub multiplicity: Multiplicity,
    /// Qualifier attributes of this end (empty for unqualified ends).
    pub qualifiers: Vec<AttributeDef>,
}

/// An association in the structural model.
#[derive(Debug, Clone)]
pub struct Association {
    /// Association name.
    pub name: String,
    /// Association ends, in declaration order.
    pub ends: Vec<AssociationEnd>,
    /// Set when this association is an association class; names the class
    /// entry carrying the attributes and operations of its link objects.
    pub class_name: Option<String>,
}

impl Association {
    /// Returns true if this association is an association class.
    pub fn is_association_class(&self) -> bool {
        self.class_name.is_some()
    }

    /// Look up an end by role name.
    pub fn end(&self, role: &str) -> Option<(usize, &AssociationEnd)> {
        self.ends
            .iter()
            .enumerate()
            .find(|(_, e)| e.role == role)
    }

    /// Returns true if any end carries qualifier attributes.
    pub fn has_qualifiers(&self) -> bool {
        self.ends.iter().any(|e| !e.qualifiers.is_empty())
    }
}

/// The immutable structural model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Model name.
    pub name: String,
    classes: HashMap<String, Class>,
    associations: HashMap<String, Association>,
}

impl Model {
    /// Look up a class by name.
    pub fn class(&self, name: &str) -> Option<&Class> {
        self.classes.get(name)
    }

    /// Look up an association by name.
    pub fn association(&self, name: &str) -> Option<&Association> {
        self.associations.get(name)
    }

    /// Look up an association class by its class name.
    pub fn association_class(&self, name: &str) -> Option<&Association> {
        self.associations
            .get(name)
            .filter(|a| a.is_association_class())
    }

    /// Iterate all associations a class participates in.
    pub fn associations_of(&self, class: &str) -> impl Iterator<Item = &Association> {
        let class = class.to_string();
        self.associations
            .values()
            .filter(move |a| a.ends.iter().any(|e| e.class == class))
    }
}

/// Builder for constructing an immutable Model.
#[derive(Debug)]
pub struct ModelBuilder {
    name: String,
    classes: HashMap<String, Class>,
    associations: HashMap<String, Association>,
    ident: Regex,
}

impl ModelBuilder {
    /// Create a new builder for a named model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: HashMap::new(),
            associations: HashMap::new(),
            // Compiled once per builder; identifier syntax is fixed.
            ident: Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap(),
        }
    }

    fn check_ident(&self, kind: &str, name: &str) -> Result<(), ModelError> {
        if self.ident.is_match(name) {
            Ok(())
        } else {
            Err(ModelError::invalid_identifier(kind, name))
        }
    }

    /// Begin a class definition.
    pub fn class(&mut self, name: impl Into<String>) -> ClassBuilder<'_> {
        ClassBuilder {
            builder: self,
            name: name.into(),
            attributes: Vec::new(),
            operations: Vec::new(),
        }
    }

    /// Begin an association definition.
    pub fn association(&mut self, name: impl Into<String>) -> AssociationBuilder<'_> {
        AssociationBuilder {
            builder: self,
            name: name.into(),
            ends: Vec::new(),
            as_class: false,
            attributes: Vec::new(),
            operations: Vec::new(),
        }
    }

    /// Build the immutable Model.
    pub fn build(self) -> Result<Model, ModelError> {
        // Association ends must reference known classes.
        for assoc in self.associations.values() {
            for end in &assoc.ends {
                if !self.classes.contains_key(&end.class) {
                    return Err(ModelError::unknown_end_class(&assoc.name, &end.class));
                }
            }
        }

        Ok(Model {
            name: self.name,
            classes: self.classes,
            associations: self.associations,
        })
    }
}

/// Builder for a single class.
pub struct ClassBuilder<'b> {
    builder: &'b mut ModelBuilder,
    name: String,
    attributes: Vec<AttributeDef>,
    operations: Vec<OperationDef>,
}

impl<'b> ClassBuilder<'b> {
    /// Add an attribute definition.
    pub fn attr(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.attributes.push(AttributeDef::new(name, type_name));
        self
    }

    /// Add an operation definition.
    pub fn operation(mut self, op: OperationDef) -> Self {
        self.operations.push(op);
        self
    }

    /// Finish this class and register it on the model builder.
    pub fn done(self) -> Result<&'b mut ModelBuilder, ModelError> {
        self.builder.check_ident("class", &self.name)?;
        for attr in &self.attributes {
            self.builder.check_ident("attribute", &attr.name)?;
        }
        for op in &self.operations {
            self.builder.check_ident("operation", &op.name)?;
        }
        if self.builder.classes.contains_key(&self.name) {
            return Err(ModelError::duplicate_class(&self.name));
        }

        self.builder.classes.insert(
            self.name.clone(),
            Class {
                name: self.name,
                attributes: self.attributes,
                operations: self.operations,
            },
        );
        Ok(self.builder)
    }
}

/// Builder for a single association (or association class).
pub struct AssociationBuilder<'b> {
    builder: &'b mut ModelBuilder,
    name: String,
    ends: Vec<AssociationEnd>,
    as_class: bool,
    attributes: Vec<AttributeDef>,
    operations: Vec<OperationDef>,
}

impl<'b> AssociationBuilder<'b> {
    /// Add an end with the given role, class and multiplicity.
    pub fn end(
        mut self,
        role: impl Into<String>,
        class: impl Into<String>,
        multiplicity: Multiplicity,
    ) -> Self {
        self.ends.push(AssociationEnd {
            role: role.into(),
            class: class.into(),
            multiplicity,
            qualifiers: Vec::new(),
        });
        self
    }

    /// Add qualifier attributes to the most recently added end.
    pub fn qualifier(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        if let Some(end) = self.ends.last_mut() {
            end.qualifiers.push(AttributeDef::new(name, type_name));
        }
        self
    }

    /// Make this association an association class; its link objects carry
    /// the given attributes.
    pub fn as_class(mut self) -> Self {
        self.as_class = true;
        self
    }

    /// Add an attribute definition (association classes only).
    pub fn attr(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.attributes.push(AttributeDef::new(name, type_name));
        self
    }

    /// Add an operation definition (association classes only).
    pub fn operation(mut self, op: OperationDef) -> Self {
        self.operations.push(op);
        self
    }

    /// Finish this association and register it on the model builder.
    pub fn done(self) -> Result<&'b mut ModelBuilder, ModelError> {
        self.builder.check_ident("association", &self.name)?;
        for end in &self.ends {
            self.builder.check_ident("role", &end.role)?;
        }
        if self.builder.associations.contains_key(&self.name) {
            return Err(ModelError::duplicate_association(&self.name));
        }
        if self.ends.len() < 2 {
            return Err(ModelError::too_few_ends(&self.name, self.ends.len()));
        }
        if !self.as_class && !self.attributes.is_empty() {
            return Err(ModelError::attributes_on_plain_association(&self.name));
        }

        let class_name = if self.as_class {
            // The association class doubles as a class entry so link
            // objects resolve attributes and operations like any object.
            if self.builder.classes.contains_key(&self.name) {
                return Err(ModelError::duplicate_class(&self.name));
            }
            self.builder.classes.insert(
                self.name.clone(),
                Class {
                    name: self.name.clone(),
                    attributes: self.attributes,
                    operations: self.operations,
                },
            );
            Some(self.name.clone())
        } else {
            None
        };

        self.builder.associations.insert(
            self.name.clone(),
            Association {
                name: self.name,
                ends: self.ends,
                class_name,
            },
        );
        Ok(self.builder)
    }
}
