//! Field resolver sets
//!
//! The ordered, name-unique collection of fields a logger tracks.

use super::field::FieldDescriptor;
use crate::error::{ActivityError, ActivityResult};

/// Ordered set of field descriptors belonging to one logger
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    logger: String,
    fields: Vec<FieldDescriptor>,
}

impl FieldSet {
    /// Create an empty set for the named logger
    pub fn new(logger: impl Into<String>) -> Self {
        Self {
            logger: logger.into(),
            fields: Vec::new(),
        }
    }

    /// Register a field
    ///
    /// # Errors
    ///
    /// Returns `DuplicateField` if a field with the same name is registered.
    pub fn add(&mut self, field: FieldDescriptor) -> ActivityResult<()> {
        if self.contains(field.name()) {
            return Err(ActivityError::DuplicateField {
                logger: self.logger.clone(),
                name: field.name().to_string(),
            });
        }

        self.fields.push(field);
        Ok(())
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Fields in registration order
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    /// Field names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name()).collect()
    }

    pub fn logger(&self) -> &str {
        &self.logger
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
