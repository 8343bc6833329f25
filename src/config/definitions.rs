//! Logger definitions file
//!
//! Loggers can be declared in YAML instead of code:
//!
//! ```yaml
//! loggers:
//!   - name: posts
//!     subject_type: post
//!     soft_deletes: true
//!     fields:
//!       - name: title
//!       - name: cover
//!         type: media
//!         rounded: square
//!       - name: author
//!         type: relation
//!         attribute: name
//!       - name: price
//!         cast: float
//! ```
//!
//! Every definition is built through the same field builder as code-defined
//! loggers, so configuration errors surface while loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audit::{EventKind, LoggerDefinition};
use crate::binding::RecordSchema;
use crate::error::{ActivityError, ActivityResult};
use crate::fields::{Field, FieldBuilder, RoundedStyle};
use crate::models::ValueType;

/// Root of the definitions file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefinitionsFile {
    #[serde(default)]
    pub loggers: Vec<LoggerSpec>,
}

/// One logger as declared in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerSpec {
    pub name: String,
    pub subject_type: String,
    #[serde(default)]
    pub soft_deletes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventKind>>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// Resolution strategy named in YAML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Plain,
    Relation,
    Media,
}

/// One field as declared in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, rename = "type")]
    pub field_type: FieldType,
    /// Related attribute to store (relation fields)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default)]
    pub gallery: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounded: Option<RoundedStyle>,
    #[serde(default)]
    pub cast: ValueType,
}

impl FieldSpec {
    /// Translate into builder calls
    ///
    /// # Errors
    ///
    /// Returns `InvalidField` for settings the declared type does not use
    /// (`gallery` outside media fields, `attribute` outside relations).
    pub fn to_builder(&self) -> ActivityResult<FieldBuilder> {
        if self.gallery && self.field_type != FieldType::Media {
            return Err(ActivityError::invalid_field(
                &self.name,
                "gallery is only valid on media fields",
            ));
        }

        if self.attribute.is_some() && self.field_type != FieldType::Relation {
            return Err(ActivityError::invalid_field(
                &self.name,
                "attribute is only valid on relation fields",
            ));
        }

        let mut builder = Field::make(&self.name);

        if let Some(label) = &self.label {
            builder = builder.label(label);
        }

        builder = match self.field_type {
            FieldType::Plain => builder,
            FieldType::Relation => match &self.attribute {
                Some(attribute) => builder.relation_attribute(attribute),
                None => builder.relation(),
            },
            FieldType::Media => builder.media(self.gallery),
        };

        builder = match self.rounded {
            Some(RoundedStyle::Circle) => builder.circle(),
            Some(RoundedStyle::Square) => builder.square(),
            None => builder,
        };

        Ok(builder.cast(self.cast))
    }
}

impl LoggerSpec {
    /// Build the record schema and logger definition
    pub fn build(&self, default_events: &[EventKind]) -> ActivityResult<(RecordSchema, LoggerDefinition)> {
        let events = self
            .events
            .clone()
            .unwrap_or_else(|| default_events.to_vec());

        let mut definition =
            LoggerDefinition::new(&self.name, &self.subject_type).events(events);

        for field in &self.fields {
            definition = definition.field(field.to_builder()?)?;
        }

        let schema = RecordSchema::new(&self.subject_type).soft_deletes(self.soft_deletes);
        Ok((schema, definition))
    }
}

impl DefinitionsFile {
    /// Parse definitions from YAML
    pub fn from_yaml(yaml: &str) -> ActivityResult<Self> {
        let file: DefinitionsFile = serde_yaml::from_str(yaml)?;
        file.check_names()?;
        Ok(file)
    }

    /// Read definitions from disk; a missing file means no loggers
    pub fn load(path: &Path) -> ActivityResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ActivityError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_yaml(&contents)
    }

    /// Build every declared logger
    pub fn build_all(
        &self,
        default_events: &[EventKind],
    ) -> ActivityResult<Vec<(RecordSchema, LoggerDefinition)>> {
        self.loggers
            .iter()
            .map(|spec| spec.build(default_events))
            .collect()
    }

    fn check_names(&self) -> ActivityResult<()> {
        for (i, logger) in self.loggers.iter().enumerate() {
            if logger.name.trim().is_empty() || logger.subject_type.trim().is_empty() {
                return Err(ActivityError::Config(format!(
                    "Logger #{} needs a name and a subject_type",
                    i + 1
                )));
            }

            if self.loggers[..i].iter().any(|l| l.name == logger.name) {
                return Err(ActivityError::Config(format!(
                    "Logger '{}' is defined more than once",
                    logger.name
                )));
            }
        }
        Ok(())
    }
}
