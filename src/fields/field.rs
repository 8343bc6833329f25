//! Field descriptors and their builder
//!
//! A field descriptor declares one tracked attribute of a record. Descriptors
//! are configured through [`FieldBuilder`] and frozen by
//! [`FieldBuilder::build`]; after that they are read-only.
//!
//! ```rust,ignore
//! let cover = Field::make("cover").label("Cover image").media(false).build()?;
//! let tags = Field::make("tags").relation_attribute("name").build()?;
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::kind::FieldResolverKind;
use crate::error::{ActivityError, ActivityResult};
use crate::models::{headline, Snapshot, ValueType};

/// Shape used when rendering media thumbnails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundedStyle {
    #[default]
    Circle,
    Square,
}

impl std::fmt::Display for RoundedStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundedStyle::Circle => write!(f, "circle"),
            RoundedStyle::Square => write!(f, "square"),
        }
    }
}

/// One tracked attribute of a record
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    label: String,
    resolver: FieldResolverKind,
    rounded: Option<RoundedStyle>,
    gallery: bool,
    cast: ValueType,
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn resolver(&self) -> &FieldResolverKind {
        &self.resolver
    }

    /// Thumbnail style, set only on media fields
    pub fn rounded(&self) -> Option<RoundedStyle> {
        self.rounded
    }

    pub fn is_gallery(&self) -> bool {
        self.gallery
    }

    pub fn cast(&self) -> ValueType {
        self.cast
    }

    /// Resolve the value this field stores for a snapshot
    ///
    /// Dispatches on the resolver strategy, then casts the result to the
    /// declared value type. Never fetches data.
    pub fn storable_value(&self, snapshot: &Snapshot) -> ActivityResult<Value> {
        let raw = self
            .resolver
            .resolve(&self.name, snapshot)
            .map_err(|reason| ActivityError::resolver(&self.name, reason))?;

        self.cast
            .cast(raw)
            .map_err(|reason| ActivityError::resolver(&self.name, reason))
    }
}

/// Entry point of the fluent field configuration API
pub struct Field;

impl Field {
    /// Start configuring a field tracking the named attribute
    pub fn make(name: impl Into<String>) -> FieldBuilder {
        FieldBuilder::new(name)
    }
}

/// Fluent builder for [`FieldDescriptor`]
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    name: String,
    label: Option<String>,
    resolver: FieldResolverKind,
    media: bool,
    gallery: bool,
    rounded: Option<RoundedStyle>,
    cast: ValueType,
    problem: Option<String>,
}

impl FieldBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            resolver: FieldResolverKind::Plain,
            media: false,
            gallery: false,
            rounded: None,
            cast: ValueType::Any,
            problem: None,
        }
    }

    /// Display label (defaults to the headlined name)
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Store the pre-loaded related value as is
    pub fn relation(self) -> Self {
        self.with_relation(None)
    }

    /// Store one attribute of the pre-loaded related record(s)
    pub fn relation_attribute(self, attribute: impl Into<String>) -> Self {
        self.with_relation(Some(attribute.into()))
    }

    fn with_relation(mut self, attribute: Option<String>) -> Self {
        self.resolver = FieldResolverKind::Relation { attribute };
        self.media = false;
        self.gallery = false;
        self.rounded = None;
        self
    }

    /// Store media URLs: all of them for a gallery, otherwise the first
    ///
    /// Galleries default to square thumbnails, single images to circles.
    pub fn media(mut self, gallery: bool) -> Self {
        self.resolver = FieldResolverKind::Media { gallery };
        self.media = true;
        self.gallery = gallery;
        self.rounded = Some(if gallery {
            RoundedStyle::Square
        } else {
            RoundedStyle::Circle
        });
        self
    }

    /// Round media thumbnails (media fields only)
    pub fn circle(self) -> Self {
        self.with_rounded(RoundedStyle::Circle)
    }

    /// Square media thumbnails (media fields only)
    pub fn square(self) -> Self {
        self.with_rounded(RoundedStyle::Square)
    }

    fn with_rounded(mut self, style: RoundedStyle) -> Self {
        if self.media {
            self.rounded = Some(style);
        } else if self.problem.is_none() {
            self.problem = Some(format!("{}() is only valid after media()", style));
        }
        self
    }

    /// Resolve the value with a closure over the whole snapshot
    pub fn resolve_using<F>(mut self, resolve: F) -> Self
    where
        F: Fn(&Snapshot) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.resolver = FieldResolverKind::Custom(Arc::new(resolve));
        self
    }

    /// Declared type resolved values are cast to
    pub fn cast(mut self, cast: ValueType) -> Self {
        self.cast = cast;
        self
    }

    /// Validate and freeze the configuration
    pub fn build(self) -> ActivityResult<FieldDescriptor> {
        if self.name.trim().is_empty() {
            return Err(ActivityError::invalid_field(
                self.name,
                "field name cannot be empty",
            ));
        }

        if let Some(problem) = self.problem {
            return Err(ActivityError::invalid_field(self.name, problem));
        }

        let label = self.label.unwrap_or_else(|| headline(&self.name));

        Ok(FieldDescriptor {
            name: self.name,
            label,
            resolver: self.resolver,
            rounded: if self.media { self.rounded } else { None },
            gallery: self.media && self.gallery,
            cast: self.cast,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_defaults() {
        let field = Field::make("cover_image").build().unwrap();
        assert_eq!(field.name(), "cover_image");
        assert_eq!(field.label(), "Cover image");
        assert_eq!(field.resolver().name(), "plain");
        assert_eq!(field.rounded(), None);
        assert!(!field.is_gallery());
        assert_eq!(field.cast(), ValueType::Any);
    }

    #[test]
    fn test_media_styles() {
        let single = Field::make("avatar").media(false).build().unwrap();
        assert_eq!(single.rounded(), Some(RoundedStyle::Circle));
        assert!(!single.is_gallery());

        let gallery = Field::make("photos").media(true).build().unwrap();
        assert_eq!(gallery.rounded(), Some(RoundedStyle::Square));
        assert!(gallery.is_gallery());

        let round_gallery = Field::make("photos").media(true).circle().build().unwrap();
        assert_eq!(round_gallery.rounded(), Some(RoundedStyle::Circle));
    }

    #[test]
    fn test_style_requires_media() {
        let err = Field::make("title").circle().build().unwrap_err();
        assert!(matches!(err, ActivityError::InvalidField { .. }));
        assert!(err.to_string().contains("circle() is only valid after media()"));

        // Declaring the style before media() is still an error
        assert!(Field::make("cover").square().media(false).build().is_err());
    }

    #[test]
    fn test_relation_clears_media() {
        let field = Field::make("author")
            .media(true)
            .relation_attribute("name")
            .build()
            .unwrap();
        assert_eq!(field.resolver().name(), "relation");
        assert_eq!(field.rounded(), None);
        assert!(!field.is_gallery());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(Field::make("  ").build().is_err());
    }

    #[test]
    fn test_resolve_using_wins() {
        let field = Field::make("cover")
            .media(false)
            .resolve_using(|_| Ok(json!("custom")))
            .build()
            .unwrap();
        assert_eq!(field.resolver().name(), "custom");

        let snapshot = Snapshot::default();
        assert_eq!(field.storable_value(&snapshot).unwrap(), json!("custom"));
    }

    #[test]
    fn test_storable_value_casts() {
        let field = Field::make("views").cast(ValueType::Integer).build().unwrap();
        let snapshot = Snapshot::from_value(json!({"views": "12"})).unwrap();
        assert_eq!(field.storable_value(&snapshot).unwrap(), json!(12));

        let bad = Snapshot::from_value(json!({"views": "many"})).unwrap();
        let err = field.storable_value(&bad).unwrap_err();
        assert!(err.is_resolver());
    }

    #[test]
    fn test_custom_error_names_field() {
        let field = Field::make("score")
            .resolve_using(|_| Err("backend unavailable".to_string()))
            .build()
            .unwrap();

        let err = field.storable_value(&Snapshot::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to resolve field 'score': backend unavailable"
        );
    }
}
