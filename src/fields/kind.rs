//! Field resolution strategies

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::media::resolve_media;
use super::relation::resolve_relation;
use crate::models::Snapshot;

/// User-supplied resolver
pub type ResolveFn = Arc<dyn Fn(&Snapshot) -> Result<Value, String> + Send + Sync>;

/// How a raw attribute becomes a storable value
#[derive(Clone)]
pub enum FieldResolverKind {
    /// The attribute as stored on the record
    Plain,
    /// A value derived from a pre-loaded related record
    Relation { attribute: Option<String> },
    /// URLs of a pre-loaded media collection
    Media { gallery: bool },
    /// A user-supplied closure over the whole snapshot
    Custom(ResolveFn),
}

impl FieldResolverKind {
    /// Short name of the strategy
    pub fn name(&self) -> &'static str {
        match self {
            FieldResolverKind::Plain => "plain",
            FieldResolverKind::Relation { .. } => "relation",
            FieldResolverKind::Media { .. } => "media",
            FieldResolverKind::Custom(_) => "custom",
        }
    }

    /// Resolve the value of `field` from a snapshot
    pub fn resolve(&self, field: &str, snapshot: &Snapshot) -> Result<Value, String> {
        match self {
            FieldResolverKind::Plain => Ok(snapshot.value(field)),
            FieldResolverKind::Relation { attribute } => {
                resolve_relation(snapshot.value(field), attribute.as_deref())
            }
            FieldResolverKind::Media { gallery } => {
                resolve_media(snapshot.get(field).unwrap_or(&Value::Null), *gallery)
            }
            FieldResolverKind::Custom(resolve) => resolve(snapshot),
        }
    }
}

impl fmt::Debug for FieldResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldResolverKind::Plain => write!(f, "Plain"),
            FieldResolverKind::Relation { attribute } => f
                .debug_struct("Relation")
                .field("attribute", attribute)
                .finish(),
            FieldResolverKind::Media { gallery } => {
                f.debug_struct("Media").field("gallery", gallery).finish()
            }
            FieldResolverKind::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
