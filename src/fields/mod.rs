//! Field resolution layer
//!
//! Declares which attributes of a record are tracked and how each raw
//! attribute becomes a storable value.
//!
//! - `FieldDescriptor` / `FieldBuilder`: one tracked attribute and its fluent
//!   configuration.
//! - `FieldResolverKind`: the resolution strategy (plain, relation, media,
//!   custom closure).
//! - `FieldSet`: the ordered, name-unique fields of one logger.

pub mod field;
pub mod kind;
pub mod media;
pub mod relation;
pub mod set;

pub use field::{Field, FieldBuilder, FieldDescriptor, RoundedStyle};
pub use kind::{FieldResolverKind, ResolveFn};
pub use set::FieldSet;
