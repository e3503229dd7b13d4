//! Catalog module - the things being compared and the dimensions they are
//! compared on.
//!
//! - `Entity` - a named record from an entity-set collection
//! - `Criterion` - an entity plus its kind, value scale and direction

mod criterion;
mod entity;

pub use criterion::{
    Criterion, CriterionDefinition, CriterionKind, CriterionOption, CriterionScale, Direction,
};
pub use entity::Entity;
