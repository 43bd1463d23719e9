//! Search filter module
//!
//! Defines the closed set of filter kinds, validated filter values and the
//! per-invocation filter collection.

mod collection;
mod kind;

pub use collection::{Filter, FilterCollection, FilterValue};
pub use kind::FilterKind;
