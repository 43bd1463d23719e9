//! Search composition module
//!
//! Coordinates provider listing, per-provider filter validation and
//! single-provider dispatch.

mod composer;
mod models;

pub use composer::{FilterSpec, ProviderInfo, SearchComposer};
pub use models::*;
