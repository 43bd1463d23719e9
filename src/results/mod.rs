//! Result models returned by search providers

mod types;

pub use types::*;
