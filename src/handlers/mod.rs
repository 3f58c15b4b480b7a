//! HTTP handlers for the record collection.

pub mod data;
pub use data::*;
