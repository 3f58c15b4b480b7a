//! Request extractors.

pub mod record;

pub use record::RecordBody;
