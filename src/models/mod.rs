//! Data models

pub mod record;

pub use record::*;
