//! Adapters between files and the application layer.

pub mod csv;
pub mod json;
