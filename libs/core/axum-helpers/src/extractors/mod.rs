//! Custom extractors for common request patterns.

pub mod id_path;
pub mod json;

pub use id_path::IdPath;
pub use json::AppJson;
