//! Rendering module for writing pass outputs.

mod json;

pub use json::{to_json, write_json, write_rendered, JsonFormat};
