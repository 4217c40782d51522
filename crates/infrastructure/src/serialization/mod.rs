//! Human-readable JSON output for files the user may open or diff:
//! run logs and the CLI config.

mod json;

pub use json::{SerializationError, to_json_stable, to_json_stable_bytes};
