//! Observed HTTP responses

mod raw;
mod status;

pub use raw::RawResponse;
pub use status::StatusCode;
