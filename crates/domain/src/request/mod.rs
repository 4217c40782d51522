//! Outbound HTTP request types

mod method;
mod outbound;

pub use method::HttpMethod;
pub use outbound::OutboundRequest;
