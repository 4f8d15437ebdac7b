pub mod headers;

// Re-export middleware functions
pub use headers::{is_origin_allowed, response_headers_middleware};
