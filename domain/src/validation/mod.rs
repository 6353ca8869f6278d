//! Validation of requests and built argument vectors
//!
//! - [`request`]: values against the model's declared types and choices
//! - [`screen`]: tokens against injection and traversal patterns

pub mod request;
pub mod screen;

pub use request::{DefaultRequestValidator, RequestError, RequestValidator};
pub use screen::{ArgumentScreen, ScreeningError, ScreeningPolicy};
