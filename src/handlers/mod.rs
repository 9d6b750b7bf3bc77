//! HTTP request handlers.

pub mod http;
pub mod pets;

pub use http::*;
pub use pets::*;
