//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the conversion logic.

pub mod query;
pub mod response;

// Re-export commonly used types
pub use query::QueryParams;
pub use response::{
    build_405_response, build_500_response, build_html_response, build_json_response,
};
