//! Request handler module
//!
//! Responsible for request routing dispatch, the conversion endpoint and the static pages.

pub mod convert;
pub mod pages;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
