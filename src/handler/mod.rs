//! Request handler module
//!
//! Response strategies and the path table that dispatches to them.

pub mod router;
pub mod strategy;

// Re-export main entry point
pub use router::{handle_request, Route, Router, BASIC_PATH, REFERENCE_PATH};
pub use strategy::{CopyDelivery, ReferenceDelivery, ResponseStrategy};
