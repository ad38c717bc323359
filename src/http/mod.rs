//! HTTP protocol layer module
//!
//! Response construction helpers shared by the route table.

pub mod response;

// Re-export commonly used types
pub use response::{build_404_response, build_content_response, CONTENT_REASON};
