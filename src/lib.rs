//! Synthetic-content HTTP benchmark server
//!
//! Serves one immutable payload on `/ind` (copied per request) and `/ref`
//! (referenced without copying) so the two body-ownership strategies can be
//! compared under load.

pub mod config;
pub mod content;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use content::ContentStore;
pub use error::{Error, Result};
