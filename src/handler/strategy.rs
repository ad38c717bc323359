//! Response strategies
//!
//! A strategy decides how the shared payload becomes a response body. The
//! two variants differ only in ownership: one copies the payload into a
//! fresh buffer per request, the other hands hyper a reference to it.

use hyper::body::Bytes;

/// Body-construction policy bound to a route
pub trait ResponseStrategy: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// One-line description printed at startup
    fn description(&self) -> &'static str;

    /// Build the body for one request.
    ///
    /// `contents` lives for the whole process and must not be mutated.
    /// Implementations must not block.
    fn body(&self, contents: &'static [u8]) -> Bytes;
}

/// Copies the payload into a newly allocated buffer for every request
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyDelivery;

impl ResponseStrategy for CopyDelivery {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn description(&self) -> &'static str {
        "basic content (memory copy)"
    }

    fn body(&self, contents: &'static [u8]) -> Bytes {
        Bytes::copy_from_slice(contents)
    }
}

/// Attaches the payload itself as the body, without copying.
///
/// The buffer is never released through the body: the content store
/// outlives every response.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceDelivery;

impl ResponseStrategy for ReferenceDelivery {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn description(&self) -> &'static str {
        "basic content (reference)"
    }

    fn body(&self, contents: &'static [u8]) -> Bytes {
        Bytes::from_static(contents)
    }
}
