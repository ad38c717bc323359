//! Synthetic content store
//!
//! Holds the single payload every route serves. The buffer is filled once
//! with a repeating `0..=255` pattern and then promoted to a `'static`
//! slice, so responses can borrow it without copying or reference counting.
//! The memory is reclaimed when the process exits.

use crate::error::{Error, Result};

/// Immutable, process-lifetime payload buffer
#[derive(Debug, Clone, Copy)]
pub struct ContentStore {
    data: &'static [u8],
}

impl ContentStore {
    /// Allocate `length` bytes and fill them with `byte[i] = i mod 256`.
    pub fn new(length: u64) -> Result<Self> {
        if length == 0 {
            return Err(Error::BadContentLength("length must be greater than zero".to_string()));
        }
        let len = usize::try_from(length).map_err(|_| Error::Allocation(length))?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| Error::Allocation(length))?;
        // Truncation is the pattern: offset i holds i mod 256
        #[allow(clippy::cast_possible_truncation)]
        let pattern = (0..len).map(|i| i as u8);
        buf.extend(pattern);

        Ok(Self {
            data: Box::leak(buf.into_boxed_slice()),
        })
    }

    /// Read-only view of the payload. Callers decide whether to copy.
    pub const fn contents(&self) -> &'static [u8] {
        self.data
    }

    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a constructed store; kept for API symmetry with `len`.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_wraps_every_256_bytes() {
        let store = ContentStore::new(1024).unwrap();
        let data = store.contents();
        assert_eq!(data.len(), 1024);
        for (i, byte) in data.iter().enumerate() {
            assert_eq!(usize::from(*byte), i % 256, "mismatch at offset {i}");
        }
        assert_eq!(data[1023], 255);
    }

    #[test]
    fn test_small_store() {
        let store = ContentStore::new(10).unwrap();
        assert_eq!(store.contents(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(store.len(), 10);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_single_byte_store() {
        let store = ContentStore::new(1).unwrap();
        assert_eq!(store.contents(), &[0]);
    }

    #[test]
    fn test_zero_length_rejected() {
        let err = ContentStore::new(0).unwrap_err();
        assert!(matches!(err, Error::BadContentLength(_)));
    }

    #[test]
    fn test_copies_share_the_same_buffer() {
        let store = ContentStore::new(300).unwrap();
        let other = store;
        assert!(std::ptr::eq(store.contents(), other.contents()));
    }
}
