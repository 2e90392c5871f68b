//! Byte View Module
//!
//! Immutable view over cached bytes, plus the byte-length contract every
//! cached value must satisfy.

use std::fmt;

use bytes::Bytes;

// == Byte Length ==
/// Reports how many bytes a cached value accounts for.
///
/// The length must be deterministic: the LRU cache reads it on insert and
/// again on eviction, and both readings have to agree.
pub trait ByteLen {
    fn byte_len(&self) -> usize;
}

impl ByteLen for String {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl ByteLen for Vec<u8> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl ByteLen for Bytes {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

// == Byte View ==
/// An immutable, cheaply cloneable view of a cached value.
///
/// Construction always copies the input, so callers handing bytes to the
/// cache can keep mutating their own buffer.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteView {
    b: Bytes,
}

impl ByteView {
    // == Constructor ==
    /// Copies `data` into a new view.
    pub fn copy_from(data: &[u8]) -> Self {
        Self {
            b: Bytes::copy_from_slice(data),
        }
    }

    /// Number of bytes in the view.
    pub fn len(&self) -> usize {
        self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    /// Returns a fresh copy of the underlying bytes.
    pub fn byte_slice(&self) -> Vec<u8> {
        self.b.to_vec()
    }

    /// Borrows the underlying bytes without copying.
    pub fn as_slice(&self) -> &[u8] {
        &self.b
    }

    /// Shares the underlying buffer, e.g. as an HTTP body.
    pub fn to_bytes(&self) -> Bytes {
        self.b.clone()
    }
}

impl ByteLen for ByteView {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl AsRef<[u8]> for ByteView {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.b))
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView").field("len", &self.len()).finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byteview_copies_input() {
        let mut source = b"630".to_vec();
        let view = ByteView::copy_from(&source);

        source[0] = b'9';

        assert_eq!(view.as_slice(), b"630");
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn test_byte_slice_is_detached() {
        let view = ByteView::copy_from(b"abc");
        let mut copy = view.byte_slice();
        copy.push(b'd');

        assert_eq!(view.to_string(), "abc");
        assert_eq!(copy, b"abcd");
    }

    #[test]
    fn test_byte_len_matches_content() {
        assert_eq!(ByteView::copy_from(b"").byte_len(), 0);
        assert!(ByteView::default().is_empty());
        assert_eq!("hello".to_string().byte_len(), 5);
        assert_eq!(vec![0u8; 7].byte_len(), 7);
        assert_eq!(Bytes::from_static(b"xy").byte_len(), 2);
    }
}
