//! Error types for cipher construction.
//!
//! Bulk processing itself has no recoverable failure modes; the only fallible
//! operation in the workspace is accepting key material.

use core::fmt;

/// Key material has an unsupported length.
///
/// The 128-bit-block ciphers in this workspace accept 128-, 192- or 256-bit
/// keys (16, 24 or 32 bytes). Anything else is rejected at construction time.
///
/// # Examples
///
/// ```
/// use traits::KeyLengthError;
///
/// fn check(key: &[u8]) -> Result<(), KeyLengthError> {
///   match key.len() {
///     16 | 24 | 32 => Ok(()),
///     n => Err(KeyLengthError::new(n)),
///   }
/// }
///
/// assert!(check(&[0u8; 32]).is_ok());
/// assert!(check(&[0u8; 17]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct KeyLengthError {
  len: usize,
}

impl KeyLengthError {
  /// Create an error recording the rejected length.
  #[inline]
  #[must_use]
  pub const fn new(len: usize) -> Self {
    Self { len }
  }

  /// The rejected key length in bytes.
  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.len
  }
}

impl fmt::Display for KeyLengthError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "unsupported key length: {} bytes (expected 16, 24 or 32)", self.len)
  }
}

impl core::error::Error for KeyLengthError {}
