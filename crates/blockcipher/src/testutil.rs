//! Shared helpers for the in-crate test suites.

extern crate alloc;

use alloc::vec::Vec;

/// Key bytes from the most-significant-first word list printed in vector
/// tables (memory order is least significant word first).
pub(crate) fn key_bytes(words: &[u64]) -> Vec<u8> {
  let mut bytes = Vec::with_capacity(words.len() * 8);
  for word in words.iter().rev() {
    bytes.extend_from_slice(&word.to_ne_bytes());
  }
  bytes
}

/// Deterministic filler bytes (xorshift over the seed).
pub(crate) fn fill_pattern(seed: u64, len: usize) -> Vec<u8> {
  let mut state = seed
    .wrapping_mul(0x9E37_79B9_7F4A_7C15)
    .wrapping_add(0x2545_F491_4F6C_DD1D);
  (0..len)
    .map(|_| {
      state ^= state << 13;
      state ^= state >> 7;
      state ^= state << 17;
      state as u8
    })
    .collect()
}
