//! SPECK-128 key expansion.
//!
//! Key material is 2, 3 or 4 host-native 64-bit words, least-significant key
//! word first in memory. Expansion follows the cipher's own round function
//! applied to the key state. The schedule is materialized twice: once as
//! scalar words (consumed by the decryption kernels via lane broadcast) and
//! once pre-splatted (each word duplicated into an aligned 16-byte pair, so
//! the encryption kernels fetch a round key with one aligned vector load).

use traits::KeyLengthError;

/// Rounds for the largest key size; shorter keys use a prefix.
pub(crate) const MAX_ROUNDS: usize = 34;

/// Pre-splatted round keys: `2 * rounds` words, 16-byte aligned.
#[derive(Clone)]
#[repr(C, align(16))]
pub(crate) struct SplatKeys(pub(crate) [u64; 2 * MAX_ROUNDS]);

/// Expanded SPECK-128 schedule in both layouts.
#[derive(Clone)]
pub(crate) struct Schedule {
  pub(crate) splat: SplatKeys,
  pub(crate) scalar: [u64; MAX_ROUNDS],
  pub(crate) rounds: usize,
}

pub(crate) fn expand(key: &[u8]) -> Result<Schedule, KeyLengthError> {
  let m = match key.len() {
    16 => 2,
    24 => 3,
    32 => 4,
    n => return Err(KeyLengthError::new(n)),
  };
  let rounds = m + 30;

  let mut words = [0u64; 4];
  for (word, chunk) in words.iter_mut().zip(key.chunks_exact(8)) {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(chunk);
    *word = u64::from_ne_bytes(bytes);
  }

  // words[0] is k[0]; words[1..m] seed the l sequence. The l values are kept
  // in a ring of m - 1 slots: the value consumed at step i and the value
  // produced for step i + m - 1 share slot i mod (m - 1).
  let mut k = words[0];
  let mut l = [words[1], words[2], words[3]];

  let mut scalar = [0u64; MAX_ROUNDS];
  for (i, slot) in scalar.iter_mut().enumerate().take(rounds) {
    *slot = k;
    let j = i % (m - 1);
    l[j] = k.wrapping_add(l[j].rotate_right(8)) ^ i as u64;
    k = k.rotate_left(3) ^ l[j];
  }

  let mut splat = SplatKeys([0u64; 2 * MAX_ROUNDS]);
  for (pair, word) in splat.0.chunks_exact_mut(2).zip(scalar.iter()) {
    pair[0] = *word;
    pair[1] = *word;
  }

  Ok(Schedule {
    splat,
    scalar,
    rounds,
  })
}
