//! SIMON-128 key expansion.
//!
//! Key material is 2, 3 or 4 host-native 64-bit words, least-significant key
//! word first in memory, expanded to 68/69/72 round keys. Generated keys mix
//! in one bit per round from the cipher's period-62 constant sequence (z2,
//! z3 or z4 depending on the key size). As with SPECK, the schedule is
//! materialized in the scalar layout for decryption and pre-splatted for
//! encryption.

use traits::KeyLengthError;

/// Rounds for the largest key size; shorter keys use a prefix.
pub(crate) const MAX_ROUNDS: usize = 72;

/// `2^64 - 4`, the round constant folded into every generated key word.
const C: u64 = 0xFFFF_FFFF_FFFF_FFFC;

// The z constant sequences, written MSB first exactly as published; bit t of
// a sequence is `(z >> (61 - t)) & 1`.
const Z2: u64 = 0b10101111011100000011010010011000101000010001111110010110110011;
const Z3: u64 = 0b11011011101011000110010111100000010010001010011100110100001111;
const Z4: u64 = 0b11010001111001101011011000100000010111000011001010010011101111;

/// Pre-splatted round keys: `2 * rounds` words, 16-byte aligned.
#[derive(Clone)]
#[repr(C, align(16))]
pub(crate) struct SplatKeys(pub(crate) [u64; 2 * MAX_ROUNDS]);

/// Expanded SIMON-128 schedule in both layouts.
#[derive(Clone)]
pub(crate) struct Schedule {
  pub(crate) splat: SplatKeys,
  pub(crate) scalar: [u64; MAX_ROUNDS],
  pub(crate) rounds: usize,
}

pub(crate) fn expand(key: &[u8]) -> Result<Schedule, KeyLengthError> {
  let (m, rounds, z) = match key.len() {
    16 => (2, 68, Z2),
    24 => (3, 69, Z3),
    32 => (4, 72, Z4),
    n => return Err(KeyLengthError::new(n)),
  };

  let mut k = [0u64; MAX_ROUNDS];
  for (word, chunk) in k.iter_mut().zip(key.chunks_exact(8)) {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(chunk);
    *word = u64::from_ne_bytes(bytes);
  }

  for i in m..rounds {
    let mut tmp = k[i - 1].rotate_right(3);
    if m == 4 {
      tmp ^= k[i - 3];
    }
    tmp ^= tmp.rotate_right(1);
    let z_bit = (z >> (61 - (i - m) % 62)) & 1;
    k[i] = C ^ z_bit ^ k[i - m] ^ tmp;
  }

  let mut splat = SplatKeys([0u64; 2 * MAX_ROUNDS]);
  for (pair, word) in splat.0.chunks_exact_mut(2).zip(k.iter()) {
    pair[0] = *word;
    pair[1] = *word;
  }

  Ok(Schedule {
    splat,
    scalar: k,
    rounds,
  })
}
