//! Scalar SPECK-128 reference.
//!
//! Obviously-correct single-block implementation over plain `u64` words,
//! used as the oracle for every vector kernel and by the schedule tests.
//! `round_keys` is the scalar layout.

pub(crate) fn encrypt_block(mut x: u64, mut y: u64, round_keys: &[u64]) -> (u64, u64) {
  for &rk in round_keys {
    x = x.rotate_right(8).wrapping_add(y) ^ rk;
    y = y.rotate_left(3) ^ x;
  }
  (x, y)
}

pub(crate) fn decrypt_block(mut x: u64, mut y: u64, round_keys: &[u64]) -> (u64, u64) {
  for &rk in round_keys.iter().rev() {
    y = (y ^ x).rotate_right(3);
    x = (x ^ rk).wrapping_sub(y).rotate_left(8);
  }
  (x, y)
}
