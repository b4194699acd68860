//! Scalar SIMON-128 reference.
//!
//! Single-block Feistel with the per-round swap written out explicitly, so
//! odd round counts need no special casing. `round_keys` is the scalar
//! layout. Oracle for the vector kernels.

#[inline]
fn f(v: u64) -> u64 {
  v.rotate_left(2) ^ (v.rotate_left(1) & v.rotate_left(8))
}

pub(crate) fn encrypt_block(mut x: u64, mut y: u64, round_keys: &[u64]) -> (u64, u64) {
  for &rk in round_keys {
    let next_x = y ^ f(x) ^ rk;
    y = x;
    x = next_x;
  }
  (x, y)
}

pub(crate) fn decrypt_block(mut x: u64, mut y: u64, round_keys: &[u64]) -> (u64, u64) {
  for &rk in round_keys.iter().rev() {
    let next_y = x ^ f(y) ^ rk;
    x = y;
    y = next_y;
  }
  (x, y)
}
