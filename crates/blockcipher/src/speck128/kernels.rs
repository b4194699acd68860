//! SPECK-128 round kernels, generic over the vector backend.
//!
//! Each kernel transposes its blocks into half-state lane form (x lanes and
//! y lanes of two independent blocks per vector), runs the rounds, and
//! transposes back. The six-block kernel drives three pairs in lockstep,
//! grouping the per-round operations by kind so the three dependency chains
//! interleave across execution ports.
//!
//! Encryption reads the pre-splatted key layout (aligned pairs), decryption
//! broadcasts from the scalar layout.
#![allow(unsafe_code)]

use crate::vec128::Vector128;

#[inline(always)]
pub(crate) fn enc_pair<V: Vector128>(block0: &mut V, block1: &mut V, subkeys: &[u64], rounds: usize) {
  debug_assert!(subkeys.len() >= rounds * 2);

  let mut x1 = V::unpack_hi64(*block0, *block1);
  let mut y1 = V::unpack_lo64(*block0, *block1);

  for i in 0..rounds {
    // SAFETY: bounds asserted above; the encryption schedule stores each
    // round key as an aligned splatted pair.
    let rk = unsafe { V::load_splat_pair(subkeys.as_ptr().add(i * 2)) };

    x1 = x1.rotr::<8>();
    x1 = x1.add64(y1);
    x1 = x1.xor(rk);
    y1 = y1.rotl::<3>();
    y1 = y1.xor(x1);
  }

  *block0 = V::unpack_lo64(y1, x1);
  *block1 = V::unpack_hi64(y1, x1);
}

#[inline(always)]
pub(crate) fn enc_six<V: Vector128>(blocks: &mut [V; 6], subkeys: &[u64], rounds: usize) {
  debug_assert!(subkeys.len() >= rounds * 2);

  let mut x1 = V::unpack_hi64(blocks[0], blocks[1]);
  let mut y1 = V::unpack_lo64(blocks[0], blocks[1]);
  let mut x2 = V::unpack_hi64(blocks[2], blocks[3]);
  let mut y2 = V::unpack_lo64(blocks[2], blocks[3]);
  let mut x3 = V::unpack_hi64(blocks[4], blocks[5]);
  let mut y3 = V::unpack_lo64(blocks[4], blocks[5]);

  for i in 0..rounds {
    // SAFETY: as in `enc_pair`.
    let rk = unsafe { V::load_splat_pair(subkeys.as_ptr().add(i * 2)) };

    x1 = x1.rotr::<8>();
    x2 = x2.rotr::<8>();
    x3 = x3.rotr::<8>();
    x1 = x1.add64(y1);
    x2 = x2.add64(y2);
    x3 = x3.add64(y3);
    x1 = x1.xor(rk);
    x2 = x2.xor(rk);
    x3 = x3.xor(rk);
    y1 = y1.rotl::<3>();
    y2 = y2.rotl::<3>();
    y3 = y3.rotl::<3>();
    y1 = y1.xor(x1);
    y2 = y2.xor(x2);
    y3 = y3.xor(x3);
  }

  blocks[0] = V::unpack_lo64(y1, x1);
  blocks[1] = V::unpack_hi64(y1, x1);
  blocks[2] = V::unpack_lo64(y2, x2);
  blocks[3] = V::unpack_hi64(y2, x2);
  blocks[4] = V::unpack_lo64(y3, x3);
  blocks[5] = V::unpack_hi64(y3, x3);
}

#[inline(always)]
pub(crate) fn dec_pair<V: Vector128>(block0: &mut V, block1: &mut V, subkeys: &[u64], rounds: usize) {
  debug_assert!(subkeys.len() >= rounds);

  let mut x1 = V::unpack_hi64(*block0, *block1);
  let mut y1 = V::unpack_lo64(*block0, *block1);

  for i in (0..rounds).rev() {
    let rk = V::splat(subkeys[i]);

    y1 = y1.xor(x1);
    y1 = y1.rotr::<3>();
    x1 = x1.xor(rk);
    x1 = x1.sub64(y1);
    x1 = x1.rotl::<8>();
  }

  *block0 = V::unpack_lo64(y1, x1);
  *block1 = V::unpack_hi64(y1, x1);
}

#[inline(always)]
pub(crate) fn dec_six<V: Vector128>(blocks: &mut [V; 6], subkeys: &[u64], rounds: usize) {
  debug_assert!(subkeys.len() >= rounds);

  let mut x1 = V::unpack_hi64(blocks[0], blocks[1]);
  let mut y1 = V::unpack_lo64(blocks[0], blocks[1]);
  let mut x2 = V::unpack_hi64(blocks[2], blocks[3]);
  let mut y2 = V::unpack_lo64(blocks[2], blocks[3]);
  let mut x3 = V::unpack_hi64(blocks[4], blocks[5]);
  let mut y3 = V::unpack_lo64(blocks[4], blocks[5]);

  for i in (0..rounds).rev() {
    let rk = V::splat(subkeys[i]);

    y1 = y1.xor(x1);
    y2 = y2.xor(x2);
    y3 = y3.xor(x3);
    y1 = y1.rotr::<3>();
    y2 = y2.rotr::<3>();
    y3 = y3.rotr::<3>();
    x1 = x1.xor(rk);
    x2 = x2.xor(rk);
    x3 = x3.xor(rk);
    x1 = x1.sub64(y1);
    x2 = x2.sub64(y2);
    x3 = x3.sub64(y3);
    x1 = x1.rotl::<8>();
    x2 = x2.rotl::<8>();
    x3 = x3.rotl::<8>();
  }

  blocks[0] = V::unpack_lo64(y1, x1);
  blocks[1] = V::unpack_hi64(y1, x1);
  blocks[2] = V::unpack_lo64(y2, x2);
  blocks[3] = V::unpack_hi64(y2, x2);
  blocks[4] = V::unpack_lo64(y3, x3);
  blocks[5] = V::unpack_hi64(y3, x3);
}
