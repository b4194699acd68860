//! SIMON-128 round kernels, generic over the vector backend.
//!
//! SIMON's Feistel halves swap after every round; the kernels process rounds
//! in pairs so no physical swap is needed, then handle an odd round count
//! with one extra round and a register swap. Decryption mirrors that tail
//! before walking the pairs backwards.
//!
//! Encryption reads the pre-splatted key layout, decryption broadcasts from
//! the scalar layout.
#![allow(unsafe_code)]

use crate::vec128::Vector128;

/// The SIMON round function `f(v) = (v <<< 2) ^ ((v <<< 1) & (v <<< 8))`.
#[inline(always)]
fn f<V: Vector128>(v: V) -> V {
  v.rotl::<2>().xor(v.rotl::<1>().and(v.rotl::<8>()))
}

#[inline(always)]
pub(crate) fn enc_pair<V: Vector128>(block0: &mut V, block1: &mut V, subkeys: &[u64], rounds: usize) {
  debug_assert!(rounds >= 2 && subkeys.len() >= rounds * 2);

  let mut x1 = V::unpack_hi64(*block0, *block1);
  let mut y1 = V::unpack_lo64(*block0, *block1);

  let mut i = 0;
  while i + 1 < rounds {
    // SAFETY: bounds asserted above; the encryption schedule stores each
    // round key as an aligned splatted pair.
    let rk1 = unsafe { V::load_splat_pair(subkeys.as_ptr().add(i * 2)) };
    y1 = y1.xor(f(x1)).xor(rk1);

    let rk2 = unsafe { V::load_splat_pair(subkeys.as_ptr().add((i + 1) * 2)) };
    x1 = x1.xor(f(y1)).xor(rk2);

    i += 2;
  }

  if rounds & 1 != 0 {
    // SAFETY: as above.
    let rk = unsafe { V::load_splat_pair(subkeys.as_ptr().add((rounds - 1) * 2)) };
    y1 = y1.xor(f(x1)).xor(rk);
    core::mem::swap(&mut x1, &mut y1);
  }

  *block0 = V::unpack_lo64(y1, x1);
  *block1 = V::unpack_hi64(y1, x1);
}

#[inline(always)]
pub(crate) fn enc_six<V: Vector128>(blocks: &mut [V; 6], subkeys: &[u64], rounds: usize) {
  debug_assert!(rounds >= 2 && subkeys.len() >= rounds * 2);

  let mut x1 = V::unpack_hi64(blocks[0], blocks[1]);
  let mut y1 = V::unpack_lo64(blocks[0], blocks[1]);
  let mut x2 = V::unpack_hi64(blocks[2], blocks[3]);
  let mut y2 = V::unpack_lo64(blocks[2], blocks[3]);
  let mut x3 = V::unpack_hi64(blocks[4], blocks[5]);
  let mut y3 = V::unpack_lo64(blocks[4], blocks[5]);

  let mut i = 0;
  while i + 1 < rounds {
    // SAFETY: as in `enc_pair`.
    let rk1 = unsafe { V::load_splat_pair(subkeys.as_ptr().add(i * 2)) };
    y1 = y1.xor(f(x1)).xor(rk1);
    y2 = y2.xor(f(x2)).xor(rk1);
    y3 = y3.xor(f(x3)).xor(rk1);

    let rk2 = unsafe { V::load_splat_pair(subkeys.as_ptr().add((i + 1) * 2)) };
    x1 = x1.xor(f(y1)).xor(rk2);
    x2 = x2.xor(f(y2)).xor(rk2);
    x3 = x3.xor(f(y3)).xor(rk2);

    i += 2;
  }

  if rounds & 1 != 0 {
    // SAFETY: as in `enc_pair`.
    let rk = unsafe { V::load_splat_pair(subkeys.as_ptr().add((rounds - 1) * 2)) };
    y1 = y1.xor(f(x1)).xor(rk);
    y2 = y2.xor(f(x2)).xor(rk);
    y3 = y3.xor(f(x3)).xor(rk);
    core::mem::swap(&mut x1, &mut y1);
    core::mem::swap(&mut x2, &mut y2);
    core::mem::swap(&mut x3, &mut y3);
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
  debug_assert!(rounds >= 2 && subkeys.len() >= rounds);
  let mut rounds = rounds;

  let mut x1 = V::unpack_hi64(*block0, *block1);
  let mut y1 = V::unpack_lo64(*block0, *block1);

  if rounds & 1 != 0 {
    // Undo the encryption tail: swap back, then invert its single round.
    core::mem::swap(&mut x1, &mut y1);
    let rk = V::splat(subkeys[rounds - 1]);
    y1 = y1.xor(rk).xor(f(x1));
    rounds -= 1;
  }

  let mut i = rounds;
  while i >= 2 {
    let rk1 = V::splat(subkeys[i - 1]);
    x1 = x1.xor(f(y1)).xor(rk1);

    let rk2 = V::splat(subkeys[i - 2]);
    y1 = y1.xor(f(x1)).xor(rk2);

    i -= 2;
  }

  *block0 = V::unpack_lo64(y1, x1);
  *block1 = V::unpack_hi64(y1, x1);
}

#[inline(always)]
pub(crate) fn dec_six<V: Vector128>(blocks: &mut [V; 6], subkeys: &[u64], rounds: usize) {
  debug_assert!(rounds >= 2 && subkeys.len() >= rounds);
  let mut rounds = rounds;

  let mut x1 = V::unpack_hi64(blocks[0], blocks[1]);
  let mut y1 = V::unpack_lo64(blocks[0], blocks[1]);
  let mut x2 = V::unpack_hi64(blocks[2], blocks[3]);
  let mut y2 = V::unpack_lo64(blocks[2], blocks[3]);
  let mut x3 = V::unpack_hi64(blocks[4], blocks[5]);
  let mut y3 = V::unpack_lo64(blocks[4], blocks[5]);

  if rounds & 1 != 0 {
    core::mem::swap(&mut x1, &mut y1);
    core::mem::swap(&mut x2, &mut y2);
    core::mem::swap(&mut x3, &mut y3);
    let rk = V::splat(subkeys[rounds - 1]);
    y1 = y1.xor(rk).xor(f(x1));
    y2 = y2.xor(rk).xor(f(x2));
    y3 = y3.xor(rk).xor(f(x3));
    rounds -= 1;
  }

  let mut i = rounds;
  while i >= 2 {
    let rk1 = V::splat(subkeys[i - 1]);
    x1 = x1.xor(f(y1)).xor(rk1);
    x2 = x2.xor(f(y2)).xor(rk1);
    x3 = x3.xor(f(y3)).xor(rk1);

    let rk2 = V::splat(subkeys[i - 2]);
    y1 = y1.xor(f(x1)).xor(rk2);
    y2 = y2.xor(f(x2)).xor(rk2);
    y3 = y3.xor(f(x3)).xor(rk2);

    i -= 2;
  }

  blocks[0] = V::unpack_lo64(y1, x1);
  blocks[1] = V::unpack_hi64(y1, x1);
  blocks[2] = V::unpack_lo64(y2, x2);
  blocks[3] = V::unpack_hi64(y2, x2);
  blocks[4] = V::unpack_lo64(y3, x3);
  blocks[5] = V::unpack_hi64(y3, x3);
}
