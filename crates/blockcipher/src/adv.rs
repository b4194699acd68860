//! Flag-steered bulk block driver.
//!
//! One driver serves every cipher, direction and backend: it ingests a byte
//! buffer (16-byte alignment not required), assembles vector blocks, applies
//! the pre/post XOR and counter semantics requested through
//! [`BlockFlags`], and hands batches of six blocks to the wide kernel while
//! the narrow two-block kernel mops up. Any sub-block tail is left untouched
//! and reported back to the caller.
//!
//! # Safety
//!
//! The driver works on raw pointers so that in-place processing
//! (`out_blocks == in_blocks`) is expressible; each input block is fully
//! consumed before the corresponding output block is written.
#![allow(unsafe_code)]

use traits::BlockFlags;

use crate::vec128::Vector128;

/// Cipher block size in bytes.
pub(crate) const BLOCK_SIZE: usize = 16;

/// Blocks handled per wide-kernel invocation.
pub(crate) const PARALLEL_BLOCKS: usize = 6;

/// Half-state words of a block: low half is `y`, high half is `x`.
#[cfg(any(test, feature = "alloc"))]
pub(crate) fn split_block(block: &[u8; BLOCK_SIZE]) -> (u64, u64) {
  let mut lo = [0u8; 8];
  let mut hi = [0u8; 8];
  lo.copy_from_slice(&block[..8]);
  hi.copy_from_slice(&block[8..]);
  (u64::from_ne_bytes(hi), u64::from_ne_bytes(lo))
}

/// Serialize a half-state pair as a block: low half first.
#[cfg(any(test, feature = "alloc"))]
pub(crate) fn join_block(x: u64, y: u64) -> [u8; BLOCK_SIZE] {
  let mut block = [0u8; BLOCK_SIZE];
  block[..8].copy_from_slice(&y.to_ne_bytes());
  block[8..].copy_from_slice(&x.to_ne_bytes());
  block
}

/// Encode the counter block for `value`: untouched prefix, big-endian count
/// in the low eight bytes.
#[inline(always)]
fn counter_block(prefix: &[u8; 8], value: u64) -> [u8; BLOCK_SIZE] {
  let mut block = [0u8; BLOCK_SIZE];
  block[..8].copy_from_slice(prefix);
  block[8..].copy_from_slice(&value.to_be_bytes());
  block
}

/// Process whole blocks of `in_blocks` into `out_blocks` under `flags`.
///
/// `pair_kernel` transforms two blocks, `six_kernel` six; both read round
/// keys from `subkeys` in the layout they were compiled for. Returns the
/// number of trailing input bytes left unprocessed.
///
/// # Safety
///
/// - `in_blocks` must be valid for reading `length` bytes and `out_blocks`
///   for writing `length` bytes (16 bytes each when
///   [`BlockFlags::INPUT_IS_COUNTER`] or
///   [`BlockFlags::DONT_INCREMENT_POINTERS`] pins the pointers).
/// - `xor_blocks` is either null or valid for reading `length` bytes.
/// - With [`BlockFlags::INPUT_IS_COUNTER`], `in_blocks` must also be valid
///   for writes: the driver stores the advanced counter back.
/// - Buffers must not overlap except `out_blocks == in_blocks` exactly.
/// - The caller guarantees whatever ISA the kernels were compiled for.
pub(crate) unsafe fn process_blocks_128<V, F2, F6>(
  pair_kernel: F2,
  six_kernel: F6,
  subkeys: &[u64],
  rounds: usize,
  mut in_blocks: *const u8,
  mut xor_blocks: *const u8,
  mut out_blocks: *mut u8,
  mut length: usize,
  flags: BlockFlags,
) -> usize
where
  V: Vector128,
  F2: Fn(&mut V, &mut V, &[u64], usize),
  F6: Fn(&mut [V; PARALLEL_BLOCKS], &[u64], usize),
{
  debug_assert!(rounds > 0);
  debug_assert!(length == 0 || (!in_blocks.is_null() && !out_blocks.is_null()));

  if length < BLOCK_SIZE {
    return length;
  }

  let counter_mode = flags.contains(BlockFlags::INPUT_IS_COUNTER);
  let reverse = flags.contains(BlockFlags::REVERSE_DIRECTION);
  let pinned = flags.contains(BlockFlags::DONT_INCREMENT_POINTERS);
  // A counter block is read and written in place; walking it backwards is
  // not a meaningful combination.
  debug_assert!(!(counter_mode && reverse));

  let mut in_stride: isize = if counter_mode || pinned { 0 } else { BLOCK_SIZE as isize };
  let mut xor_stride: isize = if xor_blocks.is_null() { 0 } else { BLOCK_SIZE as isize };
  let mut out_stride: isize = if pinned { 0 } else { BLOCK_SIZE as isize };

  let xor_input = !xor_blocks.is_null() && flags.contains(BlockFlags::XOR_INPUT);
  let xor_output = !xor_blocks.is_null() && !flags.contains(BlockFlags::XOR_INPUT);

  if reverse {
    let last = (length - BLOCK_SIZE) as isize;
    in_blocks = in_blocks.offset(last);
    if !xor_blocks.is_null() {
      xor_blocks = xor_blocks.offset(last);
    }
    out_blocks = out_blocks.offset(last);
    in_stride = -in_stride;
    xor_stride = -xor_stride;
    out_stride = -out_stride;
  }

  // Counter state is carried as a scalar; blocks are re-encoded per batch so
  // the kernels always see the pre-increment value.
  let mut ctr_prefix = [0u8; 8];
  let mut ctr_base: u64 = 0;
  let mut ctr_produced: u64 = 0;
  if counter_mode {
    core::ptr::copy_nonoverlapping(in_blocks, ctr_prefix.as_mut_ptr(), 8);
    let mut low = [0u8; 8];
    core::ptr::copy_nonoverlapping(in_blocks.add(8), low.as_mut_ptr(), 8);
    ctr_base = u64::from_be_bytes(low);
  }

  if flags.contains(BlockFlags::ALLOW_PARALLEL) {
    while length >= PARALLEL_BLOCKS * BLOCK_SIZE {
      let mut blocks = [V::zero(); PARALLEL_BLOCKS];

      if counter_mode {
        for block in &mut blocks {
          let encoded = counter_block(&ctr_prefix, ctr_base.wrapping_add(ctr_produced));
          ctr_produced += 1;
          *block = V::load(encoded.as_ptr());
        }
      } else {
        for block in &mut blocks {
          *block = V::load(in_blocks);
          in_blocks = in_blocks.offset(in_stride);
        }
      }

      if xor_input {
        for block in &mut blocks {
          *block = block.xor(V::load(xor_blocks));
          xor_blocks = xor_blocks.offset(xor_stride);
        }
      }

      six_kernel(&mut blocks, subkeys, rounds);

      if xor_output {
        for block in &mut blocks {
          *block = block.xor(V::load(xor_blocks));
          xor_blocks = xor_blocks.offset(xor_stride);
        }
      }

      for block in &blocks {
        block.store(out_blocks);
        out_blocks = out_blocks.offset(out_stride);
      }

      length -= PARALLEL_BLOCKS * BLOCK_SIZE;
    }
  }

  while length >= 2 * BLOCK_SIZE {
    let (mut block0, mut block1);

    if counter_mode {
      let encoded = counter_block(&ctr_prefix, ctr_base.wrapping_add(ctr_produced));
      block0 = V::load(encoded.as_ptr());
      let encoded = counter_block(&ctr_prefix, ctr_base.wrapping_add(ctr_produced + 1));
      block1 = V::load(encoded.as_ptr());
      ctr_produced += 2;
    } else {
      block0 = V::load(in_blocks);
      in_blocks = in_blocks.offset(in_stride);
      block1 = V::load(in_blocks);
      in_blocks = in_blocks.offset(in_stride);
    }

    if xor_input {
      block0 = block0.xor(V::load(xor_blocks));
      xor_blocks = xor_blocks.offset(xor_stride);
      block1 = block1.xor(V::load(xor_blocks));
      xor_blocks = xor_blocks.offset(xor_stride);
    }

    pair_kernel(&mut block0, &mut block1, subkeys, rounds);

    if xor_output {
      block0 = block0.xor(V::load(xor_blocks));
      xor_blocks = xor_blocks.offset(xor_stride);
      block1 = block1.xor(V::load(xor_blocks));
      xor_blocks = xor_blocks.offset(xor_stride);
    }

    block0.store(out_blocks);
    out_blocks = out_blocks.offset(out_stride);
    block1.store(out_blocks);
    out_blocks = out_blocks.offset(out_stride);

    length -= 2 * BLOCK_SIZE;
  }

  while length >= BLOCK_SIZE {
    let mut block0;
    // The second slot rides along zero-filled; only the first block is kept.
    let mut block1 = V::zero();

    if counter_mode {
      let encoded = counter_block(&ctr_prefix, ctr_base.wrapping_add(ctr_produced));
      ctr_produced += 1;
      block0 = V::load(encoded.as_ptr());
    } else {
      block0 = V::load(in_blocks);
      in_blocks = in_blocks.offset(in_stride);
    }

    if xor_input {
      block0 = block0.xor(V::load(xor_blocks));
      xor_blocks = xor_blocks.offset(xor_stride);
    }

    pair_kernel(&mut block0, &mut block1, subkeys, rounds);

    if xor_output {
      block0 = block0.xor(V::load(xor_blocks));
      xor_blocks = xor_blocks.offset(xor_stride);
    }

    block0.store(out_blocks);
    out_blocks = out_blocks.offset(out_stride);

    length -= BLOCK_SIZE;
  }

  if counter_mode {
    // Store the next unused counter value back for the caller.
    let next = ctr_base.wrapping_add(ctr_produced).to_be_bytes();
    core::ptr::copy_nonoverlapping(next.as_ptr(), in_blocks.cast_mut().add(8), 8);
  }

  length
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use super::*;
  use crate::vec128::portable::Soft128;

  fn identity_pair(_b0: &mut Soft128, _b1: &mut Soft128, _keys: &[u64], _rounds: usize) {}

  fn identity_six(_blocks: &mut [Soft128; PARALLEL_BLOCKS], _keys: &[u64], _rounds: usize) {}

  fn run(input: &[u8], xor: Option<&[u8]>, output: &mut [u8], flags: BlockFlags) -> usize {
    let keys = [0u64; 2];
    // SAFETY: slices cover the declared lengths; no counter flag in use.
    unsafe {
      process_blocks_128::<Soft128, _, _>(
        identity_pair,
        identity_six,
        &keys,
        1,
        input.as_ptr(),
        xor.map_or(core::ptr::null(), <[u8]>::as_ptr),
        output.as_mut_ptr(),
        input.len(),
        flags,
      )
    }
  }

  #[test]
  fn empty_input_is_untouched() {
    let mut out = [0u8; 0];
    assert_eq!(run(&[], None, &mut out, BlockFlags::NONE), 0);
  }

  #[test]
  fn sub_block_tail_is_reported() {
    let input = [7u8; 15];
    let mut out = [0u8; 15];
    assert_eq!(run(&input, None, &mut out, BlockFlags::NONE), 15);
    assert_eq!(out, [0u8; 15]);

    let input = [7u8; 40];
    let mut out = [0u8; 40];
    assert_eq!(run(&input, None, &mut out, BlockFlags::NONE), 8);
    // Two whole blocks moved, tail untouched.
    assert_eq!(&out[..32], &input[..32]);
    assert_eq!(&out[32..], &[0u8; 8]);
  }

  #[test]
  fn identity_kernel_copies_all_sizes() {
    for blocks in [1usize, 2, 5, 6, 7, 12, 13] {
      let len = blocks * BLOCK_SIZE;
      let input: alloc::vec::Vec<u8> = (0..len).map(|i| i as u8).collect();
      let mut out = alloc::vec![0u8; len];
      assert_eq!(run(&input, None, &mut out, BlockFlags::ALLOW_PARALLEL), 0);
      assert_eq!(out, input);
    }
  }

  #[test]
  fn post_xor_applies_stream() {
    let input = [0xAAu8; 32];
    let xor = [0x55u8; 32];
    let mut out = [0u8; 32];
    assert_eq!(run(&input, Some(&xor), &mut out, BlockFlags::NONE), 0);
    assert_eq!(out, [0xFFu8; 32]);
  }

  #[test]
  fn reverse_direction_mirrors_block_order() {
    // With an identity kernel and forward xor stream, reversing shows up in
    // which xor block lands on which output block.
    let len = 4 * BLOCK_SIZE;
    let input = alloc::vec![0u8; len];
    let xor: alloc::vec::Vec<u8> = (0..len).map(|i| (i / BLOCK_SIZE) as u8).collect();
    let mut out = alloc::vec![0u8; len];
    assert_eq!(
      run(&input, Some(&xor), &mut out, BlockFlags::REVERSE_DIRECTION),
      0
    );
    // Reverse processing pairs the last xor block with the last output block
    // first; with matching strides the pairing is position-preserving.
    assert_eq!(out, xor);
  }
}
