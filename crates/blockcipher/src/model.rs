//! Scalar model of the bulk driver.
//!
//! Independent block-at-a-time re-implementation of the driver's flag
//! contract, written against byte positions instead of pointers. The vector
//! driver is checked against this model by the per-cipher harnesses and the
//! fuzz targets. Not part of the public API surface proper, but reachable
//! through the `kernel_test` modules so out-of-crate test tooling can use it.

use traits::BlockFlags;

use crate::adv::BLOCK_SIZE;

/// Model of `process_blocks_128` for non-counter flags.
///
/// `block_fn` is the scalar single-block cipher. Panics if `flags` requests
/// counter processing.
pub(crate) fn process_blocks(
  block_fn: impl Fn([u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE],
  input: &[u8],
  xor: Option<&[u8]>,
  output: &mut [u8],
  flags: BlockFlags,
) -> usize {
  assert!(!flags.contains(BlockFlags::INPUT_IS_COUNTER));

  let len = input.len();
  let blocks = len / BLOCK_SIZE;
  let reverse = flags.contains(BlockFlags::REVERSE_DIRECTION);
  let pinned = flags.contains(BlockFlags::DONT_INCREMENT_POINTERS);
  let xor_input = xor.is_some() && flags.contains(BlockFlags::XOR_INPUT);
  let xor_output = xor.is_some() && !flags.contains(BlockFlags::XOR_INPUT);

  for k in 0..blocks {
    // Pinned pointers stay on the (possibly repositioned) first block; the
    // xor stream always advances.
    let moving = if reverse {
      len - BLOCK_SIZE - k * BLOCK_SIZE
    } else {
      k * BLOCK_SIZE
    };
    let pos = if pinned {
      if reverse {
        len - BLOCK_SIZE
      } else {
        0
      }
    } else {
      moving
    };

    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(&input[pos..pos + BLOCK_SIZE]);

    if xor_input {
      if let Some(stream) = xor {
        for (b, s) in block.iter_mut().zip(&stream[moving..moving + BLOCK_SIZE]) {
          *b ^= s;
        }
      }
    }

    let mut block = block_fn(block);

    if xor_output {
      if let Some(stream) = xor {
        for (b, s) in block.iter_mut().zip(&stream[moving..moving + BLOCK_SIZE]) {
          *b ^= s;
        }
      }
    }

    output[pos..pos + BLOCK_SIZE].copy_from_slice(&block);
  }

  len - blocks * BLOCK_SIZE
}

/// Model of counter processing: prefix preserved, low eight bytes a
/// big-endian counter advanced once per output block and written back.
pub(crate) fn process_counter_blocks(
  block_fn: impl Fn([u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE],
  counter: &mut [u8; BLOCK_SIZE],
  xor: Option<&[u8]>,
  output: &mut [u8],
) -> usize {
  let len = output.len();
  let blocks = len / BLOCK_SIZE;

  let mut prefix = [0u8; 8];
  prefix.copy_from_slice(&counter[..8]);
  let mut low = [0u8; 8];
  low.copy_from_slice(&counter[8..]);
  let base = u64::from_be_bytes(low);

  for k in 0..blocks {
    let mut block = [0u8; BLOCK_SIZE];
    block[..8].copy_from_slice(&prefix);
    block[8..].copy_from_slice(&base.wrapping_add(k as u64).to_be_bytes());

    let mut block = block_fn(block);

    if let Some(stream) = xor {
      let pos = k * BLOCK_SIZE;
      for (b, s) in block.iter_mut().zip(&stream[pos..pos + BLOCK_SIZE]) {
        *b ^= s;
      }
    }

    let pos = k * BLOCK_SIZE;
    output[pos..pos + BLOCK_SIZE].copy_from_slice(&block);
  }

  counter[8..].copy_from_slice(&base.wrapping_add(blocks as u64).to_be_bytes());
  len - blocks * BLOCK_SIZE
}
