//! Portable SIMON-128 entry points.
//!
//! Runs the generic kernels on the scalar two-lane backend. Always available;
//! serves as the dispatch fallback and as the reference the accelerated
//! backends are compared against.
#![allow(unsafe_code)]

use traits::BlockFlags;

use super::kernels;
use crate::adv::process_blocks_128;
use crate::vec128::portable::Soft128;

/// # Safety
///
/// Pointer contract as in [`process_blocks_128`]; no ISA requirements.
pub(crate) unsafe fn enc_advanced_process_blocks(
  subkeys: &[u64],
  rounds: usize,
  in_blocks: *const u8,
  xor_blocks: *const u8,
  out_blocks: *mut u8,
  length: usize,
  flags: BlockFlags,
) -> usize {
  process_blocks_128::<Soft128, _, _>(
    kernels::enc_pair::<Soft128>,
    kernels::enc_six::<Soft128>,
    subkeys,
    rounds,
    in_blocks,
    xor_blocks,
    out_blocks,
    length,
    flags,
  )
}

/// # Safety
///
/// Pointer contract as in [`process_blocks_128`]; no ISA requirements.
pub(crate) unsafe fn dec_advanced_process_blocks(
  subkeys: &[u64],
  rounds: usize,
  in_blocks: *const u8,
  xor_blocks: *const u8,
  out_blocks: *mut u8,
  length: usize,
  flags: BlockFlags,
) -> usize {
  process_blocks_128::<Soft128, _, _>(
    kernels::dec_pair::<Soft128>,
    kernels::dec_six::<Soft128>,
    subkeys,
    rounds,
    in_blocks,
    xor_blocks,
    out_blocks,
    length,
    flags,
  )
}
