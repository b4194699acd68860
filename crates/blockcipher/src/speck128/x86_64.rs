//! x86_64 SSSE3 entry points for SPECK-128.
//!
//! # Safety
//!
//! Callers must ensure SSSE3 is available before executing these paths
//! (the dispatcher does this).
#![allow(unsafe_code)]

use traits::BlockFlags;

use super::kernels;
use crate::adv::process_blocks_128;
use crate::vec128::x86_64::Sse128;

/// # Safety
///
/// SSSE3 must be available; pointer contract as in [`process_blocks_128`].
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn enc_advanced_process_blocks(
  subkeys: &[u64],
  rounds: usize,
  in_blocks: *const u8,
  xor_blocks: *const u8,
  out_blocks: *mut u8,
  length: usize,
  flags: BlockFlags,
) -> usize {
  process_blocks_128::<Sse128, _, _>(
    kernels::enc_pair::<Sse128>,
    kernels::enc_six::<Sse128>,
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
/// SSSE3 must be available; pointer contract as in [`process_blocks_128`].
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn dec_advanced_process_blocks(
  subkeys: &[u64],
  rounds: usize,
  in_blocks: *const u8,
  xor_blocks: *const u8,
  out_blocks: *mut u8,
  length: usize,
  flags: BlockFlags,
) -> usize {
  process_blocks_128::<Sse128, _, _>(
    kernels::dec_pair::<Sse128>,
    kernels::dec_six::<Sse128>,
    subkeys,
    rounds,
    in_blocks,
    xor_blocks,
    out_blocks,
    length,
    flags,
  )
}
