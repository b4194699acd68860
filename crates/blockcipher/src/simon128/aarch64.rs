//! AArch64 NEON entry points for SIMON-128.
#![allow(unsafe_code)]

use traits::BlockFlags;

use super::kernels;
use crate::adv::process_blocks_128;
use crate::vec128::aarch64::Neon128;

/// # Safety
///
/// Pointer contract as in [`process_blocks_128`]. Advanced SIMD is baseline
/// on AArch64.
#[target_feature(enable = "neon")]
pub(crate) unsafe fn enc_advanced_process_blocks(
  subkeys: &[u64],
  rounds: usize,
  in_blocks: *const u8,
  xor_blocks: *const u8,
  out_blocks: *mut u8,
  length: usize,
  flags: BlockFlags,
) -> usize {
  process_blocks_128::<Neon128, _, _>(
    kernels::enc_pair::<Neon128>,
    kernels::enc_six::<Neon128>,
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
/// Pointer contract as in [`process_blocks_128`]. Advanced SIMD is baseline
/// on AArch64.
#[target_feature(enable = "neon")]
pub(crate) unsafe fn dec_advanced_process_blocks(
  subkeys: &[u64],
  rounds: usize,
  in_blocks: *const u8,
  xor_blocks: *const u8,
  out_blocks: *mut u8,
  length: usize,
  flags: BlockFlags,
) -> usize {
  process_blocks_128::<Neon128, _, _>(
    kernels::dec_pair::<Neon128>,
    kernels::dec_six::<Neon128>,
    subkeys,
    rounds,
    in_blocks,
    xor_blocks,
    out_blocks,
    length,
    flags,
  )
}
