//! powerpc64 AltiVec/VSX entry points for SPECK-128.
#![allow(unsafe_code)]

use traits::BlockFlags;

use super::kernels;
use crate::adv::process_blocks_128;
use crate::vec128::powerpc64::Vsx128;

/// # Safety
///
/// ISA 2.07 vector instructions must be available (guaranteed by the
/// compile-time target check in the dispatcher); pointer contract as in
/// [`process_blocks_128`].
#[target_feature(enable = "altivec", enable = "vsx", enable = "power8-vector")]
pub(crate) unsafe fn enc_advanced_process_blocks(
  subkeys: &[u64],
  rounds: usize,
  in_blocks: *const u8,
  xor_blocks: *const u8,
  out_blocks: *mut u8,
  length: usize,
  flags: BlockFlags,
) -> usize {
  process_blocks_128::<Vsx128, _, _>(
    kernels::enc_pair::<Vsx128>,
    kernels::enc_six::<Vsx128>,
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
/// ISA 2.07 vector instructions must be available (guaranteed by the
/// compile-time target check in the dispatcher); pointer contract as in
/// [`process_blocks_128`].
#[target_feature(enable = "altivec", enable = "vsx", enable = "power8-vector")]
pub(crate) unsafe fn dec_advanced_process_blocks(
  subkeys: &[u64],
  rounds: usize,
  in_blocks: *const u8,
  xor_blocks: *const u8,
  out_blocks: *mut u8,
  length: usize,
  flags: BlockFlags,
) -> usize {
  process_blocks_128::<Vsx128, _, _>(
    kernels::dec_pair::<Vsx128>,
    kernels::dec_six::<Vsx128>,
    subkeys,
    rounds,
    in_blocks,
    xor_blocks,
    out_blocks,
    length,
    flags,
  )
}
