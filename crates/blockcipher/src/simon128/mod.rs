//! SIMON-128 bulk processing.
//!
//! SIMON-128 is a Feistel block cipher with a 128-bit block and 128/192/256
//! bit keys (68/69/72 rounds) built from rotate, AND and XOR:
//!
//! ```text
//! f(v) = (v <<< 2) ^ ((v <<< 1) & (v <<< 8))
//! enc round: (x, y) = (y ^ f(x) ^ k, x)
//! ```
//!
//! The 192-bit schedule has an odd round count; the kernels absorb the
//! leftover half-swap so all three key sizes share one code path.
//!
//! [`Simon128`] owns the expanded schedule and fans blocks out to the best
//! kernel the CPU supports; the processing model is identical to
//! [`Speck128`](crate::Speck128).
#![allow(unsafe_code)]

mod kernels;
mod portable;
mod reference;
mod schedule;

#[cfg(feature = "alloc")]
pub mod kernel_test;

#[cfg(target_arch = "x86_64")]
mod x86_64;

#[cfg(target_arch = "aarch64")]
mod aarch64;

#[cfg(target_arch = "powerpc64")]
mod powerpc64;

#[cfg(test)]
mod proptests;

use traits::{BlockCipherBatch, BlockFlags, KeyLengthError};

use crate::adv::BLOCK_SIZE;
#[cfg(any(test, feature = "alloc"))]
use crate::adv::{join_block, split_block};
use crate::dispatch::{backend_name, check_block_args, check_counter_args};

/// SIMON-128 with an expanded key schedule.
///
/// See the [module documentation](self) for the processing model.
#[derive(Clone)]
pub struct Simon128 {
  schedule: schedule::Schedule,
}

impl Simon128 {
  /// Expand `key` (16, 24 or 32 bytes, least-significant word first).
  ///
  /// # Errors
  ///
  /// Returns [`KeyLengthError`] for any other key length.
  pub fn new(key: &[u8]) -> Result<Self, KeyLengthError> {
    Ok(Self {
      schedule: schedule::expand(key)?,
    })
  }

  /// Rounds in the expanded schedule (68, 69 or 72).
  #[inline]
  #[must_use]
  pub fn rounds(&self) -> usize {
    self.schedule.rounds
  }

  /// Name of the kernel backend the dispatcher would select.
  #[must_use]
  pub fn backend_name() -> &'static str {
    backend_name()
  }

  /// Encrypt whole blocks of `input` into `output` under `flags`.
  ///
  /// Returns the number of trailing input bytes left unprocessed. See
  /// [`BlockCipherBatch::encrypt_blocks`] for the full contract.
  pub fn encrypt_blocks(
    &self,
    input: &[u8],
    xor: Option<&[u8]>,
    output: &mut [u8],
    flags: BlockFlags,
  ) -> usize {
    check_block_args(input, xor, output, flags);
    // SAFETY: lengths checked above, buffers disjoint (distinct borrows),
    // counter flag rejected.
    unsafe {
      self.dispatch_enc(
        input.as_ptr(),
        xor.map_or(core::ptr::null(), <[u8]>::as_ptr),
        output.as_mut_ptr(),
        input.len(),
        flags,
      )
    }
  }

  /// Decrypt whole blocks of `input` into `output` under `flags`.
  pub fn decrypt_blocks(
    &self,
    input: &[u8],
    xor: Option<&[u8]>,
    output: &mut [u8],
    flags: BlockFlags,
  ) -> usize {
    check_block_args(input, xor, output, flags);
    // SAFETY: as in `encrypt_blocks`.
    unsafe {
      self.dispatch_dec(
        input.as_ptr(),
        xor.map_or(core::ptr::null(), <[u8]>::as_ptr),
        output.as_mut_ptr(),
        input.len(),
        flags,
      )
    }
  }

  /// Produce `output.len() / 16` counter blocks through the encryption
  /// kernels, advancing `counter` in place.
  pub fn encrypt_counter_blocks(
    &self,
    counter: &mut [u8; BLOCK_SIZE],
    xor: Option<&[u8]>,
    output: &mut [u8],
  ) -> usize {
    check_counter_args(xor, output);
    // SAFETY: counter is a writable block; output covers `length` bytes.
    unsafe {
      self.dispatch_enc(
        counter.as_ptr(),
        xor.map_or(core::ptr::null(), <[u8]>::as_ptr),
        output.as_mut_ptr(),
        output.len(),
        BlockFlags::ALLOW_PARALLEL | BlockFlags::INPUT_IS_COUNTER,
      )
    }
  }

  /// Counter processing through the decryption kernels; contract as in
  /// [`encrypt_counter_blocks`](Self::encrypt_counter_blocks).
  pub fn decrypt_counter_blocks(
    &self,
    counter: &mut [u8; BLOCK_SIZE],
    xor: Option<&[u8]>,
    output: &mut [u8],
  ) -> usize {
    check_counter_args(xor, output);
    // SAFETY: as in `encrypt_counter_blocks`.
    unsafe {
      self.dispatch_dec(
        counter.as_ptr(),
        xor.map_or(core::ptr::null(), <[u8]>::as_ptr),
        output.as_mut_ptr(),
        output.len(),
        BlockFlags::ALLOW_PARALLEL | BlockFlags::INPUT_IS_COUNTER,
      )
    }
  }

  /// Scalar round keys (decryption layout).
  #[inline]
  pub(crate) fn scalar_keys(&self) -> &[u64] {
    &self.schedule.scalar[..self.schedule.rounds]
  }

  #[inline]
  fn splat_keys(&self) -> &[u64] {
    &self.schedule.splat.0[..self.schedule.rounds * 2]
  }

  /// # Safety
  ///
  /// Pointer contract as in [`crate::adv::process_blocks_128`].
  pub(crate) unsafe fn dispatch_enc(
    &self,
    in_blocks: *const u8,
    xor_blocks: *const u8,
    out_blocks: *mut u8,
    length: usize,
    flags: BlockFlags,
  ) -> usize {
    let subkeys = self.splat_keys();
    let rounds = self.schedule.rounds;

    #[cfg(target_arch = "x86_64")]
    if platform::caps().has(platform::caps::x86::SSSE3) {
      // SAFETY: SSSE3 verified; pointer contract forwarded.
      return x86_64::enc_advanced_process_blocks(
        subkeys, rounds, in_blocks, xor_blocks, out_blocks, length, flags,
      );
    }

    #[cfg(target_arch = "aarch64")]
    if platform::caps().has(platform::caps::aarch64::NEON) {
      // SAFETY: NEON verified; pointer contract forwarded.
      return aarch64::enc_advanced_process_blocks(
        subkeys, rounds, in_blocks, xor_blocks, out_blocks, length, flags,
      );
    }

    #[cfg(target_arch = "powerpc64")]
    if platform::caps().has(platform::caps::powerpc64::VECTOR_READY) {
      // SAFETY: ISA 2.07 vectors verified; pointer contract forwarded.
      return powerpc64::enc_advanced_process_blocks(
        subkeys, rounds, in_blocks, xor_blocks, out_blocks, length, flags,
      );
    }

    // SAFETY: no ISA requirements; pointer contract forwarded.
    portable::enc_advanced_process_blocks(subkeys, rounds, in_blocks, xor_blocks, out_blocks, length, flags)
  }

  /// # Safety
  ///
  /// Pointer contract as in [`crate::adv::process_blocks_128`].
  pub(crate) unsafe fn dispatch_dec(
    &self,
    in_blocks: *const u8,
    xor_blocks: *const u8,
    out_blocks: *mut u8,
    length: usize,
    flags: BlockFlags,
  ) -> usize {
    let subkeys = self.scalar_keys();
    let rounds = self.schedule.rounds;

    #[cfg(target_arch = "x86_64")]
    if platform::caps().has(platform::caps::x86::SSSE3) {
      // SAFETY: SSSE3 verified; pointer contract forwarded.
      return x86_64::dec_advanced_process_blocks(
        subkeys, rounds, in_blocks, xor_blocks, out_blocks, length, flags,
      );
    }

    #[cfg(target_arch = "aarch64")]
    if platform::caps().has(platform::caps::aarch64::NEON) {
      // SAFETY: NEON verified; pointer contract forwarded.
      return aarch64::dec_advanced_process_blocks(
        subkeys, rounds, in_blocks, xor_blocks, out_blocks, length, flags,
      );
    }

    #[cfg(target_arch = "powerpc64")]
    if platform::caps().has(platform::caps::powerpc64::VECTOR_READY) {
      // SAFETY: ISA 2.07 vectors verified; pointer contract forwarded.
      return powerpc64::dec_advanced_process_blocks(
        subkeys, rounds, in_blocks, xor_blocks, out_blocks, length, flags,
      );
    }

    // SAFETY: no ISA requirements; pointer contract forwarded.
    portable::dec_advanced_process_blocks(subkeys, rounds, in_blocks, xor_blocks, out_blocks, length, flags)
  }

  /// Scalar single-block encryption (reference path), for harness use.
  #[cfg(any(test, feature = "alloc"))]
  pub(crate) fn reference_encrypt_block(&self, block: [u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
    let (x, y) = split_block(&block);
    let (x, y) = reference::encrypt_block(x, y, self.scalar_keys());
    join_block(x, y)
  }

  /// Scalar single-block decryption (reference path), for harness use.
  #[cfg(any(test, feature = "alloc"))]
  pub(crate) fn reference_decrypt_block(&self, block: [u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
    let (x, y) = split_block(&block);
    let (x, y) = reference::decrypt_block(x, y, self.scalar_keys());
    join_block(x, y)
  }
}

impl BlockCipherBatch for Simon128 {
  const BLOCK_SIZE: usize = BLOCK_SIZE;

  fn rounds(&self) -> usize {
    self.rounds()
  }

  fn encrypt_blocks(&self, input: &[u8], xor: Option<&[u8]>, output: &mut [u8], flags: BlockFlags) -> usize {
    Simon128::encrypt_blocks(self, input, xor, output, flags)
  }

  fn decrypt_blocks(&self, input: &[u8], xor: Option<&[u8]>, output: &mut [u8], flags: BlockFlags) -> usize {
    Simon128::decrypt_blocks(self, input, xor, output, flags)
  }

  fn encrypt_counter_blocks(&self, counter: &mut [u8; 16], xor: Option<&[u8]>, output: &mut [u8]) -> usize {
    Simon128::encrypt_counter_blocks(self, counter, xor, output)
  }

  fn decrypt_counter_blocks(&self, counter: &mut [u8; 16], xor: Option<&[u8]>, output: &mut [u8]) -> usize {
    Simon128::decrypt_counter_blocks(self, counter, xor, output)
  }
}
