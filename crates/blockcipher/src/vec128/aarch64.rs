//! AArch64 lanes over `uint64x2_t`.
//!
//! Rotates are synthesized with the NEON variable shift (negative counts
//! shift right); the byte-granular amounts (`R = 8`) use a single `tbl`
//! byte permute instead.
//!
//! # Safety
//!
//! Uses `unsafe` for NEON loads and stores. Advanced SIMD is baseline on
//! AArch64, so the register operations are safe calls.
#![allow(unsafe_code)]

use core::arch::aarch64::*;

use super::Vector128;

/// Two 64-bit lanes in a NEON register.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub(crate) struct Neon128(uint64x2_t);

impl Vector128 for Neon128 {
  #[inline(always)]
  unsafe fn load(ptr: *const u8) -> Self {
    Self(vreinterpretq_u64_u8(vld1q_u8(ptr)))
  }

  #[inline(always)]
  unsafe fn store(self, ptr: *mut u8) {
    vst1q_u8(ptr, vreinterpretq_u8_u64(self.0));
  }

  #[inline(always)]
  unsafe fn load_splat_pair(ptr: *const u64) -> Self {
    debug_assert!(ptr as usize % 16 == 0);
    Self(vld1q_u64(ptr))
  }

  #[inline(always)]
  fn splat(word: u64) -> Self {
    Self(vdupq_n_u64(word))
  }

  #[inline(always)]
  fn zero() -> Self {
    Self(vdupq_n_u64(0))
  }

  #[inline(always)]
  fn xor(self, other: Self) -> Self {
    Self(veorq_u64(self.0, other.0))
  }

  #[inline(always)]
  fn and(self, other: Self) -> Self {
    Self(vandq_u64(self.0, other.0))
  }

  #[inline(always)]
  fn add64(self, other: Self) -> Self {
    Self(vaddq_u64(self.0, other.0))
  }

  #[inline(always)]
  fn sub64(self, other: Self) -> Self {
    Self(vsubq_u64(self.0, other.0))
  }

  #[inline(always)]
  fn rotl<const R: u32>(self) -> Self {
    const { assert!(R >= 1 && R <= 63) };
    if R == 8 {
      // Rotate each 8-byte lane left by one byte position.
      let mask: [u8; 16] = [7, 0, 1, 2, 3, 4, 5, 6, 15, 8, 9, 10, 11, 12, 13, 14];
      // SAFETY: reads the 16-byte mask array.
      let mask = unsafe { vld1q_u8(mask.as_ptr()) };
      Self(vreinterpretq_u64_u8(vqtbl1q_u8(vreinterpretq_u8_u64(self.0), mask)))
    } else {
      let left = vshlq_u64(self.0, vdupq_n_s64(R as i64));
      let right = vshlq_u64(self.0, vdupq_n_s64(R as i64 - 64));
      Self(vorrq_u64(left, right))
    }
  }

  #[inline(always)]
  fn rotr<const R: u32>(self) -> Self {
    const { assert!(R >= 1 && R <= 63) };
    if R == 8 {
      // Rotate each 8-byte lane right by one byte position.
      let mask: [u8; 16] = [1, 2, 3, 4, 5, 6, 7, 0, 9, 10, 11, 12, 13, 14, 15, 8];
      // SAFETY: reads the 16-byte mask array.
      let mask = unsafe { vld1q_u8(mask.as_ptr()) };
      Self(vreinterpretq_u64_u8(vqtbl1q_u8(vreinterpretq_u8_u64(self.0), mask)))
    } else {
      let left = vshlq_u64(self.0, vdupq_n_s64(64 - R as i64));
      let right = vshlq_u64(self.0, vdupq_n_s64(-(R as i64)));
      Self(vorrq_u64(left, right))
    }
  }

  #[inline(always)]
  fn unpack_hi64(a: Self, b: Self) -> Self {
    Self(vcombine_u64(vget_high_u64(a.0), vget_high_u64(b.0)))
  }

  #[inline(always)]
  fn unpack_lo64(a: Self, b: Self) -> Self {
    Self(vcombine_u64(vget_low_u64(a.0), vget_low_u64(b.0)))
  }
}
