//! x86_64 lanes over `__m128i`.
//!
//! Rotates are synthesized from the two 64-bit lane shifts; the byte-granular
//! amounts (`R = 8`) use a single SSSE3 `pshufb` instead, which has higher
//! throughput than shift-shift-or on every SSSE3-era core and dominates the
//! SPECK round cost.
//!
//! # Safety
//!
//! Uses `unsafe` for x86 SIMD intrinsics. The SSE2 subset is baseline on
//! x86_64; callers must ensure SSSE3 is available before executing kernels
//! built on these lanes (the dispatcher does this).
#![allow(unsafe_code)]

use core::arch::x86_64::*;

use super::Vector128;

/// Two 64-bit lanes in an XMM register.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub(crate) struct Sse128(__m128i);

impl Vector128 for Sse128 {
  #[inline(always)]
  unsafe fn load(ptr: *const u8) -> Self {
    Self(_mm_loadu_si128(ptr.cast()))
  }

  #[inline(always)]
  unsafe fn store(self, ptr: *mut u8) {
    _mm_storeu_si128(ptr.cast(), self.0);
  }

  #[inline(always)]
  unsafe fn load_splat_pair(ptr: *const u64) -> Self {
    debug_assert!(ptr as usize % 16 == 0);
    Self(_mm_load_si128(ptr.cast()))
  }

  #[inline(always)]
  fn splat(word: u64) -> Self {
    // SAFETY: SSE2 is baseline on x86_64.
    Self(unsafe { _mm_set1_epi64x(word as i64) })
  }

  #[inline(always)]
  fn zero() -> Self {
    // SAFETY: SSE2 is baseline on x86_64.
    Self(unsafe { _mm_setzero_si128() })
  }

  #[inline(always)]
  fn xor(self, other: Self) -> Self {
    // SAFETY: SSE2 is baseline on x86_64.
    Self(unsafe { _mm_xor_si128(self.0, other.0) })
  }

  #[inline(always)]
  fn and(self, other: Self) -> Self {
    // SAFETY: SSE2 is baseline on x86_64.
    Self(unsafe { _mm_and_si128(self.0, other.0) })
  }

  #[inline(always)]
  fn add64(self, other: Self) -> Self {
    // SAFETY: SSE2 is baseline on x86_64.
    Self(unsafe { _mm_add_epi64(self.0, other.0) })
  }

  #[inline(always)]
  fn sub64(self, other: Self) -> Self {
    // SAFETY: SSE2 is baseline on x86_64.
    Self(unsafe { _mm_sub_epi64(self.0, other.0) })
  }

  #[inline(always)]
  fn rotl<const R: u32>(self) -> Self {
    const { assert!(R >= 1 && R <= 63) };
    if R == 8 {
      // Rotate each 8-byte lane left by one byte position.
      // SAFETY: SSSE3 `_mm_set_epi8`/`_mm_shuffle_epi8`; only reachable from
      // kernels the dispatcher gates on SSSE3.
      Self(unsafe {
        let mask = _mm_set_epi8(14, 13, 12, 11, 10, 9, 8, 15, 6, 5, 4, 3, 2, 1, 0, 7);
        _mm_shuffle_epi8(self.0, mask)
      })
    } else {
      // SAFETY: SSE2 is baseline on x86_64.
      Self(unsafe {
        let left = _mm_sll_epi64(self.0, _mm_cvtsi32_si128(R as i32));
        let right = _mm_srl_epi64(self.0, _mm_cvtsi32_si128(64 - R as i32));
        _mm_or_si128(left, right)
      })
    }
  }

  #[inline(always)]
  fn rotr<const R: u32>(self) -> Self {
    const { assert!(R >= 1 && R <= 63) };
    if R == 8 {
      // Rotate each 8-byte lane right by one byte position.
      // SAFETY: SSSE3 `_mm_set_epi8`/`_mm_shuffle_epi8`; only reachable from
      // kernels the dispatcher gates on SSSE3.
      Self(unsafe {
        let mask = _mm_set_epi8(8, 15, 14, 13, 12, 11, 10, 9, 0, 7, 6, 5, 4, 3, 2, 1);
        _mm_shuffle_epi8(self.0, mask)
      })
    } else {
      // SAFETY: SSE2 is baseline on x86_64.
      Self(unsafe {
        let left = _mm_sll_epi64(self.0, _mm_cvtsi32_si128(64 - R as i32));
        let right = _mm_srl_epi64(self.0, _mm_cvtsi32_si128(R as i32));
        _mm_or_si128(left, right)
      })
    }
  }

  #[inline(always)]
  fn unpack_hi64(a: Self, b: Self) -> Self {
    // SAFETY: SSE2 is baseline on x86_64.
    Self(unsafe { _mm_unpackhi_epi64(a.0, b.0) })
  }

  #[inline(always)]
  fn unpack_lo64(a: Self, b: Self) -> Self {
    // SAFETY: SSE2 is baseline on x86_64.
    Self(unsafe { _mm_unpacklo_epi64(a.0, b.0) })
  }
}
