//! powerpc64 lanes over `core::simd`.
//!
//! POWER8 VSX has a native 64-bit lane rotate (`vrld`), so unlike the x86 and
//! NEON backends there is no byte-permute special case: the shift-or rotate
//! below is recognized by the compiler and lowered to the single rotate
//! instruction for every amount. Lane swizzles lower to `xxpermdi`, and
//! because the portable-SIMD lane order is memory order on both endians, no
//! hand-maintained big/little-endian permute masks are needed.
//!
//! Requires a 64-bit POWER target built with ISA 2.07 vectors (baseline on
//! powerpc64le).
#![allow(unsafe_code)]

use core::simd::{simd_swizzle, u64x2};

use super::Vector128;

/// Two 64-bit lanes in a VSX register.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub(crate) struct Vsx128(u64x2);

impl Vector128 for Vsx128 {
  #[inline(always)]
  unsafe fn load(ptr: *const u8) -> Self {
    let words = ptr.cast::<[u64; 2]>().read_unaligned();
    Self(u64x2::from_array(words))
  }

  #[inline(always)]
  unsafe fn store(self, ptr: *mut u8) {
    ptr.cast::<[u64; 2]>().write_unaligned(self.0.to_array());
  }

  #[inline(always)]
  unsafe fn load_splat_pair(ptr: *const u64) -> Self {
    debug_assert!(ptr as usize % 16 == 0);
    Self(u64x2::from_array([ptr.read(), ptr.add(1).read()]))
  }

  #[inline(always)]
  fn splat(word: u64) -> Self {
    Self(u64x2::splat(word))
  }

  #[inline(always)]
  fn zero() -> Self {
    Self(u64x2::splat(0))
  }

  #[inline(always)]
  fn xor(self, other: Self) -> Self {
    Self(self.0 ^ other.0)
  }

  #[inline(always)]
  fn and(self, other: Self) -> Self {
    Self(self.0 & other.0)
  }

  #[inline(always)]
  fn add64(self, other: Self) -> Self {
    Self(self.0 + other.0)
  }

  #[inline(always)]
  fn sub64(self, other: Self) -> Self {
    Self(self.0 - other.0)
  }

  #[inline(always)]
  fn rotl<const R: u32>(self) -> Self {
    const { assert!(R >= 1 && R <= 63) };
    Self((self.0 << u64x2::splat(R as u64)) | (self.0 >> u64x2::splat(64 - R as u64)))
  }

  #[inline(always)]
  fn rotr<const R: u32>(self) -> Self {
    const { assert!(R >= 1 && R <= 63) };
    Self((self.0 >> u64x2::splat(R as u64)) | (self.0 << u64x2::splat(64 - R as u64)))
  }

  #[inline(always)]
  fn unpack_hi64(a: Self, b: Self) -> Self {
    Self(simd_swizzle!(a.0, b.0, [1, 3]))
  }

  #[inline(always)]
  fn unpack_lo64(a: Self, b: Self) -> Self {
    Self(simd_swizzle!(a.0, b.0, [0, 2]))
  }
}
