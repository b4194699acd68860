//! Portable two-lane implementation.
//!
//! Scalar stand-in for a 128-bit register: two `u64` lanes updated with plain
//! integer arithmetic. Always available, serves as the dispatch fallback and
//! as the oracle the SIMD backends are verified against.

use super::Vector128;

/// Two scalar 64-bit lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Soft128 {
  /// Lane 0: the eight bytes at the lower address.
  lo: u64,
  /// Lane 1: the eight bytes at the higher address.
  hi: u64,
}

impl Vector128 for Soft128 {
  #[inline(always)]
  unsafe fn load(ptr: *const u8) -> Self {
    let words = ptr.cast::<u64>();
    Self {
      lo: words.read_unaligned(),
      hi: words.add(1).read_unaligned(),
    }
  }

  #[inline(always)]
  unsafe fn store(self, ptr: *mut u8) {
    let words = ptr.cast::<u64>();
    words.write_unaligned(self.lo);
    words.add(1).write_unaligned(self.hi);
  }

  #[inline(always)]
  unsafe fn load_splat_pair(ptr: *const u64) -> Self {
    debug_assert!(ptr as usize % 16 == 0);
    Self {
      lo: ptr.read(),
      hi: ptr.add(1).read(),
    }
  }

  #[inline(always)]
  fn splat(word: u64) -> Self {
    Self { lo: word, hi: word }
  }

  #[inline(always)]
  fn zero() -> Self {
    Self { lo: 0, hi: 0 }
  }

  #[inline(always)]
  fn xor(self, other: Self) -> Self {
    Self {
      lo: self.lo ^ other.lo,
      hi: self.hi ^ other.hi,
    }
  }

  #[inline(always)]
  fn and(self, other: Self) -> Self {
    Self {
      lo: self.lo & other.lo,
      hi: self.hi & other.hi,
    }
  }

  #[inline(always)]
  fn add64(self, other: Self) -> Self {
    Self {
      lo: self.lo.wrapping_add(other.lo),
      hi: self.hi.wrapping_add(other.hi),
    }
  }

  #[inline(always)]
  fn sub64(self, other: Self) -> Self {
    Self {
      lo: self.lo.wrapping_sub(other.lo),
      hi: self.hi.wrapping_sub(other.hi),
    }
  }

  #[inline(always)]
  fn rotl<const R: u32>(self) -> Self {
    Self {
      lo: self.lo.rotate_left(R),
      hi: self.hi.rotate_left(R),
    }
  }

  #[inline(always)]
  fn rotr<const R: u32>(self) -> Self {
    Self {
      lo: self.lo.rotate_right(R),
      hi: self.hi.rotate_right(R),
    }
  }

  #[inline(always)]
  fn unpack_hi64(a: Self, b: Self) -> Self {
    Self { lo: a.hi, hi: b.hi }
  }

  #[inline(always)]
  fn unpack_lo64(a: Self, b: Self) -> Self {
    Self { lo: a.lo, hi: b.lo }
  }
}
