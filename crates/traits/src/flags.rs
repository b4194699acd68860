//! Flag bitset for the bulk block driver.
//!
//! The driver that fans blocks out to the SIMD kernels is shared between
//! chaining modes. Mode drivers describe what they need through this bitset:
//! whether a secondary byte stream is folded in before or after the cipher,
//! whether the input is a counter block, and which direction the buffer is
//! walked in.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

/// Flags steering a single call into the bulk block driver.
///
/// The zero value requests plain forward block-at-a-time processing. When an
/// xor stream is supplied and [`XOR_INPUT`](Self::XOR_INPUT) is clear, the
/// stream is folded into the cipher *output* instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct BlockFlags(u32);

impl BlockFlags {
  /// No flags set: forward iteration, no xor stream semantics.
  pub const NONE: Self = Self(0);
  /// XOR the secondary stream into the input before the cipher runs.
  pub const XOR_INPUT: Self = Self(1);
  /// Permit the wide (six-block) kernel. Without it only the narrow kernel runs.
  pub const ALLOW_PARALLEL: Self = Self(1 << 1);
  /// The input block is a big-endian counter; the driver encodes and advances it.
  pub const INPUT_IS_COUNTER: Self = Self(1 << 2);
  /// Rewind input/output pointers after each block instead of advancing them.
  pub const DONT_INCREMENT_POINTERS: Self = Self(1 << 3);
  /// Walk the buffers from the last block towards the first.
  pub const REVERSE_DIRECTION: Self = Self(1 << 4);

  /// Create a flag set from raw bits.
  #[inline]
  #[must_use]
  pub const fn from_bits(bits: u32) -> Self {
    Self(bits)
  }

  /// Raw bit representation.
  #[inline]
  #[must_use]
  pub const fn bits(self) -> u32 {
    self.0
  }

  /// Check whether all bits of `other` are set in `self`.
  #[inline]
  #[must_use]
  pub const fn contains(self, other: Self) -> bool {
    (self.0 & other.0) == other.0
  }

  /// Union of two flag sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// `self` without the bits of `other`.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  /// Check whether no flags are set.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }
}

impl BitOr for BlockFlags {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self {
    self.union(rhs)
  }
}

impl BitOrAssign for BlockFlags {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl fmt::Display for BlockFlags {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    const NAMES: &[(BlockFlags, &str)] = &[
      (BlockFlags::XOR_INPUT, "xor-input"),
      (BlockFlags::ALLOW_PARALLEL, "allow-parallel"),
      (BlockFlags::INPUT_IS_COUNTER, "input-is-counter"),
      (BlockFlags::DONT_INCREMENT_POINTERS, "dont-increment-pointers"),
      (BlockFlags::REVERSE_DIRECTION, "reverse-direction"),
    ];

    if self.is_empty() {
      return f.write_str("none");
    }

    let mut first = true;
    for &(flag, name) in NAMES {
      if self.contains(flag) {
        if !first {
          f.write_str("|")?;
        }
        f.write_str(name)?;
        first = false;
      }
    }
    Ok(())
  }
}
