//! CPU capability representation.
//!
//! [`CpuCaps`] is a compact bitset of ISA features relevant to the lwcipher
//! kernels, together with the architecture it was detected on. Bits are
//! architecture-specific but the API is uniform; each architecture gets its
//! own region of the bitset so a stray comparison across architectures can
//! never claim a false capability.

/// 64-bit feature bitset.
///
/// Enough room for the features the workspace dispatches on. Each
/// architecture uses a disjoint region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct CapBits(pub u64);

impl CapBits {
  /// Empty bitset (no features).
  pub const NONE: Self = Self(0);

  /// Create a bitset with a single bit set.
  #[inline]
  #[must_use]
  pub const fn from_bit(bit: u8) -> Self {
    Self(1u64 << bit)
  }

  /// Check if all bits in `other` are set in `self`.
  #[inline]
  #[must_use]
  pub const fn contains(self, other: Self) -> bool {
    (self.0 & other.0) == other.0
  }

  /// Union of two bitsets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Check if the bitset is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }
}

impl core::ops::BitOr for CapBits {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self {
    self.union(rhs)
  }
}

impl core::ops::BitOrAssign for CapBits {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

/// x86 / x86_64 feature bits.
pub mod x86 {
  use super::CapBits;

  /// SSE2 (baseline on x86_64).
  pub const SSE2: CapBits = CapBits::from_bit(0);
  /// SSSE3 (`pshufb`, required by the byte-permute rotate).
  pub const SSSE3: CapBits = CapBits::from_bit(1);
}

/// aarch64 feature bits.
pub mod aarch64 {
  use super::CapBits;

  /// Advanced SIMD (baseline on AArch64).
  pub const NEON: CapBits = CapBits::from_bit(16);
}

/// powerpc64 feature bits.
pub mod powerpc64 {
  use super::CapBits;

  /// AltiVec vector facility.
  pub const ALTIVEC: CapBits = CapBits::from_bit(32);
  /// VSX (vector-scalar extension, ISA 2.06).
  pub const VSX: CapBits = CapBits::from_bit(33);
  /// ISA 2.07 vector instructions (64-bit lane arithmetic).
  pub const POWER8: CapBits = CapBits::from_bit(34);

  /// Everything the 128-bit cipher kernels need on POWER.
  pub const VECTOR_READY: CapBits = CapBits(ALTIVEC.0 | VSX.0 | POWER8.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  Aarch64,
  Powerpc64,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    #[cfg(target_arch = "x86_64")]
    {
      Self::X86_64
    }
    #[cfg(target_arch = "aarch64")]
    {
      Self::Aarch64
    }
    #[cfg(target_arch = "powerpc64")]
    {
      Self::Powerpc64
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64", target_arch = "powerpc64")))]
    {
      Self::Other
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// CpuCaps
// ─────────────────────────────────────────────────────────────────────────────

/// Detected CPU capabilities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CpuCaps {
  /// Architecture the bits were detected on.
  pub arch: Arch,
  /// Feature bits.
  pub bits: CapBits,
}

impl CpuCaps {
  /// No capabilities (portable kernels only).
  pub const NONE: Self = Self {
    arch: Arch::Other,
    bits: CapBits::NONE,
  };

  /// Capabilities for the current architecture with the given bits.
  #[inline]
  #[must_use]
  pub const fn new(bits: CapBits) -> Self {
    Self {
      arch: Arch::current(),
      bits,
    }
  }

  /// Check if all features in `wanted` are available.
  #[inline]
  #[must_use]
  pub const fn has(self, wanted: CapBits) -> bool {
    self.bits.contains(wanted)
  }
}
