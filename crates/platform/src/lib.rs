//! CPU detection and capabilities for lwcipher.
//!
//! This crate is the single source of truth for CPU feature detection across
//! the lwcipher workspace. Cipher crates query [`caps()`] instead of doing
//! ad-hoc detection, so every kernel-selection decision is made from the same
//! cached answer.
//!
//! # Main Entry Point
//!
//! ```ignore
//! let caps = platform::caps();
//!
//! if caps.has(platform::caps::x86::SSSE3) {
//!     // Use the SSSE3 kernels
//! }
//! ```
//!
//! # Design
//!
//! 1. **Capabilities only**: this crate answers "what instructions can run
//!    here", never "what is fastest". Selection policy belongs to the caller.
//! 2. **Zero-cost when possible**: compile-time features are folded in via
//!    `cfg!(target_feature)`.
//! 3. **Cached otherwise**: runtime detection runs once and is cached in a
//!    `OnceLock` (std) or atomics (no_std).
//! 4. **Miri-safe**: under Miri, detection always reports no SIMD support.
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::{Arch, CapBits, CpuCaps};

/// Get detected CPU capabilities.
///
/// This is the main entry point for capability-based dispatch.
///
/// # Caching
///
/// - With `std`: results are cached in a `OnceLock` (one-time detection).
/// - Without `std`: results are cached using atomics (one-time detection).
///
/// # Miri
///
/// Under Miri, always returns empty capabilities so tests exercise the
/// portable kernels instead of interpreting SIMD intrinsics.
#[inline]
#[must_use]
pub fn caps() -> CpuCaps {
  detect::caps()
}

/// Set or clear the capabilities override.
///
/// When set, [`caps()`] returns the override instead of detecting. Pass
/// `None` to clear the override and resume detection. Useful for forcing the
/// portable path in tests and for bare-metal deployments where the CPU is
/// known up front.
///
/// # Thread Safety
///
/// Thread-safe, but intended to be called early in program initialization,
/// before dispatch decisions have been cached by callers.
#[inline]
pub fn set_caps_override(value: Option<CpuCaps>) {
  detect::set_caps_override(value);
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  detect::has_override()
}

/// Detect capabilities without caching.
///
/// Useful for tests that need fresh detection.
#[inline]
#[must_use]
pub fn detect_uncached() -> CpuCaps {
  detect::detect_uncached()
}
