//! Vectorized SIMON-128 and SPECK-128 bulk block processing.
//!
//! This crate implements the bulk-encryption core for two 128-bit block
//! ciphers, processing two cipher blocks per 128-bit vector (one 64-bit
//! half-state per lane) and interleaving three independent block pairs to
//! hide instruction latency. Chaining modes that tolerate parallel block
//! processing (ECB, CTR, CBC decryption, OFB/CFB fan-out) drive it through a
//! single flag-steered entry point per cipher and direction.
//!
//! # Backends
//!
//! | Architecture | Kernel | Selected when |
//! |--------------|--------|---------------|
//! | x86_64 | SSSE3 (`pshufb` byte-rotate) | SSSE3 detected |
//! | aarch64 | NEON (`tbl` byte-rotate) | always (baseline) |
//! | powerpc64 | AltiVec/VSX (native 64-bit rotate) | ISA 2.07 target |
//! | any | portable two-lane scalar | fallback |
//!
//! Backend selection happens per call from the cached [`platform::caps()`]
//! answer; the portable backend is also the oracle the accelerated kernels
//! are verified against.
//!
//! # Quick Start
//!
//! ```
//! use blockcipher::{BlockFlags, Speck128};
//!
//! let key = [0u8; 16];
//! let cipher = Speck128::new(&key)?;
//!
//! let plaintext = [0u8; 64];
//! let mut ciphertext = [0u8; 64];
//! let remaining =
//!   cipher.encrypt_blocks(&plaintext, None, &mut ciphertext, BlockFlags::ALLOW_PARALLEL);
//! assert_eq!(remaining, 0);
//! # Ok::<(), blockcipher::KeyLengthError>(())
//! ```
//!
//! # Block layout
//!
//! A 16-byte block is the pair of host-native 64-bit half-states `(x, y)`
//! stored low half first, so a vector load places `y` in lane 0 and `x` in
//! lane 1 on every supported target. Callers holding wire-format (big-endian)
//! blocks byte-swap outside this crate.
//!
//! # Feature Flags
//!
//! - `std` (default): runtime CPU detection for kernel dispatch
//! - `alloc`: the [`speck128::kernel_test`]/[`simon128::kernel_test`]
//!   cross-verification harnesses
#![no_std]
#![cfg_attr(target_arch = "powerpc64", feature(portable_simd, powerpc_target_feature))]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod adv;
mod dispatch;
mod vec128;

#[cfg(any(test, feature = "alloc"))]
mod model;

#[cfg(test)]
mod testutil;

pub mod simon128;
pub mod speck128;

pub use simon128::Simon128;
pub use speck128::Speck128;
// Re-export the contracts for convenience.
pub use traits::{BlockCipherBatch, BlockFlags, KeyLengthError};
