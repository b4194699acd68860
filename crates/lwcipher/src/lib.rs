//! Vectorized lightweight block ciphers with hardware acceleration.
//!
//! `lwcipher` provides bulk-processing implementations of SIMON-128 and
//! SPECK-128 that pack two cipher blocks per 128-bit vector and interleave
//! independent block groups to hide instruction latency. Kernel selection is
//! automatic (SSSE3, NEON, AltiVec/VSX, portable) from cached CPU detection.
//!
//! # Quick Start
//!
//! ```
//! use lwcipher::{BlockFlags, Speck128};
//!
//! let cipher = Speck128::new(&[0u8; 32])?;
//!
//! let plaintext = [0u8; 96];
//! let mut ciphertext = [0u8; 96];
//! cipher.encrypt_blocks(&plaintext, None, &mut ciphertext, BlockFlags::ALLOW_PARALLEL);
//!
//! let mut recovered = [0u8; 96];
//! cipher.decrypt_blocks(&ciphertext, None, &mut recovered, BlockFlags::ALLOW_PARALLEL);
//! assert_eq!(recovered, plaintext);
//! # Ok::<(), lwcipher::KeyLengthError>(())
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | Runtime CPU detection for optimal dispatch |
//! | `alloc` | Implied by `std` | Kernel cross-verification harnesses |
//!
//! ## `no_std` Usage
//!
//! ```toml
//! [dependencies]
//! lwcipher = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std`, kernel selection uses compile-time feature detection only.
#![cfg_attr(not(feature = "std"), no_std)]

pub use blockcipher::{BlockCipherBatch, BlockFlags, KeyLengthError, Simon128, Speck128};
// Capability introspection, for callers that do their own dispatch.
pub use platform::{caps, CpuCaps};
