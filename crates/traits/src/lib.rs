//! Core block-cipher traits for lwcipher.
//!
//! This crate provides the contracts that the lwcipher implementation crates
//! conform to. It is `no_std` compatible and has zero dependencies.
//!
//! # Contents
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`BlockFlags`] | Flag bitset steering the bulk block driver |
//! | [`BlockCipherBatch`] | Batch encryption/decryption interface consumed by mode drivers |
//! | [`KeyLengthError`] | Rejection of key material with an unsupported length |
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod cipher;
pub mod error;
mod flags;

pub use cipher::BlockCipherBatch;
pub use error::KeyLengthError;
pub use flags::BlockFlags;
