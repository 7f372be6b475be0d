//! Core hashing traits for blakehash.
//!
//! This crate provides the traits that every engine in the workspace conforms
//! to, plus the error types those engines return. It is `no_std` compatible.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose | Examples |
//! |-------|---------|----------|
//! | [`Digest`] | Streaming hash with a fixed default output | BLAKE2b, BLAKE2s, BLAKE3 |
//! | [`Xof`] | Extendable output, squeezed incrementally | BLAKE3 output reader |
//!
//! # Error Types
//!
//! - [`ParamError`] - Out-of-range construction parameter (digest size, key length, ...)
//! - [`FinalizedError`] - Input fed to a hasher that was already finalized
//! - [`VerificationError`] - Opaque error for MAC/tag verification
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

mod digest;
pub mod error;
#[cfg(feature = "std")]
pub mod io;
mod xof;

pub use digest::Digest;
pub use error::{FinalizedError, ParamError, VerificationError};
pub use xof::Xof;
