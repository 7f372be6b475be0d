//! BLAKE2 and BLAKE3 hash engines.
//!
//! This crate is `no_std` compatible. Runtime dependencies are limited to
//! `no_std`-clean helpers (constant-time comparison, optional hex encoding and
//! optional `tracing` events). Dev-only dependencies are used for oracle
//! testing and benchmarking.
//!
//! # Modules
//!
//! - [`crypto::blake2`] - BLAKE2b and BLAKE2s with the full parameter block
//!   (keying, salt, personalization, tree hashing).
//! - [`crypto::blake3`] - BLAKE3 hash, keyed hash, key derivation and XOF.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | `std::io` adapters on the traits (implies `alloc`) |
//! | `alloc` | Yes | Hex encoding and `Vec` outputs |
//! | `tracing` | No | Debug/trace events for rejected input and tree construction |
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

pub mod crypto;
mod util;

pub use traits::{Digest, FinalizedError, ParamError, VerificationError, Xof};
