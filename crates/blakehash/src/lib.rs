//! Portable BLAKE2 and BLAKE3 hashing in safe Rust.
//!
//! `blakehash` bundles BLAKE2b, BLAKE2s (with keying, salt, personalization
//! and tree parameters) and BLAKE3 (hash, keyed hash, key derivation and
//! extendable output) behind the [`Digest`] and [`Xof`] traits. It is `no_std`
//! compatible and contains no `unsafe` code.
//!
//! # Quick Start
//!
//! ```
//! use blakehash::{Blake2b, Blake2bParams, Blake3, Digest, Xof};
//!
//! // One-shot BLAKE2b-512.
//! let digest = Blake2b::digest(b"hello");
//! assert_eq!(&digest.as_bytes()[..4], &[0xe4, 0xcf, 0xa3, 0x9a]);
//!
//! // Keyed, truncated BLAKE2b.
//! let tag = Blake2bParams::new().digest_size(32).key(b"secret").hash(b"hello")?;
//! assert_eq!(tag.as_bytes().len(), 32);
//!
//! // Streaming BLAKE3 with extendable output.
//! let mut hasher = Blake3::new();
//! hasher.update(b"hel")?;
//! hasher.update(b"lo")?;
//! let mut out = [0u8; 64];
//! hasher.finalize_xof().squeeze(&mut out);
//! assert_eq!(out[..32], *Blake3::digest(b"hello").as_bytes());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | `std::io` reader/writer adapters (implies `alloc`) |
//! | `alloc` | Yes | Hex encoding and `Vec` outputs |
//! | `tracing` | No | Debug/trace events under the `hashes` target |
//!
//! ## `no_std` Usage
//!
//! ```toml
//! [dependencies]
//! blakehash = { version = "0.1", default-features = false }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

// =============================================================================
// BLAKE2
// =============================================================================

pub use hashes::crypto::blake2::{
  Blake2, Blake2Hash, Blake2Params, Blake2Variant, Blake2b, Blake2bParams, Blake2s, Blake2sParams, blake2b, blake2s,
};

// =============================================================================
// BLAKE3
// =============================================================================

pub use hashes::crypto::blake3::{self, Blake3, Blake3Hash, Blake3Xof};

// =============================================================================
// Traits and errors
// =============================================================================

pub use traits::{Digest, FinalizedError, ParamError, VerificationError, Xof};
#[cfg(feature = "std")]
pub use traits::io::{DigestReader, DigestWriter};
