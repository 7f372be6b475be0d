//! Cryptographic hash functions.

pub mod blake2;
pub mod blake3;

pub use blake2::{
  Blake2, Blake2Hash, Blake2Params, Blake2Variant, Blake2b, Blake2bParams, Blake2s, Blake2sParams, blake2b, blake2s,
};
pub use blake3::{Blake3, Blake3Hash, Blake3Xof};
