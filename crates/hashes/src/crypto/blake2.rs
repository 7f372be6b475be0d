//! BLAKE2b and BLAKE2s (RFC 7693).
//!
//! Portable, `no_std`, pure Rust. One incremental engine, [`Blake2`], is
//! written over the sealed [`Blake2Variant`] trait and instantiated as
//! [`Blake2b`] and [`Blake2s`]. The full parameter block is supported:
//! variable digest size, keying (MAC), salt, personalization and the tree
//! fields (fanout, depth, leaf size, node offset, node depth, inner size,
//! last node).
//!
//! Tree hashing is driven by the caller: each node is an independent hasher
//! built from [`Blake2Params`], and a parent node is fed the concatenated
//! digests of its children as ordinary input.
//!
//! ```
//! use hashes::crypto::blake2::{Blake2b, Blake2bParams};
//! use hashes::Digest;
//!
//! let plain = Blake2b::digest(b"hello");
//! assert_eq!(&plain.to_hex()[..16], "e4cfa39a3d37be31");
//!
//! let mut mac = Blake2bParams::new().key(b"secret").to_state()?;
//! mac.update(b"hello")?;
//! assert_eq!(&mac.finalize().to_hex()[..16], "6edf9aa44dfc7590");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![allow(clippy::indexing_slicing)] // Block buffer offsets are bounded by BLOCK_LEN

mod compress;
mod params;
mod variant;

use core::fmt;

use traits::{Digest, FinalizedError, ParamError, VerificationError};

use self::{
  compress::compress,
  variant::{MAX_BLOCK_LEN, MAX_OUT_LEN},
};
pub use self::{
  params::Blake2Params,
  variant::{Blake2Variant, Blake2bVariant, Blake2sVariant},
};
pub use crate::util::Word;
use crate::util::{ct_eq, fmt_hex, store_words};

/// BLAKE2b hasher (64-bit, digests up to 64 bytes).
pub type Blake2b = Blake2<Blake2bVariant>;
/// BLAKE2s hasher (32-bit, digests up to 32 bytes).
pub type Blake2s = Blake2<Blake2sVariant>;
/// BLAKE2b parameter builder.
pub type Blake2bParams = Blake2Params<Blake2bVariant>;
/// BLAKE2s parameter builder.
pub type Blake2sParams = Blake2Params<Blake2sVariant>;

/// A BLAKE2 digest of 1 to 64 bytes.
///
/// Equality is constant-time in the digest contents.
#[derive(Clone, Copy)]
pub struct Blake2Hash {
  bytes: [u8; MAX_OUT_LEN],
  len: u8,
}

impl Blake2Hash {
  fn from_words<W: Word>(h: &[W; 8], len: usize) -> Self {
    let mut bytes = [0u8; MAX_OUT_LEN];
    store_words(h, &mut bytes[..len]);
    Self { bytes, len: len as u8 }
  }

  /// The digest bytes.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes[..usize::from(self.len)]
  }

  /// Lowercase hex encoding of the digest.
  #[cfg(feature = "alloc")]
  #[must_use]
  pub fn to_hex(&self) -> alloc::string::String {
    crate::util::to_hex(self.as_bytes())
  }

  /// Compare against an expected digest or MAC tag in constant time.
  ///
  /// # Errors
  ///
  /// Returns [`VerificationError`] if the lengths or contents differ.
  pub fn verify(&self, expected: &[u8]) -> Result<(), VerificationError> {
    if ct_eq(self.as_bytes(), expected) {
      Ok(())
    } else {
      Err(VerificationError::new())
    }
  }
}

impl PartialEq for Blake2Hash {
  fn eq(&self, other: &Self) -> bool {
    ct_eq(self.as_bytes(), other.as_bytes())
  }
}

impl Eq for Blake2Hash {}

impl PartialEq<[u8]> for Blake2Hash {
  fn eq(&self, other: &[u8]) -> bool {
    ct_eq(self.as_bytes(), other)
  }
}

impl AsRef<[u8]> for Blake2Hash {
  fn as_ref(&self) -> &[u8] {
    self.as_bytes()
  }
}

impl fmt::Debug for Blake2Hash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Blake2Hash(")?;
    fmt_hex(self.as_bytes(), f)?;
    f.write_str(")")
  }
}

impl fmt::Display for Blake2Hash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt_hex(self.as_bytes(), f)
  }
}

/// Incremental BLAKE2 state.
///
/// The last full block is held back until more input arrives, so that the
/// block compressed by [`finalize`](Self::finalize) is always the true final
/// one (it carries the f0 flag, and f1 for the last node of a tree level).
#[derive(Clone)]
pub struct Blake2<V: Blake2Variant> {
  h: [V::Word; 8],
  buf: [u8; MAX_BLOCK_LEN],
  buf_len: usize,
  /// Bytes compressed so far, key block included.
  counter: u128,
  keyed: bool,
  finalized: Option<Blake2Hash>,
  params: Blake2Params<V>,
}

impl<V: Blake2Variant> Blake2<V> {
  /// Unkeyed hasher with the maximum digest size.
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::from_params(Blake2Params::new())
  }

  /// Keyed (MAC) hasher with the maximum digest size.
  ///
  /// # Errors
  ///
  /// Returns [`ParamError::KeyLength`] if `key` is longer than `V::KEY_LEN`.
  pub fn new_keyed(key: &[u8]) -> Result<Self, ParamError> {
    Blake2Params::new().key(key).to_state()
  }

  /// Build the initial state from already validated parameters.
  pub(super) fn from_params(params: Blake2Params<V>) -> Self {
    let mut h = V::IV;
    for (word, param) in h.iter_mut().zip(params.words()) {
      *word ^= param;
    }
    let mut state = Self {
      h,
      buf: [0u8; MAX_BLOCK_LEN],
      buf_len: 0,
      counter: 0,
      keyed: false,
      finalized: None,
      params,
    };
    // The key, zero-padded to a full block, is the first block of input.
    if let Some(key) = state.params.key_block() {
      state.buf[..key.len()].copy_from_slice(key);
      state.buf_len = V::BLOCK_LEN;
      state.keyed = true;
    }
    state
  }

  /// Digest size in bytes, fixed at construction.
  #[inline]
  #[must_use]
  pub fn digest_size(&self) -> usize {
    self.params.digest_len()
  }

  /// Number of input bytes fed so far (the key block is not counted).
  #[must_use]
  pub fn count(&self) -> u128 {
    let key_block = if self.keyed { V::BLOCK_LEN as u128 } else { 0 };
    self.counter + self.buf_len as u128 - key_block
  }

  /// Set or clear the last-node flag before finalizing.
  ///
  /// The flag is stored with the parameters, so it survives
  /// [`reset`](Self::reset). Has no effect once the hasher is finalized.
  pub fn set_last_node(&mut self, last_node: bool) -> &mut Self {
    if self.finalized.is_none() {
      self.params.last_node(last_node);
    }
    self
  }

  /// Feed more input.
  ///
  /// # Errors
  ///
  /// Returns [`FinalizedError`] if [`finalize`](Self::finalize) has already
  /// been called; the state is left unchanged.
  pub fn update(&mut self, data: &[u8]) -> Result<(), FinalizedError> {
    if self.finalized.is_some() {
      debug_event!(variant = V::NAME, len = data.len(), "update after finalize");
      return Err(FinalizedError);
    }
    self.absorb(data);
    Ok(())
  }

  /// Buffering core of [`update`](Self::update); the caller has checked the
  /// finalized flag.
  pub(super) fn absorb(&mut self, mut data: &[u8]) {
    let block_len = V::BLOCK_LEN;
    while !data.is_empty() {
      // A full buffer is only compressed once more input proves it is not last.
      if self.buf_len == block_len {
        self.counter = self.counter.wrapping_add(block_len as u128);
        compress::<V>(&mut self.h, &self.buf[..block_len], self.counter, false, false);
        self.buf_len = 0;
      }

      if self.buf_len == 0 && data.len() > block_len {
        let (block, rest) = data.split_at(block_len);
        self.counter = self.counter.wrapping_add(block_len as u128);
        compress::<V>(&mut self.h, block, self.counter, false, false);
        data = rest;
        continue;
      }

      let take = (block_len - self.buf_len).min(data.len());
      self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
      self.buf_len += take;
      data = &data[take..];
    }
  }

  /// Compress the final (zero-padded) block and return the digest.
  ///
  /// The first call closes the hasher; later calls return the cached digest.
  pub fn finalize(&mut self) -> Blake2Hash {
    if let Some(hash) = self.finalized {
      return hash;
    }
    let block_len = V::BLOCK_LEN;
    self.counter = self.counter.wrapping_add(self.buf_len as u128);
    self.buf[self.buf_len..block_len].fill(0);
    compress::<V>(&mut self.h, &self.buf[..block_len], self.counter, true, self.params.is_last_node());
    self.buf = [0u8; MAX_BLOCK_LEN];
    self.buf_len = 0;

    let hash = Blake2Hash::from_words(&self.h, self.digest_size());
    self.finalized = Some(hash);
    trace_event!(
      variant = V::NAME,
      bytes = self.count() as u64,
      digest_size = self.digest_size(),
      last_node = self.params.is_last_node(),
      "finalized"
    );
    hash
  }

  /// Whether [`finalize`](Self::finalize) has been called since construction
  /// or the last [`reset`](Self::reset).
  #[inline]
  #[must_use]
  pub fn is_finalized(&self) -> bool {
    self.finalized.is_some()
  }

  /// Return to the constructed state, keeping key and parameters.
  pub fn reset(&mut self) {
    *self = Self::from_params(self.params.clone());
  }
}

impl<V: Blake2Variant> Default for Blake2<V> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

// Chaining value and buffered input stay out of debug output.
impl<V: Blake2Variant> fmt::Debug for Blake2<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Blake2")
      .field("variant", &V::NAME)
      .field("digest_size", &self.digest_size())
      .field("count", &self.count())
      .field("last_node", &self.params.is_last_node())
      .field("finalized", &self.is_finalized())
      .finish_non_exhaustive()
  }
}

impl<V: Blake2Variant> Digest for Blake2<V> {
  const OUTPUT_SIZE: usize = V::OUT_LEN;
  type Output = Blake2Hash;

  #[inline]
  fn new() -> Self {
    Self::from_params(Blake2Params::new())
  }

  #[inline]
  fn update(&mut self, data: &[u8]) -> Result<(), FinalizedError> {
    Blake2::update(self, data)
  }

  #[inline]
  fn finalize(&mut self) -> Self::Output {
    Blake2::finalize(self)
  }

  #[inline]
  fn is_finalized(&self) -> bool {
    Blake2::is_finalized(self)
  }

  #[inline]
  fn reset(&mut self) {
    Blake2::reset(self);
  }
}

/// BLAKE2b-512 of `data`.
#[inline]
#[must_use]
pub fn blake2b(data: &[u8]) -> Blake2Hash {
  Blake2b::digest(data)
}

/// BLAKE2s-256 of `data`.
#[inline]
#[must_use]
pub fn blake2s(data: &[u8]) -> Blake2Hash {
  Blake2s::digest(data)
}
