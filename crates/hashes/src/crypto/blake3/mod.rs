//! BLAKE3 (hash, keyed hash, key derivation and XOF).
//!
//! Portable, `no_std`, safe Rust. Input is split into 1024-byte chunks; each
//! chunk is compressed block by block, and completed chunk chaining values
//! are merged into a binary tree through a chaining-value stack whose shape
//! follows the binary representation of the chunk count.
//!
//! ```
//! use hashes::crypto::blake3::{self, Blake3};
//! use hashes::Xof;
//!
//! let mut hasher = Blake3::new();
//! hasher.update(b"foo")?;
//! hasher.update(b"bar")?;
//! let hash = hasher.finalize();
//! assert_eq!(hash, blake3::hash(b"foobar"));
//!
//! // Longer outputs extend the same stream.
//! let mut long = [0u8; 100];
//! hasher.finalize_xof().squeeze(&mut long);
//! assert_eq!(&long[..32], hash.as_bytes());
//! # Ok::<(), hashes::FinalizedError>(())
//! ```

#![allow(clippy::indexing_slicing)] // Fixed-size arrays + internal block parsing

mod compress;

use core::{cmp::min, fmt};

use traits::{Digest, FinalizedError, VerificationError, Xof};

use self::compress::{compress, first_8_words};
use crate::util::{ct_eq, fmt_hex, load_words, store_words};

/// Default output length in bytes.
pub const OUT_LEN: usize = 32;
/// Key length in bytes for [`Blake3::new_keyed`].
pub const KEY_LEN: usize = 32;
const BLOCK_LEN: usize = 64;
const CHUNK_LEN: usize = 1024;
/// Room for 2^54 chunks, i.e. inputs up to 2^64 bytes.
const MAX_DEPTH: usize = 54;

pub(crate) const CHUNK_START: u32 = 1 << 0;
pub(crate) const CHUNK_END: u32 = 1 << 1;
pub(crate) const PARENT: u32 = 1 << 2;
pub(crate) const ROOT: u32 = 1 << 3;
pub(crate) const KEYED_HASH: u32 = 1 << 4;
pub(crate) const DERIVE_KEY_CONTEXT: u32 = 1 << 5;
pub(crate) const DERIVE_KEY_MATERIAL: u32 = 1 << 6;

pub(crate) const IV: [u32; 8] = [
  0x6A09_E667,
  0xBB67_AE85,
  0x3C6E_F372,
  0xA54F_F53A,
  0x510E_527F,
  0x9B05_688C,
  0x1F83_D9AB,
  0x5BE0_CD19,
];

/// A compression whose role is not decided yet.
///
/// The same inputs yield either an 8-word chaining value (interior node) or,
/// with ROOT set and the counter reused as an output block index, the final
/// output stream.
#[derive(Clone, Copy)]
struct Output {
  input_chaining_value: [u32; 8],
  block_words: [u32; 16],
  counter: u64,
  block_len: u32,
  flags: u32,
}

impl Output {
  #[inline]
  fn chaining_value(&self) -> [u32; 8] {
    first_8_words(compress(
      &self.input_chaining_value,
      &self.block_words,
      self.counter,
      self.block_len,
      self.flags,
    ))
  }

  /// Root output bytes `64 * index .. 64 * (index + 1)`.
  #[inline]
  fn root_output_block(&self, index: u64) -> [u8; 2 * OUT_LEN] {
    let words = compress(
      &self.input_chaining_value,
      &self.block_words,
      index,
      self.block_len,
      self.flags | ROOT,
    );
    let mut out = [0u8; 2 * OUT_LEN];
    store_words(&words, &mut out);
    out
  }

  #[inline]
  fn root_hash(&self) -> Blake3Hash {
    let mut bytes = [0u8; OUT_LEN];
    bytes.copy_from_slice(&self.root_output_block(0)[..OUT_LEN]);
    Blake3Hash(bytes)
  }

  #[inline]
  fn root_hash_words(&self) -> [u32; 8] {
    first_8_words(compress(
      &self.input_chaining_value,
      &self.block_words,
      0,
      self.block_len,
      self.flags | ROOT,
    ))
  }
}

fn parent_output(left_child_cv: [u32; 8], right_child_cv: [u32; 8], key_words: [u32; 8], flags: u32) -> Output {
  let mut block_words = [0u32; 16];
  block_words[..8].copy_from_slice(&left_child_cv);
  block_words[8..].copy_from_slice(&right_child_cv);
  Output {
    input_chaining_value: key_words,
    block_words,
    counter: 0,
    block_len: BLOCK_LEN as u32,
    flags: PARENT | flags,
  }
}

/// Up to one chunk of input. The buffered block is compressed only once more
/// input arrives, so the chunk's last block can still take CHUNK_END.
#[derive(Clone, Copy)]
struct ChunkState {
  chaining_value: [u32; 8],
  chunk_counter: u64,
  block: [u8; BLOCK_LEN],
  block_len: u8,
  blocks_compressed: u8,
  flags: u32,
}

impl ChunkState {
  #[inline]
  fn new(key_words: [u32; 8], chunk_counter: u64, flags: u32) -> Self {
    Self {
      chaining_value: key_words,
      chunk_counter,
      block: [0u8; BLOCK_LEN],
      block_len: 0,
      blocks_compressed: 0,
      flags,
    }
  }

  #[inline]
  fn len(&self) -> usize {
    BLOCK_LEN * usize::from(self.blocks_compressed) + usize::from(self.block_len)
  }

  #[inline]
  fn start_flag(&self) -> u32 {
    if self.blocks_compressed == 0 { CHUNK_START } else { 0 }
  }

  /// Caller guarantees `self.len() + input.len() <= CHUNK_LEN`.
  fn update(&mut self, mut input: &[u8]) {
    debug_assert!(self.len() + input.len() <= CHUNK_LEN);
    while !input.is_empty() {
      if usize::from(self.block_len) == BLOCK_LEN {
        let block_words = load_words(&self.block);
        self.chaining_value = first_8_words(compress(
          &self.chaining_value,
          &block_words,
          self.chunk_counter,
          BLOCK_LEN as u32,
          self.flags | self.start_flag(),
        ));
        self.blocks_compressed += 1;
        self.block = [0u8; BLOCK_LEN];
        self.block_len = 0;
      }

      let start = usize::from(self.block_len);
      let take = min(BLOCK_LEN - start, input.len());
      self.block[start..start + take].copy_from_slice(&input[..take]);
      self.block_len += take as u8;
      input = &input[take..];
    }
  }

  /// The buffered block is zero past `block_len`, so it is already padded.
  #[inline]
  fn output(&self) -> Output {
    Output {
      input_chaining_value: self.chaining_value,
      block_words: load_words(&self.block),
      counter: self.chunk_counter,
      block_len: u32::from(self.block_len),
      flags: self.flags | self.start_flag() | CHUNK_END,
    }
  }
}

/// A 32-byte BLAKE3 hash.
///
/// Equality is constant-time.
#[derive(Clone, Copy)]
pub struct Blake3Hash([u8; OUT_LEN]);

impl Blake3Hash {
  /// Wrap raw hash bytes, e.g. an expected value to compare against.
  #[inline]
  #[must_use]
  pub const fn from_bytes(bytes: [u8; OUT_LEN]) -> Self {
    Self(bytes)
  }

  /// The hash bytes.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; OUT_LEN] {
    &self.0
  }

  /// Lowercase hex encoding of the hash.
  #[cfg(feature = "alloc")]
  #[must_use]
  pub fn to_hex(&self) -> alloc::string::String {
    crate::util::to_hex(&self.0)
  }

  /// Compare against an expected hash or MAC tag in constant time.
  ///
  /// # Errors
  ///
  /// Returns [`VerificationError`] if the lengths or contents differ.
  pub fn verify(&self, expected: &[u8]) -> Result<(), VerificationError> {
    if ct_eq(&self.0, expected) {
      Ok(())
    } else {
      Err(VerificationError::new())
    }
  }
}

impl From<Blake3Hash> for [u8; OUT_LEN] {
  #[inline]
  fn from(hash: Blake3Hash) -> Self {
    hash.0
  }
}

impl From<[u8; OUT_LEN]> for Blake3Hash {
  #[inline]
  fn from(bytes: [u8; OUT_LEN]) -> Self {
    Self(bytes)
  }
}

impl PartialEq for Blake3Hash {
  fn eq(&self, other: &Self) -> bool {
    ct_eq(&self.0, &other.0)
  }
}

impl Eq for Blake3Hash {}

impl PartialEq<[u8]> for Blake3Hash {
  fn eq(&self, other: &[u8]) -> bool {
    ct_eq(&self.0, other)
  }
}

impl AsRef<[u8]> for Blake3Hash {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl fmt::Debug for Blake3Hash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Blake3Hash(")?;
    fmt_hex(&self.0, f)?;
    f.write_str(")")
  }
}

impl fmt::Display for Blake3Hash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt_hex(&self.0, f)
  }
}

/// Incremental BLAKE3 hasher.
///
/// Each mode (plain, keyed, derive-key) is fixed at construction. After
/// [`finalize`](Self::finalize) or [`finalize_xof`](Self::finalize_xof) the
/// hasher rejects further input until [`reset`](Self::reset).
#[derive(Clone)]
pub struct Blake3 {
  chunk_state: ChunkState,
  key_words: [u32; 8],
  cv_stack: [[u32; 8]; MAX_DEPTH],
  cv_stack_len: u8,
  flags: u32,
  root: Option<Output>,
}

impl Blake3 {
  fn new_internal(key_words: [u32; 8], flags: u32) -> Self {
    Self {
      chunk_state: ChunkState::new(key_words, 0, flags),
      key_words,
      cv_stack: [[0u32; 8]; MAX_DEPTH],
      cv_stack_len: 0,
      flags,
      root: None,
    }
  }

  /// Plain hash mode.
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::new_internal(IV, 0)
  }

  /// Keyed hash (MAC) mode.
  #[must_use]
  pub fn new_keyed(key: &[u8; KEY_LEN]) -> Self {
    Self::new_internal(load_words(key), KEYED_HASH)
  }

  /// Key derivation mode.
  ///
  /// The context string is hashed first under DERIVE_KEY_CONTEXT; its hash
  /// keys a second hasher that absorbs the key material under
  /// DERIVE_KEY_MATERIAL. The context should be hardcoded, globally unique and
  /// application-specific.
  #[must_use]
  pub fn new_derive_key(context: &str) -> Self {
    let mut context_hasher = Self::new_internal(IV, DERIVE_KEY_CONTEXT);
    context_hasher.absorb(context.as_bytes());
    let context_key_words = context_hasher.root_output().root_hash_words();
    Self::new_internal(context_key_words, DERIVE_KEY_MATERIAL)
  }

  /// Number of input bytes fed so far.
  #[inline]
  #[must_use]
  pub fn count(&self) -> u64 {
    self.chunk_state.chunk_counter * CHUNK_LEN as u64 + self.chunk_state.len() as u64
  }

  /// Feed more input.
  ///
  /// # Errors
  ///
  /// Returns [`FinalizedError`] once the hasher has been finalized; the state
  /// is left unchanged.
  pub fn update(&mut self, data: &[u8]) -> Result<(), FinalizedError> {
    if self.root.is_some() {
      debug_event!(len = data.len(), "blake3 update after finalize");
      return Err(FinalizedError);
    }
    self.absorb(data);
    Ok(())
  }

  fn absorb(&mut self, mut input: &[u8]) {
    while !input.is_empty() {
      // A full chunk is merged only once more input proves it is not the root.
      if self.chunk_state.len() == CHUNK_LEN {
        let chunk_cv = self.chunk_state.output().chaining_value();
        let total_chunks = self.chunk_state.chunk_counter + 1;
        trace_event!(chunk = self.chunk_state.chunk_counter, "chunk complete");
        self.add_chunk_chaining_value(chunk_cv, total_chunks);
        self.chunk_state = ChunkState::new(self.key_words, total_chunks, self.flags);
      }

      let take = min(CHUNK_LEN - self.chunk_state.len(), input.len());
      self.chunk_state.update(&input[..take]);
      input = &input[take..];
    }
  }

  #[inline]
  fn push_cv(&mut self, cv: [u32; 8]) {
    self.cv_stack[usize::from(self.cv_stack_len)] = cv;
    self.cv_stack_len += 1;
  }

  #[inline]
  fn pop_cv(&mut self) -> [u32; 8] {
    self.cv_stack_len -= 1;
    self.cv_stack[usize::from(self.cv_stack_len)]
  }

  /// Push a finished chunk's chaining value, first merging one completed
  /// subtree per trailing zero bit of `total_chunks`.
  fn add_chunk_chaining_value(&mut self, mut new_cv: [u32; 8], mut total_chunks: u64) {
    while total_chunks & 1 == 0 {
      new_cv = parent_output(self.pop_cv(), new_cv, self.key_words, self.flags).chaining_value();
      total_chunks >>= 1;
    }
    self.push_cv(new_cv);
    trace_event!(depth = self.cv_stack_len, "chaining value pushed");
  }

  /// Fold the open right edge of the tree into the root node.
  fn root_output(&self) -> Output {
    let mut output = self.chunk_state.output();
    for &left in self.cv_stack[..usize::from(self.cv_stack_len)].iter().rev() {
      output = parent_output(left, output.chaining_value(), self.key_words, self.flags);
    }
    output
  }

  fn finalize_root(&mut self) -> Output {
    if let Some(root) = self.root {
      return root;
    }
    let root = self.root_output();
    trace_event!(bytes = self.count(), depth = self.cv_stack_len, "finalized");
    self.root = Some(root);
    root
  }

  /// Finalize and return the 32-byte hash.
  ///
  /// The first call closes the hasher; later calls return the same hash.
  pub fn finalize(&mut self) -> Blake3Hash {
    self.finalize_root().root_hash()
  }

  /// Finalize and return a reader over the unbounded output stream.
  ///
  /// The first [`OUT_LEN`] bytes of the stream equal [`finalize`](Self::finalize).
  pub fn finalize_xof(&mut self) -> Blake3Xof {
    Blake3Xof::new(self.finalize_root())
  }

  /// Finalize and fill `out` with the first `out.len()` bytes of output.
  pub fn finalize_into(&mut self, out: &mut [u8]) {
    self.finalize_xof().squeeze(out);
  }

  /// Finalize and return the first `len` bytes of output.
  #[cfg(feature = "alloc")]
  #[must_use]
  pub fn finalize_vec(&mut self, len: usize) -> alloc::vec::Vec<u8> {
    let mut out = alloc::vec![0u8; len];
    self.finalize_into(&mut out);
    out
  }

  /// Whether the hasher has been finalized since construction or the last
  /// [`reset`](Self::reset).
  #[inline]
  #[must_use]
  pub fn is_finalized(&self) -> bool {
    self.root.is_some()
  }

  /// Return to the constructed state, keeping mode and key.
  pub fn reset(&mut self) {
    *self = Self::new_internal(self.key_words, self.flags);
  }
}

impl Default for Blake3 {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

// Key words and buffered input stay out of debug output.
impl fmt::Debug for Blake3 {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mode = match self.flags {
      KEYED_HASH => "keyed",
      DERIVE_KEY_MATERIAL => "derive_key",
      _ => "hash",
    };
    f.debug_struct("Blake3")
      .field("mode", &mode)
      .field("count", &self.count())
      .field("cv_stack_len", &self.cv_stack_len)
      .field("finalized", &self.is_finalized())
      .finish_non_exhaustive()
  }
}

impl Digest for Blake3 {
  const OUTPUT_SIZE: usize = OUT_LEN;
  type Output = Blake3Hash;

  #[inline]
  fn new() -> Self {
    Self::new_internal(IV, 0)
  }

  #[inline]
  fn update(&mut self, data: &[u8]) -> Result<(), FinalizedError> {
    Blake3::update(self, data)
  }

  #[inline]
  fn finalize(&mut self) -> Self::Output {
    Blake3::finalize(self)
  }

  #[inline]
  fn is_finalized(&self) -> bool {
    Blake3::is_finalized(self)
  }

  #[inline]
  fn reset(&mut self) {
    Blake3::reset(self);
  }
}

/// Reader over the BLAKE3 extendable output.
///
/// Output block `i` is the root compression with counter `i`, so any position
/// can be reached directly with [`set_position`](Self::set_position). The
/// stream has 2^64 blocks; byte positions past `u64::MAX` wrap.
#[derive(Clone)]
pub struct Blake3Xof {
  output: Output,
  block: u64,
  offset: usize,
}

impl Blake3Xof {
  const BLOCK_LEN: usize = 2 * OUT_LEN;

  #[inline]
  fn new(output: Output) -> Self {
    Self {
      output,
      block: 0,
      offset: 0,
    }
  }

  /// Byte offset of the next squeezed byte, modulo 2^64.
  #[inline]
  #[must_use]
  pub fn position(&self) -> u64 {
    self
      .block
      .wrapping_mul(Self::BLOCK_LEN as u64)
      .wrapping_add(self.offset as u64)
  }

  /// Seek to byte offset `position` in the output stream.
  #[inline]
  pub fn set_position(&mut self, position: u64) {
    self.block = position / Self::BLOCK_LEN as u64;
    self.offset = (position % Self::BLOCK_LEN as u64) as usize;
  }
}

impl Xof for Blake3Xof {
  fn squeeze(&mut self, mut out: &mut [u8]) {
    while !out.is_empty() {
      let block = self.output.root_output_block(self.block);
      let take = min(Self::BLOCK_LEN - self.offset, out.len());
      out[..take].copy_from_slice(&block[self.offset..self.offset + take]);
      self.offset += take;
      if self.offset == Self::BLOCK_LEN {
        self.offset = 0;
        self.block = self.block.wrapping_add(1);
      }
      out = &mut out[take..];
    }
  }
}

impl fmt::Debug for Blake3Xof {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Blake3Xof")
      .field("position", &self.position())
      .finish_non_exhaustive()
  }
}

/// BLAKE3 hash of `data`.
#[must_use]
pub fn hash(data: &[u8]) -> Blake3Hash {
  let mut hasher = Blake3::new();
  hasher.absorb(data);
  hasher.finalize()
}

/// Keyed BLAKE3 hash (MAC) of `data`.
#[must_use]
pub fn keyed_hash(key: &[u8; KEY_LEN], data: &[u8]) -> Blake3Hash {
  let mut hasher = Blake3::new_keyed(key);
  hasher.absorb(data);
  hasher.finalize()
}

/// Derive a 32-byte key from `key_material` under `context`.
#[must_use]
pub fn derive_key(context: &str, key_material: &[u8]) -> [u8; OUT_LEN] {
  let mut hasher = Blake3::new_derive_key(context);
  hasher.absorb(key_material);
  hasher.finalize().into()
}
