//! BLAKE2 parameter block builder.

#![allow(clippy::indexing_slicing)] // Parameter block offsets are fixed per variant

use core::{fmt, marker::PhantomData};

use traits::ParamError;

use super::{
  Blake2, Blake2Hash,
  variant::{Blake2Variant, MAX_KEY_LEN, MAX_SALT_LEN},
};
use crate::util::{Word, load_words};

/// Copy up to `N` bytes of `src` into a zeroed array.
///
/// Bytes beyond `N` are dropped here; the caller keeps the true length so
/// validation can reject it.
fn padded<const N: usize>(src: &[u8]) -> [u8; N] {
  let mut out = [0u8; N];
  let n = src.len().min(N);
  out[..n].copy_from_slice(&src[..n]);
  out
}

/// Construction parameters for a [`Blake2`] hasher.
///
/// Setters record values without checking them; every bound is checked once
/// by [`to_state`](Self::to_state) or [`hash`](Self::hash), which reject the
/// whole configuration with a [`ParamError`] rather than truncating.
///
/// ```
/// use hashes::crypto::blake2::Blake2bParams;
///
/// let tag = Blake2bParams::new()
///   .digest_size(32)
///   .key(b"secret")
///   .personal(b"my-app")
///   .hash(b"message")?;
/// assert_eq!(tag.as_bytes().len(), 32);
/// # Ok::<(), hashes::ParamError>(())
/// ```
#[derive(Clone)]
pub struct Blake2Params<V: Blake2Variant> {
  digest_size: usize,
  key: [u8; MAX_KEY_LEN],
  key_len: usize,
  salt: [u8; MAX_SALT_LEN],
  salt_len: usize,
  personal: [u8; MAX_SALT_LEN],
  personal_len: usize,
  fanout: u8,
  depth: u8,
  leaf_size: u32,
  node_offset: u64,
  node_depth: u8,
  inner_size: usize,
  last_node: bool,
  _variant: PhantomData<V>,
}

impl<V: Blake2Variant> Blake2Params<V> {
  /// Sequential-mode defaults: maximum digest size, no key, fanout 1, depth 1.
  #[must_use]
  pub fn new() -> Self {
    Self {
      digest_size: V::OUT_LEN,
      key: [0u8; MAX_KEY_LEN],
      key_len: 0,
      salt: [0u8; MAX_SALT_LEN],
      salt_len: 0,
      personal: [0u8; MAX_SALT_LEN],
      personal_len: 0,
      fanout: 1,
      depth: 1,
      leaf_size: 0,
      node_offset: 0,
      node_depth: 0,
      inner_size: 0,
      last_node: false,
      _variant: PhantomData,
    }
  }

  /// Digest size in bytes, `1..=V::OUT_LEN`.
  pub fn digest_size(&mut self, len: usize) -> &mut Self {
    self.digest_size = len;
    self
  }

  /// MAC key, at most `V::KEY_LEN` bytes. An empty key means unkeyed.
  pub fn key(&mut self, key: &[u8]) -> &mut Self {
    self.key = padded(key);
    self.key_len = key.len();
    self
  }

  /// Salt, at most `V::SALT_LEN` bytes, zero-padded.
  pub fn salt(&mut self, salt: &[u8]) -> &mut Self {
    self.salt = padded(salt);
    self.salt_len = salt.len();
    self
  }

  /// Personalization string, at most `V::PERSONAL_LEN` bytes, zero-padded.
  pub fn personal(&mut self, personal: &[u8]) -> &mut Self {
    self.personal = padded(personal);
    self.personal_len = personal.len();
    self
  }

  /// Tree fanout; 0 means unlimited.
  pub fn fanout(&mut self, fanout: u8) -> &mut Self {
    self.fanout = fanout;
    self
  }

  /// Maximum tree depth, `1..=255`.
  pub fn depth(&mut self, depth: u8) -> &mut Self {
    self.depth = depth;
    self
  }

  /// Maximum leaf length in bytes; 0 means unlimited.
  pub fn leaf_size(&mut self, len: u32) -> &mut Self {
    self.leaf_size = len;
    self
  }

  /// Position of this node within its tree level.
  pub fn node_offset(&mut self, offset: u64) -> &mut Self {
    self.node_offset = offset;
    self
  }

  /// Tree level of this node; leaves are 0.
  pub fn node_depth(&mut self, depth: u8) -> &mut Self {
    self.node_depth = depth;
    self
  }

  /// Digest size of the inner (non-root) nodes, `0..=V::OUT_LEN`.
  pub fn inner_size(&mut self, len: usize) -> &mut Self {
    self.inner_size = len;
    self
  }

  /// Mark this node as the last one of its level (sets f1 on the final block).
  pub fn last_node(&mut self, last_node: bool) -> &mut Self {
    self.last_node = last_node;
    self
  }

  /// Check every field against the variant's bounds.
  fn validate(&self) -> Result<(), ParamError> {
    if self.digest_size == 0 || self.digest_size > V::OUT_LEN {
      return Err(ParamError::DigestSize {
        len: self.digest_size,
        max: V::OUT_LEN,
      });
    }
    if self.key_len > V::KEY_LEN {
      return Err(ParamError::KeyLength {
        len: self.key_len,
        max: V::KEY_LEN,
      });
    }
    if self.salt_len > V::SALT_LEN {
      return Err(ParamError::SaltLength {
        len: self.salt_len,
        max: V::SALT_LEN,
      });
    }
    if self.personal_len > V::PERSONAL_LEN {
      return Err(ParamError::PersonalLength {
        len: self.personal_len,
        max: V::PERSONAL_LEN,
      });
    }
    if self.depth == 0 {
      return Err(ParamError::Depth(self.depth));
    }
    if self.node_offset > V::MAX_NODE_OFFSET {
      return Err(ParamError::NodeOffset {
        offset: self.node_offset,
        max: V::MAX_NODE_OFFSET,
      });
    }
    if self.inner_size > V::OUT_LEN {
      return Err(ParamError::InnerSize {
        len: self.inner_size,
        max: V::OUT_LEN,
      });
    }
    Ok(())
  }

  /// Validate the parameters and build a hasher.
  ///
  /// # Errors
  ///
  /// Returns [`ParamError`] naming the first out-of-range field.
  pub fn to_state(&self) -> Result<Blake2<V>, ParamError> {
    if let Err(err) = self.validate() {
      debug_event!(variant = V::NAME, %err, "rejected parameters");
      return Err(err);
    }
    trace_event!(
      variant = V::NAME,
      digest_size = self.digest_size,
      keyed = self.key_len > 0,
      fanout = self.fanout,
      depth = self.depth,
      node_offset = self.node_offset,
      node_depth = self.node_depth,
      last_node = self.last_node,
      "node initialized"
    );
    Ok(Blake2::from_params(self.clone()))
  }

  /// Hash `data` in one shot under these parameters.
  ///
  /// # Errors
  ///
  /// Returns [`ParamError`] naming the first out-of-range field.
  pub fn hash(&self, data: &[u8]) -> Result<Blake2Hash, ParamError> {
    let mut state = self.to_state()?;
    state.absorb(data);
    Ok(state.finalize())
  }

  /// Pack the parameter block into the eight words XORed into the IV.
  ///
  /// Only meaningful after [`validate`](Self::validate) has passed.
  pub(super) fn words(&self) -> [V::Word; 8] {
    let param_len = 8 * <V::Word as Word>::BYTES;
    let mut block = [0u8; 64];
    block[0] = self.digest_size as u8;
    block[1] = self.key_len as u8;
    block[2] = self.fanout;
    block[3] = self.depth;
    block[4..8].copy_from_slice(&self.leaf_size.to_le_bytes());
    let off = 8 + V::NODE_OFFSET_LEN;
    block[8..off].copy_from_slice(&self.node_offset.to_le_bytes()[..V::NODE_OFFSET_LEN]);
    block[off] = self.node_depth;
    block[off + 1] = self.inner_size as u8;
    // Salt and personalization close the block; the gap before them is reserved.
    let salt_at = param_len - V::SALT_LEN - V::PERSONAL_LEN;
    let personal_at = param_len - V::PERSONAL_LEN;
    block[salt_at..personal_at].copy_from_slice(&self.salt[..V::SALT_LEN]);
    block[personal_at..param_len].copy_from_slice(&self.personal[..V::PERSONAL_LEN]);
    load_words(&block[..param_len])
  }

  #[inline]
  pub(super) fn key_block(&self) -> Option<&[u8]> {
    (self.key_len > 0).then(|| &self.key[..self.key_len])
  }

  #[inline]
  pub(super) fn digest_len(&self) -> usize {
    self.digest_size
  }

  #[inline]
  pub(super) fn is_last_node(&self) -> bool {
    self.last_node
  }
}

impl<V: Blake2Variant> Default for Blake2Params<V> {
  fn default() -> Self {
    Self::new()
  }
}

// Keeps the key out of debug output.
impl<V: Blake2Variant> fmt::Debug for Blake2Params<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Blake2Params")
      .field("variant", &V::NAME)
      .field("digest_size", &self.digest_size)
      .field("key_len", &self.key_len)
      .field("salt", &&self.salt[..self.salt_len.min(MAX_SALT_LEN)])
      .field("personal", &&self.personal[..self.personal_len.min(MAX_SALT_LEN)])
      .field("fanout", &self.fanout)
      .field("depth", &self.depth)
      .field("leaf_size", &self.leaf_size)
      .field("node_offset", &self.node_offset)
      .field("node_depth", &self.node_depth)
      .field("inner_size", &self.inner_size)
      .field("last_node", &self.last_node)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::format;

  use super::*;
  use crate::crypto::blake2::{Blake2bParams, Blake2bVariant, Blake2sParams, Blake2sVariant};

  #[test]
  fn default_words_match_sequential_mode() {
    let words = Blake2bParams::new().words();
    assert_eq!(words, [0x0101_0040, 0, 0, 0, 0, 0, 0, 0]);
    let words = Blake2sParams::new().words();
    assert_eq!(words, [0x0101_0020, 0, 0, 0, 0, 0, 0, 0]);
  }

  #[test]
  fn blake2b_field_layout() {
    let words = Blake2bParams::new()
      .digest_size(32)
      .key(b"k")
      .fanout(2)
      .depth(3)
      .leaf_size(0x0403_0201)
      .node_offset(0x0807_0605_0403_0201)
      .node_depth(5)
      .inner_size(64)
      .salt(b"S")
      .personal(b"P")
      .words();
    assert_eq!(words[0], 0x0403_0201_0302_0120);
    assert_eq!(words[1], 0x0807_0605_0403_0201);
    assert_eq!(words[2], 0x4005);
    assert_eq!(words[3], 0);
    assert_eq!(words[4], u64::from(b'S'));
    assert_eq!(words[6], u64::from(b'P'));
  }

  #[test]
  fn blake2s_packs_48_bit_node_offset() {
    let words = Blake2sParams::new()
      .node_offset(0x0000_ba98_7654_3210)
      .node_depth(7)
      .inner_size(32)
      .salt(b"S")
      .personal(b"P")
      .words();
    assert_eq!(words[2], 0x7654_3210);
    assert_eq!(words[3], 0x2007_ba98);
    assert_eq!(words[4], u32::from(b'S'));
    assert_eq!(words[6], u32::from(b'P'));
  }

  #[test]
  fn rejects_out_of_range_fields() {
    let err = |p: &Blake2bParams| p.to_state().err();
    assert_eq!(
      err(Blake2bParams::new().digest_size(0)),
      Some(ParamError::DigestSize { len: 0, max: 64 })
    );
    assert_eq!(
      err(Blake2bParams::new().digest_size(65)),
      Some(ParamError::DigestSize { len: 65, max: 64 })
    );
    assert_eq!(
      err(Blake2bParams::new().key(&[0u8; 65])),
      Some(ParamError::KeyLength { len: 65, max: 64 })
    );
    assert_eq!(
      err(Blake2bParams::new().salt(&[0u8; 17])),
      Some(ParamError::SaltLength { len: 17, max: 16 })
    );
    assert_eq!(
      err(Blake2bParams::new().personal(&[0u8; 17])),
      Some(ParamError::PersonalLength { len: 17, max: 16 })
    );
    assert_eq!(err(Blake2bParams::new().depth(0)), Some(ParamError::Depth(0)));
    assert_eq!(
      err(Blake2bParams::new().inner_size(65)),
      Some(ParamError::InnerSize { len: 65, max: 64 })
    );
  }

  #[test]
  fn blake2s_bounds_are_narrower() {
    let err = |p: &Blake2sParams| p.to_state().err();
    assert_eq!(
      err(Blake2sParams::new().digest_size(33)),
      Some(ParamError::DigestSize { len: 33, max: 32 })
    );
    assert_eq!(
      err(Blake2sParams::new().key(&[0u8; 33])),
      Some(ParamError::KeyLength { len: 33, max: 32 })
    );
    assert_eq!(
      err(Blake2sParams::new().salt(&[0u8; 9])),
      Some(ParamError::SaltLength { len: 9, max: 8 })
    );
    assert_eq!(
      err(Blake2sParams::new().node_offset(1 << 48)),
      Some(ParamError::NodeOffset {
        offset: 1 << 48,
        max: (1 << 48) - 1
      })
    );
    assert!(Blake2sParams::new().node_offset((1 << 48) - 1).to_state().is_ok());
  }

  #[test]
  fn bounds_are_inclusive() {
    assert!(
      Blake2bParams::new()
        .digest_size(1)
        .key(&[7u8; 64])
        .salt(&[1u8; 16])
        .personal(&[2u8; 16])
        .depth(255)
        .node_offset(u64::MAX)
        .inner_size(64)
        .to_state()
        .is_ok()
    );
  }

  #[test]
  fn debug_hides_key() {
    let rendered = format!("{:?}", Blake2bParams::new().key(b"hunter2hunter2"));
    assert!(rendered.contains("key_len: 14"));
    assert!(!rendered.contains("104, 117"));
    assert!(rendered.contains("BLAKE2b"));
  }

  #[test]
  fn variants_default_to_max_digest() {
    assert_eq!(Blake2Params::<Blake2bVariant>::default().digest_len(), 64);
    assert_eq!(Blake2Params::<Blake2sVariant>::default().digest_len(), 32);
  }
}
