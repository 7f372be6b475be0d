//! Word-level helpers shared by the BLAKE2 and BLAKE3 compression functions.
#![allow(clippy::indexing_slicing)] // Fixed-size array indexing and block parsing

use core::{
  fmt::Debug,
  ops::{BitXor, BitXorAssign},
};

mod sealed {
  pub trait Sealed {}

  impl Sealed for u32 {}
  impl Sealed for u64 {}
}

/// Machine word a BLAKE compression function operates on.
///
/// Implemented for `u32` (BLAKE2s, BLAKE3) and `u64` (BLAKE2b) only. All
/// arithmetic is modulo `2^BITS`.
pub trait Word: Copy + Default + Eq + Debug + BitXor<Output = Self> + BitXorAssign + sealed::Sealed + 'static {
  /// Width in bytes.
  const BYTES: usize;
  /// The zero word.
  const ZERO: Self;
  /// All bits set (finalization flag value).
  const ALL_ONES: Self;

  /// Addition modulo `2^BITS`.
  fn wrapping_add(self, rhs: Self) -> Self;
  /// Rotate right by `n` bits.
  fn rotate_right(self, n: u32) -> Self;
  /// Decode a word from exactly [`BYTES`](Self::BYTES) little-endian bytes.
  fn from_le(bytes: &[u8]) -> Self;
  /// Encode the low `out.len()` bytes of the word, little-endian.
  fn store_le(self, out: &mut [u8]);
  /// Split a byte counter into its (low, high) words.
  fn split_counter(counter: u128) -> (Self, Self);
}

macro_rules! impl_word {
  ($ty:ty) => {
    impl Word for $ty {
      const BYTES: usize = core::mem::size_of::<$ty>();
      const ZERO: Self = 0;
      const ALL_ONES: Self = <$ty>::MAX;

      #[inline(always)]
      fn wrapping_add(self, rhs: Self) -> Self {
        <$ty>::wrapping_add(self, rhs)
      }

      #[inline(always)]
      fn rotate_right(self, n: u32) -> Self {
        <$ty>::rotate_right(self, n)
      }

      #[inline(always)]
      fn from_le(bytes: &[u8]) -> Self {
        let mut word = [0u8; core::mem::size_of::<$ty>()];
        word.copy_from_slice(bytes);
        <$ty>::from_le_bytes(word)
      }

      #[inline(always)]
      fn store_le(self, out: &mut [u8]) {
        let bytes = self.to_le_bytes();
        out.copy_from_slice(&bytes[..out.len()]);
      }

      #[inline(always)]
      fn split_counter(counter: u128) -> (Self, Self) {
        (counter as $ty, (counter >> <$ty>::BITS) as $ty)
      }
    }
  };
}

impl_word!(u32);
impl_word!(u64);

/// Read `N` little-endian words from the front of `bytes`.
#[inline(always)]
pub(crate) fn load_words<W: Word, const N: usize>(bytes: &[u8]) -> [W; N] {
  debug_assert!(bytes.len() >= N * W::BYTES);
  let mut words = [W::ZERO; N];
  for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(W::BYTES)) {
    *word = W::from_le(chunk);
  }
  words
}

/// Write `words` little-endian into `out`, stopping as soon as `out` is full.
///
/// A trailing partial word receives its low-order bytes.
#[inline(always)]
pub(crate) fn store_words<W: Word>(words: &[W], out: &mut [u8]) {
  for (word, chunk) in words.iter().zip(out.chunks_mut(W::BYTES)) {
    word.store_le(chunk);
  }
}

/// Constant-time equality; slices of different length compare unequal.
#[inline]
pub(crate) fn ct_eq(a: &[u8], b: &[u8]) -> bool {
  use subtle::ConstantTimeEq as _;
  a.ct_eq(b).into()
}

/// Write `bytes` as lowercase hex.
pub(crate) fn fmt_hex(bytes: &[u8], f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
  for b in bytes {
    write!(f, "{b:02x}")?;
  }
  Ok(())
}

#[cfg(feature = "alloc")]
#[inline]
pub(crate) fn to_hex(bytes: &[u8]) -> alloc::string::String {
  hex::encode(bytes)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn load_words_is_little_endian() {
    let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let w32: [u32; 2] = load_words(&bytes);
    assert_eq!(w32, [0x0403_0201, 0x0807_0605]);
    let w64: [u64; 1] = load_words(&bytes);
    assert_eq!(w64, [0x0807_0605_0403_0201]);
  }

  #[test]
  fn store_words_truncates_final_word() {
    let mut out = [0u8; 6];
    store_words(&[0x0403_0201u32, 0x0807_0605], &mut out);
    assert_eq!(out, [1, 2, 3, 4, 5, 6]);

    let mut out = [0u8; 3];
    store_words(&[0x0807_0605_0403_0201u64], &mut out);
    assert_eq!(out, [1, 2, 3]);
  }

  #[test]
  fn wrapping_add_masks_to_word_width() {
    assert_eq!(Word::wrapping_add(u32::MAX, 2u32), 1);
    assert_eq!(Word::wrapping_add(u64::MAX, 1u64), 0);
  }

  #[test]
  fn rotate_right_wraps_low_bits() {
    assert_eq!(Word::rotate_right(1u32, 1), 0x8000_0000);
    assert_eq!(Word::rotate_right(0x0000_0000_0000_00ffu64, 8), 0xff00_0000_0000_0000);
  }

  #[test]
  fn split_counter_uses_word_width() {
    let c = 0x0000_0001_0000_0002_0000_0003_0000_0004u128;
    assert_eq!(<u64 as Word>::split_counter(c), (0x0000_0003_0000_0004, 0x0000_0001_0000_0002));
    assert_eq!(<u32 as Word>::split_counter(c), (4, 3));
  }

  #[test]
  fn ct_eq_rejects_length_mismatch() {
    assert!(ct_eq(b"abc", b"abc"));
    assert!(!ct_eq(b"abc", b"abd"));
    assert!(!ct_eq(b"abc", b"ab"));
  }
}
