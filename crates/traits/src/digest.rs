//! Cryptographic digest traits.
//!
//! Streaming updates, idempotent finalize, and reset support. Once a hasher
//! has been finalized it refuses further input until it is reset.

use core::fmt::Debug;

use crate::FinalizedError;

/// Cryptographic hash function producing a digest of a default size.
///
/// # Implementor Requirements
///
/// - `new()` must return the same state as `Default::default()` where both exist
/// - `finalize()` must be idempotent (calling multiple times returns same value)
/// - `update()` after `finalize()` must fail with [`FinalizedError`] and leave
///   the state untouched
/// - `reset()` must restore the hasher to its constructed state, clearing the
///   finalized flag
/// - `new()` should return an open hasher; the one-shot helpers reset a
///   hasher that comes back finalized before feeding it
pub trait Digest: Clone {
  /// Default output size in bytes.
  const OUTPUT_SIZE: usize;

  /// The digest output type.
  type Output: Copy + Eq + Debug + AsRef<[u8]>;

  /// Create a new hasher with default parameters.
  #[must_use]
  fn new() -> Self;

  /// Update the hasher with additional data.
  ///
  /// # Errors
  ///
  /// Returns [`FinalizedError`] if the hasher has already been finalized.
  fn update(&mut self, data: &[u8]) -> Result<(), FinalizedError>;

  /// Update the hasher with multiple non-contiguous buffers.
  ///
  /// # Errors
  ///
  /// Returns [`FinalizedError`] if the hasher has already been finalized.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) -> Result<(), FinalizedError> {
    for buf in bufs {
      self.update(buf)?;
    }
    Ok(())
  }

  /// Finalize and return the digest.
  ///
  /// The first call closes the hasher to further input; later calls return the
  /// same output.
  #[must_use]
  fn finalize(&mut self) -> Self::Output;

  /// Whether [`finalize`](Self::finalize) has been called since construction
  /// or the last reset.
  #[must_use]
  fn is_finalized(&self) -> bool;

  /// Reset the hasher to its constructed state.
  fn reset(&mut self);

  /// Compute the digest of data in one shot.
  #[inline]
  #[must_use]
  fn digest(data: &[u8]) -> Self::Output {
    Self::digest_vectored(&[data])
  }

  /// Compute the digest of multiple buffers in one shot.
  #[inline]
  #[must_use]
  fn digest_vectored(bufs: &[&[u8]]) -> Self::Output {
    let mut h = Self::new();
    if h.update_vectored(bufs).is_err() {
      // `new()` handed back a closed hasher; reopen it and feed the input again.
      h.reset();
      let _ = h.update_vectored(bufs);
    }
    h.finalize()
  }

  /// Wrap a writer to compute the digest of everything written through it.
  ///
  /// # Example
  ///
  /// ```rust
  /// # use traits::{Digest, FinalizedError};
  /// # #[derive(Clone, Default)]
  /// # struct SumDigest(u8, bool);
  /// # impl Digest for SumDigest {
  /// #   const OUTPUT_SIZE: usize = 4;
  /// #   type Output = [u8; 4];
  /// #   fn new() -> Self { Self(0, false) }
  /// #   fn update(&mut self, data: &[u8]) -> Result<(), FinalizedError> {
  /// #     if self.1 { return Err(FinalizedError); }
  /// #     self.0 = data.iter().fold(self.0, |acc, &b| acc.wrapping_add(b));
  /// #     Ok(())
  /// #   }
  /// #   fn finalize(&mut self) -> Self::Output { self.1 = true; [self.0; 4] }
  /// #   fn is_finalized(&self) -> bool { self.1 }
  /// #   fn reset(&mut self) { *self = Self::new(); }
  /// # }
  /// use std::io::Write;
  ///
  /// let mut writer = SumDigest::writer(Vec::new());
  /// writer.write_all(b"hello world")?;
  /// let (out, digest) = writer.into_parts();
  /// assert_eq!(out, b"hello world".to_vec());
  /// assert_eq!(
  ///   digest,
  ///   [b"hello world"
  ///     .iter()
  ///     .fold(0u8, |acc, &b| acc.wrapping_add(b)); 4]
  /// );
  /// # Ok::<(), std::io::Error>(())
  /// ```
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn writer<W>(inner: W) -> crate::io::DigestWriter<W, Self>
  where
    Self: Sized,
  {
    crate::io::DigestWriter::new(inner)
  }

  /// Wrap a reader to compute the digest of everything read through it.
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn reader<R>(inner: R) -> crate::io::DigestReader<R, Self>
  where
    Self: Sized,
  {
    crate::io::DigestReader::new(inner)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Byte-sum digest whose constructor hands back an already finalized state.
  #[derive(Clone)]
  struct ClosedOnNew {
    sum: u8,
    finalized: bool,
  }

  impl Digest for ClosedOnNew {
    const OUTPUT_SIZE: usize = 1;
    type Output = [u8; 1];

    fn new() -> Self {
      Self { sum: 0, finalized: true }
    }

    fn update(&mut self, data: &[u8]) -> Result<(), FinalizedError> {
      if self.finalized {
        return Err(FinalizedError);
      }
      self.sum = data.iter().fold(self.sum, |acc, &b| acc.wrapping_add(b));
      Ok(())
    }

    fn finalize(&mut self) -> Self::Output {
      self.finalized = true;
      [self.sum]
    }

    fn is_finalized(&self) -> bool {
      self.finalized
    }

    fn reset(&mut self) {
      self.sum = 0;
      self.finalized = false;
    }
  }

  #[test]
  fn one_shot_reopens_a_hasher_constructed_finalized() {
    assert_eq!(ClosedOnNew::digest(&[1, 2, 3]), [6]);
    assert_eq!(ClosedOnNew::digest_vectored(&[&[250], &[], &[10]]), [4]);
  }
}
