//! I/O adapters for [`Digest`](crate::Digest) types.
//!
//! [`DigestReader`] and [`DigestWriter`] wrap [`std::io::Read`] and
//! [`std::io::Write`] implementations and hash the bytes that actually pass
//! through them (short reads and writes are handled).
//!
//! A hasher that has already been finalized turns every transfer into an
//! [`std::io::Error`] wrapping [`FinalizedError`](crate::FinalizedError).

use std::io;

use crate::Digest;

#[inline]
fn finalized_to_io(err: crate::FinalizedError) -> io::Error {
  io::Error::other(err)
}

/// Wraps a [`Read`](std::io::Read) and computes a digest transparently.
#[derive(Clone)]
pub struct DigestReader<R, D: Digest> {
  inner: R,
  hasher: D,
}

impl<R, D: Digest> DigestReader<R, D> {
  /// Create a new reader wrapper with a default hasher.
  #[inline]
  #[must_use]
  pub fn new(inner: R) -> Self {
    Self::with_hasher(inner, D::new())
  }

  /// Create a new reader wrapper around an already configured hasher.
  #[inline]
  #[must_use]
  pub fn with_hasher(inner: R, hasher: D) -> Self {
    Self { inner, hasher }
  }

  /// Finalize the hasher and return the digest.
  ///
  /// Further reads fail once this has been called.
  #[inline]
  #[must_use]
  pub fn digest(&mut self) -> D::Output {
    self.hasher.finalize()
  }

  /// Unwrap this `DigestReader`, returning the inner reader and the final digest.
  #[inline]
  pub fn into_parts(mut self) -> (R, D::Output) {
    let digest = self.hasher.finalize();
    (self.inner, digest)
  }

  /// Get a reference to the inner reader.
  #[inline]
  pub fn inner(&self) -> &R {
    &self.inner
  }
}

impl<R: io::Read, D: Digest> io::Read for DigestReader<R, D> {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    if self.hasher.is_finalized() {
      return Err(finalized_to_io(crate::FinalizedError));
    }
    let n = self.inner.read(buf)?;
    if let Some(data) = buf.get(..n) {
      self.hasher.update(data).map_err(finalized_to_io)?;
    }
    Ok(n)
  }
}

/// Wraps a [`Write`](std::io::Write) and computes a digest transparently.
///
/// # Hash-Then-Write Order
///
/// Bytes are hashed only after the inner writer accepted them, so the digest
/// always covers exactly the bytes reported as written.
#[derive(Clone)]
pub struct DigestWriter<W, D: Digest> {
  inner: W,
  hasher: D,
}

impl<W, D: Digest> DigestWriter<W, D> {
  /// Create a new writer wrapper with a default hasher.
  #[inline]
  #[must_use]
  pub fn new(inner: W) -> Self {
    Self::with_hasher(inner, D::new())
  }

  /// Create a new writer wrapper around an already configured hasher.
  #[inline]
  #[must_use]
  pub fn with_hasher(inner: W, hasher: D) -> Self {
    Self { inner, hasher }
  }

  /// Finalize the hasher and return the digest.
  #[inline]
  #[must_use]
  pub fn digest(&mut self) -> D::Output {
    self.hasher.finalize()
  }

  /// Unwrap this `DigestWriter`, returning the inner writer and the final digest.
  #[inline]
  pub fn into_parts(mut self) -> (W, D::Output) {
    let digest = self.hasher.finalize();
    (self.inner, digest)
  }

  /// Get a reference to the inner writer.
  #[inline]
  pub fn inner(&self) -> &W {
    &self.inner
  }
}

impl<W: io::Write, D: Digest> io::Write for DigestWriter<W, D> {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    if self.hasher.is_finalized() {
      return Err(finalized_to_io(crate::FinalizedError));
    }
    let n = self.inner.write(buf)?;
    if let Some(data) = buf.get(..n) {
      self.hasher.update(data).map_err(finalized_to_io)?;
    }
    Ok(n)
  }

  #[inline]
  fn flush(&mut self) -> io::Result<()> {
    self.inner.flush()
  }
}
