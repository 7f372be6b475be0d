//! Error types for hashing operations.
//!
//! Construction errors carry the offending value and its bound so callers can
//! report them; verification errors stay opaque.

use thiserror::Error;

/// A hasher construction parameter was out of range.
///
/// Parameters are validated once, when the hasher is built. Nothing is
/// clamped or truncated: any out-of-range value rejects the whole
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum ParamError {
  /// Digest size outside `1..=max`.
  #[error("digest size {len} out of range 1..={max}")]
  DigestSize {
    /// Requested digest size in bytes.
    len: usize,
    /// Largest digest the variant produces.
    max: usize,
  },

  /// Key longer than the variant allows.
  #[error("key length {len} exceeds {max}")]
  KeyLength {
    /// Supplied key length in bytes.
    len: usize,
    /// Maximum key length in bytes.
    max: usize,
  },

  /// Salt longer than the variant allows.
  #[error("salt length {len} exceeds {max}")]
  SaltLength {
    /// Supplied salt length in bytes.
    len: usize,
    /// Maximum salt length in bytes.
    max: usize,
  },

  /// Personalization string longer than the variant allows.
  #[error("personalization length {len} exceeds {max}")]
  PersonalLength {
    /// Supplied personalization length in bytes.
    len: usize,
    /// Maximum personalization length in bytes.
    max: usize,
  },

  /// Tree depth of zero.
  #[error("tree depth must be in 1..=255, got {0}")]
  Depth(u8),

  /// Node offset wider than the variant's parameter field.
  #[error("node offset {offset} exceeds {max}")]
  NodeOffset {
    /// Supplied node offset.
    offset: u64,
    /// Largest encodable node offset.
    max: u64,
  },

  /// Inner hash size larger than the variant's digest.
  #[error("inner hash size {len} exceeds {max}")]
  InnerSize {
    /// Supplied inner hash size in bytes.
    len: usize,
    /// Maximum inner hash size in bytes.
    max: usize,
  },
}

/// Input was fed to a hasher after it was finalized.
///
/// A finalized hasher keeps returning its cached digest; it accepts input again
/// only after `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Error)]
#[error("hasher already finalized")]
pub struct FinalizedError;

/// Verification failed.
///
/// Returned when a computed digest or MAC tag does not match the expected
/// value. Intentionally opaque to prevent timing side-channels.
///
/// # Examples
///
/// ```
/// use traits::VerificationError;
///
/// fn verify(computed: &[u8; 32], expected: &[u8; 32]) -> Result<(), VerificationError> {
///   // Real code: use constant-time comparison
///   if computed == expected {
///     Ok(())
///   } else {
///     Err(VerificationError::new())
///   }
/// }
///
/// let a = [0u8; 32];
/// let b = [1u8; 32];
/// assert!(verify(&a, &b).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("verification failed")]
#[non_exhaustive]
pub struct VerificationError;

impl VerificationError {
  /// Create a new verification error.
  ///
  /// This is the only way to construct this error from outside the crate,
  /// ensuring forward compatibility if fields are added in the future.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for VerificationError {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}
