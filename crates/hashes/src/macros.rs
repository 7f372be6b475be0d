//! Internal logging macros.
//!
//! These forward to `tracing` when the `tracing` feature is enabled and expand
//! to nothing otherwise, so the engines carry no logging cost by default.
//! Message arguments are never evaluated when the feature is off.
//!
//! Never pass input bytes, key material or chaining values to these macros.

/// Emit a `tracing::debug!` event under the `hashes` target.
macro_rules! debug_event {
  ($($arg:tt)+) => {
    #[cfg(feature = "tracing")]
    {
      ::tracing::debug!(target: "hashes", $($arg)+);
    }
  };
}

/// Emit a `tracing::trace!` event under the `hashes` target.
macro_rules! trace_event {
  ($($arg:tt)+) => {
    #[cfg(feature = "tracing")]
    {
      ::tracing::trace!(target: "hashes", $($arg)+);
    }
  };
}
