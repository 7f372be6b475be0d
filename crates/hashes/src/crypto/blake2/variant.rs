//! The two BLAKE2 instantiations.
//!
//! Everything that differs between BLAKE2b and BLAKE2s lives here as
//! associated constants; the compression function, parameter block packing
//! and the incremental state are written once over [`Blake2Variant`].

use core::fmt::Debug;

use crate::util::Word;

mod sealed {
  pub trait Sealed {}

  impl Sealed for super::Blake2bVariant {}
  impl Sealed for super::Blake2sVariant {}
}

/// Largest block of either variant.
pub(crate) const MAX_BLOCK_LEN: usize = 128;
/// Largest digest of either variant.
pub(crate) const MAX_OUT_LEN: usize = 64;
/// Largest key of either variant.
pub(crate) const MAX_KEY_LEN: usize = 64;
/// Largest salt or personalization of either variant.
pub(crate) const MAX_SALT_LEN: usize = 16;

/// A concrete BLAKE2 configuration.
///
/// Sealed: only [`Blake2bVariant`] and [`Blake2sVariant`] exist.
pub trait Blake2Variant: Copy + Debug + Default + Eq + sealed::Sealed + 'static {
  /// State and message word.
  type Word: Word;

  /// Human-readable algorithm name.
  const NAME: &'static str;
  /// Compression block size in bytes.
  const BLOCK_LEN: usize;
  /// Maximum (and default) digest size in bytes.
  const OUT_LEN: usize;
  /// Maximum key size in bytes.
  const KEY_LEN: usize;
  /// Salt field size in bytes.
  const SALT_LEN: usize;
  /// Personalization field size in bytes.
  const PERSONAL_LEN: usize;
  /// Number of rounds.
  const ROUNDS: usize;
  /// G rotation distances, in application order.
  const ROTATIONS: [u32; 4];
  /// Initialization vector.
  const IV: [Self::Word; 8];
  /// Width in bytes of the node offset field in the parameter block.
  const NODE_OFFSET_LEN: usize;
  /// Largest node offset the parameter block can hold.
  const MAX_NODE_OFFSET: u64;
}

/// BLAKE2b: 64-bit words, 128-byte blocks, 12 rounds, digests up to 64 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Blake2bVariant;

impl Blake2Variant for Blake2bVariant {
  type Word = u64;

  const NAME: &'static str = "BLAKE2b";
  const BLOCK_LEN: usize = 128;
  const OUT_LEN: usize = 64;
  const KEY_LEN: usize = 64;
  const SALT_LEN: usize = 16;
  const PERSONAL_LEN: usize = 16;
  const ROUNDS: usize = 12;
  const ROTATIONS: [u32; 4] = [32, 24, 16, 63];
  const IV: [u64; 8] = [
    0x6a09_e667_f3bc_c908,
    0xbb67_ae85_84ca_a73b,
    0x3c6e_f372_fe94_f82b,
    0xa54f_f53a_5f1d_36f1,
    0x510e_527f_ade6_82d1,
    0x9b05_688c_2b3e_6c1f,
    0x1f83_d9ab_fb41_bd6b,
    0x5be0_cd19_137e_2179,
  ];
  const NODE_OFFSET_LEN: usize = 8;
  const MAX_NODE_OFFSET: u64 = u64::MAX;
}

/// BLAKE2s: 32-bit words, 64-byte blocks, 10 rounds, digests up to 32 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Blake2sVariant;

impl Blake2Variant for Blake2sVariant {
  type Word = u32;

  const NAME: &'static str = "BLAKE2s";
  const BLOCK_LEN: usize = 64;
  const OUT_LEN: usize = 32;
  const KEY_LEN: usize = 32;
  const SALT_LEN: usize = 8;
  const PERSONAL_LEN: usize = 8;
  const ROUNDS: usize = 10;
  const ROTATIONS: [u32; 4] = [16, 12, 8, 7];
  const IV: [u32; 8] = [
    0x6a09_e667,
    0xbb67_ae85,
    0x3c6e_f372,
    0xa54f_f53a,
    0x510e_527f,
    0x9b05_688c,
    0x1f83_d9ab,
    0x5be0_cd19,
  ];
  // 48-bit field: BLAKE2s packs node offset into bytes 8..14.
  const NODE_OFFSET_LEN: usize = 6;
  const MAX_NODE_OFFSET: u64 = (1 << 48) - 1;
}
