//! BLAKE2 compression function, generic over the variant.

#![allow(clippy::indexing_slicing)] // Compression schedule uses fixed indices

use super::variant::Blake2Variant;
use crate::util::{Word, load_words};

/// Message schedule. BLAKE2b runs all twelve rows; BLAKE2s stops after ten.
/// Rows 10 and 11 repeat rows 0 and 1.
pub(crate) const SIGMA: [[usize; 16]; 12] = [
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
  [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
  [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
  [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
  [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
  [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
  [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
  [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
  [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
];

/// State indices touched by each G call: four columns, then four diagonals.
const LANES: [[usize; 4]; 8] = [
  [0, 4, 8, 12],
  [1, 5, 9, 13],
  [2, 6, 10, 14],
  [3, 7, 11, 15],
  [0, 5, 10, 15],
  [1, 6, 11, 12],
  [2, 7, 8, 13],
  [3, 4, 9, 14],
];

#[inline(always)]
fn g<W: Word>(v: &mut [W; 16], [a, b, c, d]: [usize; 4], x: W, y: W, rot: [u32; 4]) {
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
  v[d] = (v[d] ^ v[a]).rotate_right(rot[0]);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(rot[1]);
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
  v[d] = (v[d] ^ v[a]).rotate_right(rot[2]);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(rot[3]);
}

/// Compress one `V::BLOCK_LEN`-byte block into `h`.
///
/// `counter` is the total number of bytes fed so far, including this block's
/// payload but never its padding. `last` sets f0; `last_node` sets f1.
#[inline]
pub(crate) fn compress<V: Blake2Variant>(
  h: &mut [V::Word; 8],
  block: &[u8],
  counter: u128,
  last: bool,
  last_node: bool,
) {
  debug_assert_eq!(block.len(), V::BLOCK_LEN);
  let m: [V::Word; 16] = load_words(block);
  let (t0, t1) = V::Word::split_counter(counter);
  let flag = |set: bool| if set { V::Word::ALL_ONES } else { V::Word::ZERO };

  let mut v = [V::Word::ZERO; 16];
  v[..8].copy_from_slice(&h[..]);
  v[8..].copy_from_slice(&V::IV);
  v[12] ^= t0;
  v[13] ^= t1;
  v[14] ^= flag(last);
  v[15] ^= flag(last_node);

  for s in &SIGMA[..V::ROUNDS] {
    for (i, lane) in LANES.iter().enumerate() {
      g(&mut v, *lane, m[s[2 * i]], m[s[2 * i + 1]], V::ROTATIONS);
    }
  }

  for i in 0..8 {
    h[i] ^= v[i] ^ v[i + 8];
  }
}
