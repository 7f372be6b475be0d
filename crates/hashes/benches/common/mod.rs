use core::hint::black_box;

use criterion::{BenchmarkGroup, Throughput, measurement::WallTime};

/// xorshift64* step. Not cryptographic; it only keeps inputs unstructured.
#[inline]
fn xorshift64star(state: &mut u64) -> u64 {
  let mut x = *state;
  x ^= x >> 12;
  x ^= x << 25;
  x ^= x >> 27;
  *state = x;
  x.wrapping_mul(0x2545_F491_4F6C_DD1D)
}

pub fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut state = seed ^ (len as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
  let out: Vec<u8> = (0..len).map(|_| (xorshift64star(&mut state) >> 56) as u8).collect();
  black_box(&out);
  out
}

/// Lengths straddling the BLAKE2s (64), BLAKE2b (128) and BLAKE3 chunk (1024)
/// boundaries, plus a few bulk sizes.
pub fn sized_inputs() -> Vec<(usize, Vec<u8>)> {
  [
    0usize,
    1,
    32,
    63,
    64,
    65,
    127,
    128,
    129,
    1023,
    1024,
    1025,
    4 * 1024,
    16 * 1024,
    64 * 1024,
    1024 * 1024,
  ]
  .into_iter()
  .map(|len| (len, pseudo_random_bytes(len, 0xB1A4_E0F5_2B3C_0001)))
  .collect()
}

pub fn set_throughput(group: &mut BenchmarkGroup<'_, WallTime>, len: usize) {
  group.throughput(match len {
    0 => Throughput::Elements(1),
    n => Throughput::Bytes(n as u64),
  });
}
