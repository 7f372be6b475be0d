//! Differential and streaming fuzzing for BLAKE2b / BLAKE2s.
//!
//! Arbitrary parameter blocks are checked against `blake2b_simd`; arbitrary
//! update splits must agree with the one-shot digest.

#![no_main]

use arbitrary::Arbitrary;
use hashes::crypto::{Blake2b, Blake2bParams, Blake2s};
use libfuzzer_sys::fuzz_target;
use traits::Digest as _;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  chunk_sizes: Vec<u16>,
  digest_size: u8,
  key: Vec<u8>,
  salt: Vec<u8>,
  personal: Vec<u8>,
  fanout: u8,
  depth: u8,
  leaf_size: u32,
  node_offset: u64,
  node_depth: u8,
  inner_size: u8,
  last_node: bool,
}

fuzz_target!(|input: Input| {
  check_streaming(&input);
  check_params(&input);
});

fn chunks<'a>(data: &'a [u8], sizes: &[u16]) -> Vec<&'a [u8]> {
  let mut out = Vec::new();
  let mut offset = 0;
  let mut idx = 0;
  while offset < data.len() {
    let size = if sizes.is_empty() { 1 } else { (sizes[idx % sizes.len()] as usize % 300).max(1) };
    let end = (offset + size).min(data.len());
    out.push(&data[offset..end]);
    offset = end;
    idx += 1;
  }
  out
}

fn check_streaming(input: &Input) {
  let parts = chunks(&input.data, &input.chunk_sizes);

  let mut b = Blake2b::new();
  let mut s = Blake2s::new();
  for part in &parts {
    b.update(part).unwrap();
    s.update(part).unwrap();
  }
  assert_eq!(b.finalize(), Blake2b::digest(&input.data), "blake2b streaming mismatch");
  assert_eq!(s.finalize(), Blake2s::digest(&input.data), "blake2s streaming mismatch");

  let reference = {
    use blake2::Digest as _;
    blake2::Blake2b512::digest(&input.data)
  };
  assert_eq!(b.finalize().as_bytes(), &reference[..], "blake2b differential mismatch");
}

fn check_params(input: &Input) {
  let mut params = Blake2bParams::new();
  params
    .digest_size(usize::from(input.digest_size))
    .key(&input.key)
    .salt(&input.salt)
    .personal(&input.personal)
    .fanout(input.fanout)
    .depth(input.depth)
    .leaf_size(input.leaf_size)
    .node_offset(input.node_offset)
    .node_depth(input.node_depth)
    .inner_size(usize::from(input.inner_size))
    .last_node(input.last_node);

  let in_range = (1..=64).contains(&input.digest_size)
    && input.key.len() <= 64
    && input.salt.len() <= 16
    && input.personal.len() <= 16
    && input.depth != 0
    && input.inner_size <= 64;

  let Ok(ours) = params.hash(&input.data) else {
    assert!(!in_range, "valid parameters rejected: {params:?}");
    return;
  };
  assert!(in_range, "invalid parameters accepted: {params:?}");

  let expected = blake2b_simd::Params::new()
    .hash_length(usize::from(input.digest_size))
    .key(&input.key)
    .salt(&input.salt)
    .personal(&input.personal)
    .fanout(input.fanout)
    .max_depth(input.depth)
    .max_leaf_length(input.leaf_size)
    .node_offset(input.node_offset)
    .node_depth(input.node_depth)
    .inner_hash_length(usize::from(input.inner_size))
    .last_node(input.last_node)
    .hash(&input.data);
  assert_eq!(ours.as_bytes(), expected.as_bytes(), "blake2b params differential mismatch");
}
