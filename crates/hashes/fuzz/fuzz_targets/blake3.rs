//! Differential and streaming fuzzing for BLAKE3 in all three modes.

#![no_main]

use arbitrary::Arbitrary;
use hashes::crypto::Blake3;
use libfuzzer_sys::fuzz_target;
use traits::Xof as _;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  chunk_sizes: Vec<u16>,
  key: [u8; 32],
  context: String,
  out_len: u16,
  seek: u32,
}

fuzz_target!(|input: Input| {
  let out_len = usize::from(input.out_len % 4096);

  let cases = [
    (Blake3::new(), blake3::Hasher::new()),
    (Blake3::new_keyed(&input.key), blake3::Hasher::new_keyed(&input.key)),
    (
      Blake3::new_derive_key(&input.context),
      blake3::Hasher::new_derive_key(&input.context),
    ),
  ];

  for (mut ours, mut reference) in cases {
    let mut offset = 0;
    let mut idx = 0;
    while offset < input.data.len() {
      let size = match input.chunk_sizes.len() {
        0 => 1,
        n => (usize::from(input.chunk_sizes[idx % n]) % 3000).max(1),
      };
      let end = (offset + size).min(input.data.len());
      ours.update(&input.data[offset..end]).unwrap();
      offset = end;
      idx += 1;
    }
    reference.update(&input.data);

    assert_eq!(ours.count(), input.data.len() as u64);
    assert_eq!(ours.finalize().as_bytes(), reference.finalize().as_bytes(), "blake3 digest mismatch");

    let mut expected = vec![0u8; out_len];
    let mut reader = reference.finalize_xof();
    reader.set_position(u64::from(input.seek));
    reader.fill(&mut expected);

    let mut actual = vec![0u8; out_len];
    let mut xof = ours.finalize_xof();
    xof.set_position(u64::from(input.seek));
    xof.squeeze(&mut actual);
    assert_eq!(actual, expected, "blake3 xof mismatch");
  }
});
