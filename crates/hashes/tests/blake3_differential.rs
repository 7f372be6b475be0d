use hashes::crypto::Blake3;
use proptest::prelude::*;
use traits::{Digest as _, Xof as _};

fn blake3_ref_hash(data: &[u8]) -> [u8; 32] {
  *blake3::hash(data).as_bytes()
}

fn blake3_ref_keyed(key: &[u8; 32], data: &[u8]) -> [u8; 32] {
  *blake3::keyed_hash(key, data).as_bytes()
}

fn blake3_ref_derive(context: &str, data: &[u8]) -> [u8; 32] {
  blake3::derive_key(context, data)
}

fn feed(h: &mut Blake3, data: &[u8]) {
  let mut i = 0usize;
  while i < data.len() {
    let step = (data[i] as usize % 251) + 1;
    let end = core::cmp::min(data.len(), i + step);
    h.update(&data[i..end]).unwrap();
    i = end;
  }
}

proptest! {
  #[test]
  fn blake3_one_shot_matches_official(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
    let actual = Blake3::digest(&data);
    prop_assert_eq!(actual.as_bytes(), &blake3_ref_hash(&data));
  }

  #[test]
  fn blake3_streaming_matches_official(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
    let expected = blake3_ref_hash(&data);
    let mut h = Blake3::new();
    feed(&mut h, &data);
    let actual = h.finalize();
    prop_assert_eq!(actual.as_bytes(), &expected);
  }

  #[test]
  fn blake3_xof_matches_official(
    data in proptest::collection::vec(any::<u8>(), 0..4096),
    out_len in 0usize..2048,
    split in 0usize..2048,
  ) {
    let mut expected = vec![0u8; out_len];
    let mut ref_hasher = blake3::Hasher::new();
    ref_hasher.update(&data);
    ref_hasher.finalize_xof().fill(&mut expected);

    let mut h = Blake3::new();
    feed(&mut h, &data);
    let mut xof = h.finalize_xof();
    let mut actual = vec![0u8; out_len];
    let (head, tail) = actual.split_at_mut(split.min(out_len));
    xof.squeeze(head);
    xof.squeeze(tail);

    prop_assert_eq!(actual, expected);
  }

  #[test]
  fn blake3_xof_seek_matches_official(
    data in proptest::collection::vec(any::<u8>(), 0..1024),
    position in 0u64..(1 << 40),
    out_len in 0usize..256,
  ) {
    let mut expected = vec![0u8; out_len];
    let mut reader = blake3::Hasher::new().update(&data).finalize_xof();
    reader.set_position(position);
    reader.fill(&mut expected);

    let mut h = Blake3::new();
    h.update(&data).unwrap();
    let mut xof = h.finalize_xof();
    xof.set_position(position);
    let mut actual = vec![0u8; out_len];
    xof.squeeze(&mut actual);

    prop_assert_eq!(actual, expected);
    prop_assert_eq!(xof.position(), position + out_len as u64);
  }

  #[test]
  fn blake3_keyed_matches_official(
    data in proptest::collection::vec(any::<u8>(), 0..8192),
    key in any::<[u8; 32]>(),
  ) {
    let expected = blake3_ref_keyed(&key, &data);
    let mut h = Blake3::new_keyed(&key);
    feed(&mut h, &data);
    let actual = h.finalize();
    prop_assert_eq!(actual.as_bytes(), &expected);
  }

  #[test]
  fn blake3_derive_key_matches_official(
    data in proptest::collection::vec(any::<u8>(), 0..4096),
    context in "[ -~]{0,80}",
  ) {
    let expected = blake3_ref_derive(&context, &data);
    let mut h = Blake3::new_derive_key(&context);
    feed(&mut h, &data);
    let actual = h.finalize();
    prop_assert_eq!(actual.as_bytes(), &expected);
    prop_assert_eq!(hashes::crypto::blake3::derive_key(&context, &data), expected);
  }
}
