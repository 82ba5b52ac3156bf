//! Fuzz target for the streaming hashers.
//!
//! Arbitrary sequences of update calls must match the one-shot checksum.

#![no_main]

use arbitrary::Arbitrary;
use goldcrc::{Checksum, Crc32, Crc32c};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<usize>,
}

fuzz_target!(|input: Input| {
  test_streaming::<Crc32c>(&input.data, &input.chunk_sizes);
  test_streaming::<Crc32>(&input.data, &input.chunk_sizes);
});

fn test_streaming<C: Checksum<Output = u32>>(data: &[u8], chunk_sizes: &[usize]) {
  let expected = C::checksum(data);

  let mut hasher = C::new();
  let mut rest = data;
  let mut chunk_idx = 0;

  while !rest.is_empty() {
    let chunk_size = match chunk_sizes {
      [] => 1,
      sizes => (sizes[chunk_idx % sizes.len()] % 1024).max(1),
    };
    let (chunk, tail) = rest.split_at(chunk_size.min(rest.len()));
    hasher.update(chunk);
    rest = tail;
    chunk_idx += 1;
  }

  assert_eq!(hasher.finalize(), expected, "streaming mismatch, len={}", data.len());
}
