//! Fuzz target for CRC combine.
//!
//! Checksums of arbitrary fragments, combined left to right, must equal the
//! checksum of the whole.

#![no_main]

use arbitrary::Arbitrary;
use goldcrc::{Checksum, ChecksumCombine, Crc32, Crc32c};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  splits: Vec<usize>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;

  // Normalize splits to valid range and sort
  let mut splits: Vec<usize> = input.splits.iter().map(|s| s % (data.len() + 1)).collect();
  splits.sort_unstable();
  splits.dedup();

  test_combine_chain::<Crc32c>(data, &splits);
  test_combine_chain::<Crc32>(data, &splits);
});

fn test_combine_chain<C: ChecksumCombine<Output = u32>>(data: &[u8], splits: &[usize]) {
  let expected = C::checksum(data);

  let mut combined = C::checksum(&[]);
  let mut start = 0;
  for &end in splits.iter().chain(core::iter::once(&data.len())) {
    let part = &data[start..end];
    combined = C::combine(combined, C::checksum(part), part.len());
    start = end;
  }

  assert_eq!(combined, expected, "combine chain mismatch, {} splits", splits.len());
}
