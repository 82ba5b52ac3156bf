//! Differential fuzzing: every engine against the bit-serial reference and
//! against crc-fast.

#![no_main]

use arbitrary::Arbitrary;
use crc_fast::CrcAlgorithm;
use goldcrc::{Backend, Crc32Tables, Engine, FoldParams, Lanes, Polynomial, bitwise, tables};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  prev: u32,
  /// Start offset into `data`, to vary alignment.
  offset: u8,
  leaf_bytes: u16,
}

fuzz_target!(|input: Input| {
  let offset = (input.offset as usize % 8).min(input.data.len());
  let msg = &input.data[offset..];

  test_engines(&tables::CASTAGNOLI_TABLES, msg, input.prev, input.leaf_bytes as usize);
  test_engines(&tables::IEEE_TABLES, msg, input.prev, input.leaf_bytes as usize);
  test_crc_fast(msg);
});

fn test_engines(tables: &Crc32Tables, msg: &[u8], prev: u32, leaf_bytes: usize) {
  let expected = bitwise::compute(tables.polynomial(), prev, msg);

  for backend in Backend::ALL {
    let Ok(engine) = Engine::with_backend(tables, backend) else { continue };
    for lanes in [Lanes::Two, Lanes::Three] {
      let engine = engine.with_fold_params(FoldParams::new(lanes, leaf_bytes));
      let ours = engine.compute(msg, prev);
      assert_eq!(
        ours,
        expected,
        "{} mismatch: ours={ours:#010x}, reference={expected:#010x}, len={}, leaf={leaf_bytes}",
        engine.backend_name(),
        msg.len()
      );
    }
  }
}

fn test_crc_fast(msg: &[u8]) {
  let ours = goldcrc::Crc32c::checksum(msg);
  let reference = crc_fast::checksum(CrcAlgorithm::Crc32Iscsi, msg) as u32;
  assert_eq!(ours, reference, "CRC-32C differential mismatch, len={}", msg.len());

  let ours = !goldcrc::compute_crc32(msg, !0, Polynomial::IEEE);
  let reference = crc_fast::checksum(CrcAlgorithm::Crc32IsoHdlc, msg) as u32;
  assert_eq!(ours, reference, "CRC-32 differential mismatch, len={}", msg.len());
}
