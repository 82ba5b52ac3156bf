extern crate std;

use std::vec::Vec;

use crc_fast::CrcAlgorithm;
use proptest::prelude::*;

use super::*;
use crate::tables::{CASTAGNOLI_TABLES, IEEE_TABLES};

fn engines(tables: &Crc32Tables) -> Vec<Engine<'_>> {
  let mut out: Vec<Engine<'_>> = Backend::ALL
    .iter()
    .filter_map(|&b| Engine::with_backend(tables, b).ok())
    .collect();
  // Both lane counts for every fold backend, with a short leaf so rounds actually run.
  for e in out.clone() {
    if matches!(e.backend(), Backend::Fold | Backend::EmulatedFold) {
      for lanes in [Lanes::Two, Lanes::Three] {
        out.push(e.with_fold_params(FoldParams::new(lanes, 0)));
      }
    }
  }
  out
}

proptest! {
  #[test]
  fn all_engines_agree_castagnoli(
    data in proptest::collection::vec(any::<u8>(), 0..=2048),
    offset in 0usize..8,
    prev in any::<u32>(),
  ) {
    let msg = &data[offset.min(data.len())..];
    let reference = bitwise::compute(Polynomial::CASTAGNOLI, prev, msg);
    for e in engines(&CASTAGNOLI_TABLES) {
      prop_assert_eq!(e.compute(msg, prev), reference, "{}", e.backend_name());
    }
  }

  #[test]
  fn all_engines_agree_ieee(data in proptest::collection::vec(any::<u8>(), 0..=2048), prev in any::<u32>()) {
    let reference = bitwise::compute(Polynomial::IEEE, prev, &data);
    for e in engines(&IEEE_TABLES) {
      prop_assert_eq!(e.compute(&data, prev), reference, "{}", e.backend_name());
    }
  }

  #[test]
  fn emulated_fold_any_polynomial(
    poly in any::<u32>().prop_map(|p| Polynomial::new(p | 0x8000_0000)),
    data in proptest::collection::vec(any::<u8>(), 0..=1024),
  ) {
    let tables = Crc32Tables::new(poly);
    let reference = bitwise::compute(poly, !0, &data);
    for lanes in [Lanes::Two, Lanes::Three] {
      let e = Engine::with_backend(&tables, Backend::EmulatedFold).map(|e| e.with_fold_params(FoldParams::new(lanes, 0)));
      prop_assert_eq!(e.map(|e| e.compute(&data, !0)), Ok(reference));
    }
  }

  // ─────────────────────────────────────────────────────────────────────────────
  // Cross-validation against crc-fast
  // ─────────────────────────────────────────────────────────────────────────────

  #[test]
  fn crc32c_matches_crc_fast(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    let reference = crc_fast::checksum(CrcAlgorithm::Crc32Iscsi, &data) as u32;
    prop_assert_eq!(Crc32c::checksum(&data), reference);
  }

  #[test]
  fn crc32_matches_crc_fast(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    let reference = crc_fast::checksum(CrcAlgorithm::Crc32IsoHdlc, &data) as u32;
    prop_assert_eq!(Crc32::checksum(&data), reference);
  }

  #[test]
  fn crc32c_streaming_matches_crc_fast(data in proptest::collection::vec(any::<u8>(), 0..=4096), chunk in 1usize..=257) {
    let mut ours = Crc32c::new();
    let mut reference = crc_fast::Digest::new(CrcAlgorithm::Crc32Iscsi);

    for part in data.chunks(chunk) {
      ours.update(part);
      reference.update(part);
    }

    prop_assert_eq!(ours.finalize(), reference.finalize() as u32);
  }

  #[test]
  fn gf2_combine_matches_crc_fast(data in proptest::collection::vec(any::<u8>(), 0..=4096), split in any::<usize>()) {
    let split = split % (data.len() + 1);
    let (a, b) = data.split_at(split);

    let combined = Crc32c::combine(Crc32c::checksum(a), Crc32c::checksum(b), b.len());
    let reference = crc_fast::checksum(CrcAlgorithm::Crc32Iscsi, &data) as u32;
    prop_assert_eq!(combined, reference);
  }
}
