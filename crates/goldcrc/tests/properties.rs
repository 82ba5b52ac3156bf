//! Algebraic properties every engine must satisfy.

use goldcrc::{Backend, Crc32c, Engine, Polynomial, bitwise, gf2, tables::CASTAGNOLI_TABLES};
use proptest::prelude::*;

fn any_engine() -> impl Strategy<Value = Engine<'static>> {
  proptest::sample::select(
    Backend::ALL
      .iter()
      .filter_map(|&b| Engine::with_backend(&CASTAGNOLI_TABLES, b).ok())
      .collect::<Vec<_>>(),
  )
}

proptest! {
  #[test]
  fn resumable(engine in any_engine(), data in proptest::collection::vec(any::<u8>(), 0..=1024), split in any::<usize>(), prev in any::<u32>()) {
    let split = split % (data.len() + 1);
    let (a, b) = data.split_at(split);
    prop_assert_eq!(engine.compute(b, engine.compute(a, prev)), engine.compute(&data, prev));
  }

  #[test]
  fn zero_length_is_identity(engine in any_engine(), prev in any::<u32>()) {
    prop_assert_eq!(engine.compute(&[], prev), prev);
    prop_assert_eq!(engine.compute_inverted(&[], prev), prev);
  }

  #[test]
  fn linear_over_xor(engine in any_engine(), pair in (1usize..=512).prop_flat_map(|n| (
    proptest::collection::vec(any::<u8>(), n),
    proptest::collection::vec(any::<u8>(), n),
  ))) {
    // With a zero register the raw CRC is linear: crc(a ^ b) = crc(a) ^ crc(b).
    let (a, b) = pair;
    let x: Vec<u8> = a.iter().zip(&b).map(|(p, q)| p ^ q).collect();
    prop_assert_eq!(engine.compute(&x, 0), engine.compute(&a, 0) ^ engine.compute(&b, 0));
  }

  #[test]
  fn prev_contributes_as_shifted_register(engine in any_engine(), data in proptest::collection::vec(any::<u8>(), 0..=512), prev in any::<u32>()) {
    let shifted = gf2::shift_zeros(prev, 8 * data.len() as u64, Polynomial::CASTAGNOLI);
    prop_assert_eq!(engine.compute(&data, prev), shifted ^ engine.compute(&data, 0));
  }

  #[test]
  fn combine_joins_fragments(data in proptest::collection::vec(any::<u8>(), 0..=2048), split in any::<usize>()) {
    let split = split % (data.len() + 1);
    let (a, b) = data.split_at(split);
    prop_assert_eq!(Crc32c::combine(Crc32c::checksum(a), Crc32c::checksum(b), b.len()), Crc32c::checksum(&data));

    let raw = gf2::combine(
      bitwise::compute(Polynomial::CASTAGNOLI, 0, a),
      bitwise::compute(Polynomial::CASTAGNOLI, 0, b),
      b.len(),
      Polynomial::CASTAGNOLI,
    );
    prop_assert_eq!(raw, bitwise::compute(Polynomial::CASTAGNOLI, 0, &data));
  }

  #[test]
  fn single_bit_flip_always_detected(engine in any_engine(), data in proptest::collection::vec(any::<u8>(), 1..=512), bit in any::<usize>()) {
    let bit = bit % (8 * data.len());
    let mut flipped = data.clone();
    flipped[bit / 8] ^= 1 << (bit % 8);
    prop_assert_ne!(engine.compute_inverted(&flipped, 0), engine.compute_inverted(&data, 0));
  }
}
