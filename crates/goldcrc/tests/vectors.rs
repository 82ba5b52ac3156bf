//! Published check values and cross-validation against crc-fast.

use crc_fast::CrcAlgorithm;
use goldcrc::{Backend, Crc32, Crc32c, Engine, Invert, Polynomial, compute_crc32, compute_crc32c, tables};

const CHECK: &[u8] = b"123456789";

#[test]
fn crc32c_check_value() {
  assert_eq!(Crc32c::checksum(CHECK), 0xE306_9283);
  assert_eq!(!compute_crc32c(CHECK, !0), 0xE306_9283);
}

#[test]
fn crc32c_raw_register_check_value() {
  // prev = 0, no conditioning on either side.
  assert_eq!(compute_crc32c(CHECK, 0), 0x58E3_FA20);
  assert_eq!(compute_crc32(CHECK, 0, Polynomial::CASTAGNOLI), 0x58E3_FA20);
}

#[test]
fn crc32_check_value() {
  assert_eq!(Crc32::checksum(CHECK), 0xCBF4_3926);
  assert_eq!(compute_crc32(CHECK, 0, Polynomial::IEEE), 0x2DFD_2D88);
}

#[test]
fn edge_vectors() {
  assert_eq!(Crc32c::checksum(b""), 0);
  assert_eq!(Crc32c::checksum(&[0x00]), 0x527D_5351);
  assert_eq!(Crc32c::checksum(&[0u8; 32]), 0x8A91_36AA);
  assert_eq!(Crc32c::checksum(&[0xFFu8; 32]), 0x62A8_AB43);
  let ascending: Vec<u8> = (0..32).collect();
  assert_eq!(Crc32c::checksum(&ascending), 0x46DD_794E);
}

#[test]
fn every_backend_reproduces_check_values() {
  for backend in Backend::ALL {
    if let Ok(e) = Engine::with_backend(&tables::CASTAGNOLI_TABLES, backend) {
      assert_eq!(e.compute_with(CHECK, 0, Invert::Both), 0xE306_9283, "{}", e.backend_name());
      assert_eq!(e.compute_with(CHECK, 0, Invert::None), 0x58E3_FA20, "{}", e.backend_name());
    }
    if let Ok(e) = Engine::with_backend(&tables::IEEE_TABLES, backend) {
      assert_eq!(e.compute_inverted(CHECK, 0), 0xCBF4_3926, "{}", e.backend_name());
    }
  }
}

#[test]
fn matches_crc_fast_across_lengths() {
  let data: Vec<u8> = (0..4096u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 24) as u8).collect();
  for len in (0..data.len()).step_by(37) {
    let msg = &data[..len];
    assert_eq!(Crc32c::checksum(msg), crc_fast::checksum(CrcAlgorithm::Crc32Iscsi, msg) as u32, "len {len}");
    assert_eq!(Crc32::checksum(msg), crc_fast::checksum(CrcAlgorithm::Crc32IsoHdlc, msg) as u32, "len {len}");
  }
}
