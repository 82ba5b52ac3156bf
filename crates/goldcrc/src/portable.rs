//! Portable CRC-32 using slice-by-N lookup tables.
//!
//! Slice-by-N retires N bytes per step with N table lookups, one per byte
//! position, combined by XOR. Wider steps break the serial dependency on the
//! register at the cost of more table memory:
//!
//! | Width | Bytes/step | Tables touched |
//! |-------|------------|----------------|
//! | 1 | 1 | 1 KiB |
//! | 2 | 2 | 2 KiB |
//! | 4 | 4 | 4 KiB |
//! | 8 | 8 | 8 KiB |
//! | 16 | 16 | 16 KiB |
//!
//! Each width hands its remainder to the next smaller one (16→8→4→2→1), so
//! every byte of every length is processed exactly once.

// SAFETY: All array indexing in this module uses bounded indices:
// - as_chunks guarantees chunk sizes
// - Table indices use `& 0xFF` (0..255) or a top-byte shift
// - Table selectors are constants below SLICES
#![allow(clippy::indexing_slicing)]

use crate::{
  error::EngineError,
  tables::{ByteTables, SLICES},
};

type Tables = [[u32; 256]; SLICES];

/// Slice width of the tabular engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Slice {
  By1,
  By2,
  By4,
  By8,
  #[default]
  By16,
}

impl Slice {
  /// Every width, narrowest first.
  pub const ALL: [Self; 5] = [Self::By1, Self::By2, Self::By4, Self::By8, Self::By16];

  /// Width from a byte count.
  ///
  /// # Errors
  ///
  /// [`EngineError::InvalidWidth`] unless `width` is 1, 2, 4, 8 or 16.
  pub const fn from_width(width: usize) -> Result<Self, EngineError> {
    match width {
      1 => Ok(Self::By1),
      2 => Ok(Self::By2),
      4 => Ok(Self::By4),
      8 => Ok(Self::By8),
      16 => Ok(Self::By16),
      w => Err(EngineError::InvalidWidth(w)),
    }
  }

  /// Bytes retired per step.
  #[inline]
  #[must_use]
  pub const fn width(self) -> usize {
    match self {
      Self::By1 => 1,
      Self::By2 => 2,
      Self::By4 => 4,
      Self::By8 => 8,
      Self::By16 => 16,
    }
  }

  /// Kernel name, e.g. `"slice16"`.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::By1 => "slice1",
      Self::By2 => "slice2",
      Self::By4 => "slice4",
      Self::By8 => "slice8",
      Self::By16 => "slice16",
    }
  }

  /// Run this width over `data` starting from the raw register `crc`.
  #[inline]
  #[must_use]
  pub fn compute(self, tables: &ByteTables, crc: u32, data: &[u8]) -> u32 {
    let t = tables.all();
    match self {
      Self::By1 => slice1(crc, data, t),
      Self::By2 => slice2(crc, data, t),
      Self::By4 => slice4(crc, data, t),
      Self::By8 => slice8(crc, data, t),
      Self::By16 => slice16(crc, data, t),
    }
  }
}

/// Byte-at-a-time table lookup.
#[inline]
pub fn slice1(mut crc: u32, data: &[u8], tables: &Tables) -> u32 {
  for &byte in data {
    crc = tables[0][((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8);
  }
  crc
}

/// Two bytes per step.
#[inline]
pub fn slice2(mut crc: u32, data: &[u8], tables: &Tables) -> u32 {
  let (chunks, remainder) = data.as_chunks::<2>();

  for chunk in chunks {
    let v = u16::from_le_bytes(*chunk) as u32 ^ crc;
    crc = (v >> 16) ^ tables[1][(v & 0xFF) as usize] ^ tables[0][((v >> 8) & 0xFF) as usize];
  }

  slice1(crc, remainder, tables)
}

/// Four bytes (one register width) per step.
#[inline]
pub fn slice4(mut crc: u32, data: &[u8], tables: &Tables) -> u32 {
  let (chunks, remainder) = data.as_chunks::<4>();

  for chunk in chunks {
    let v = u32::from_le_bytes(*chunk) ^ crc;
    crc = tables[3][(v & 0xFF) as usize]
      ^ tables[2][((v >> 8) & 0xFF) as usize]
      ^ tables[1][((v >> 16) & 0xFF) as usize]
      ^ tables[0][(v >> 24) as usize];
  }

  slice2(crc, remainder, tables)
}

/// Eight bytes per step.
#[inline]
pub fn slice8(mut crc: u32, data: &[u8], tables: &Tables) -> u32 {
  let (chunks, remainder) = data.as_chunks::<8>();

  for chunk in chunks {
    let val = u64::from_le_bytes(*chunk) ^ crc as u64;

    crc = tables[7][(val & 0xFF) as usize]
      ^ tables[6][((val >> 8) & 0xFF) as usize]
      ^ tables[5][((val >> 16) & 0xFF) as usize]
      ^ tables[4][((val >> 24) & 0xFF) as usize]
      ^ tables[3][((val >> 32) & 0xFF) as usize]
      ^ tables[2][((val >> 40) & 0xFF) as usize]
      ^ tables[1][((val >> 48) & 0xFF) as usize]
      ^ tables[0][(val >> 56) as usize];
  }

  slice4(crc, remainder, tables)
}

/// Sixteen bytes per step.
#[inline]
pub fn slice16(mut crc: u32, data: &[u8], tables: &Tables) -> u32 {
  let (chunks, remainder) = data.as_chunks::<16>();

  for chunk in chunks {
    let (lo, hi) = chunk.split_at(8);
    let mut a_bytes = [0u8; 8];
    let mut b_bytes = [0u8; 8];
    a_bytes.copy_from_slice(lo);
    b_bytes.copy_from_slice(hi);
    let a = u64::from_le_bytes(a_bytes) ^ crc as u64;
    let b = u64::from_le_bytes(b_bytes);

    crc = tables[15][(a & 0xFF) as usize]
      ^ tables[14][((a >> 8) & 0xFF) as usize]
      ^ tables[13][((a >> 16) & 0xFF) as usize]
      ^ tables[12][((a >> 24) & 0xFF) as usize]
      ^ tables[11][((a >> 32) & 0xFF) as usize]
      ^ tables[10][((a >> 40) & 0xFF) as usize]
      ^ tables[9][((a >> 48) & 0xFF) as usize]
      ^ tables[8][(a >> 56) as usize]
      ^ tables[7][(b & 0xFF) as usize]
      ^ tables[6][((b >> 8) & 0xFF) as usize]
      ^ tables[5][((b >> 16) & 0xFF) as usize]
      ^ tables[4][((b >> 24) & 0xFF) as usize]
      ^ tables[3][((b >> 32) & 0xFF) as usize]
      ^ tables[2][((b >> 40) & 0xFF) as usize]
      ^ tables[1][((b >> 48) & 0xFF) as usize]
      ^ tables[0][(b >> 56) as usize];
  }

  slice8(crc, remainder, tables)
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use super::*;
  use crate::{
    bitwise,
    polynomial::Polynomial,
    tables::{CASTAGNOLI_TABLES, IEEE_TABLES},
  };

  fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(131).wrapping_add(7)).collect()
  }

  #[test]
  fn from_width_roundtrips() {
    for s in Slice::ALL {
      assert_eq!(Slice::from_width(s.width()), Ok(s));
    }
    for w in [0, 3, 5, 12, 32] {
      assert_eq!(Slice::from_width(w), Err(EngineError::InvalidWidth(w)));
    }
  }

  #[test]
  fn check_value_all_widths() {
    for s in Slice::ALL {
      let crc = s.compute(CASTAGNOLI_TABLES.bytes(), !0, b"123456789") ^ !0;
      assert_eq!(crc, 0xE306_9283, "{}", s.name());
      let crc = s.compute(IEEE_TABLES.bytes(), !0, b"123456789") ^ !0;
      assert_eq!(crc, 0xCBF4_3926, "{}", s.name());
    }
  }

  #[test]
  fn every_remainder_path_matches_bitwise() {
    // 0..=47 exercises every combination of 16/8/4/2/1 remainders.
    let data = pattern(48);
    for len in 0..=data.len() {
      let expected = bitwise::compute(Polynomial::CASTAGNOLI, 0x0BAD_F00D, &data[..len]);
      for s in Slice::ALL {
        assert_eq!(
          s.compute(CASTAGNOLI_TABLES.bytes(), 0x0BAD_F00D, &data[..len]),
          expected,
          "{} len {len}",
          s.name()
        );
      }
    }
  }

  #[test]
  fn empty_returns_prev() {
    for s in Slice::ALL {
      assert_eq!(s.compute(CASTAGNOLI_TABLES.bytes(), 0x1234_5678, &[]), 0x1234_5678);
    }
  }

  #[test]
  fn unaligned_subslices() {
    let data = pattern(300);
    for offset in 0..8 {
      let slice = &data[offset..];
      let expected = bitwise::compute(Polynomial::IEEE, !0, slice);
      assert_eq!(slice16(!0, slice, IEEE_TABLES.bytes().all()), expected, "offset {offset}");
    }
  }
}
