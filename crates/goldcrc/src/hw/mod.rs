//! Hardware CRC-accumulate capabilities and the lane engines built on them.
//!
//! A [`CrcHardware`] value is a *capability token*: possessing one proves the
//! primitives it wraps may be executed. Hardware tokens live in the
//! per-architecture modules and can only be obtained through runtime
//! detection; [`Emulated`] is the table-backed software token, valid on every
//! machine and for every polynomial, so the fold engine can run (and be
//! tested) anywhere.
//!
//! # Primitives
//!
//! | Operation | Meaning (reflected domain) |
//! |-----------|----------------------------|
//! | `accumulate8(c, b)` | eight bit-serial steps over byte `b` |
//! | `accumulate64(c, w)` | `c·x^64 + w·x^32 mod P` (64 steps over little-endian `w`) |
//! | `clmul64(a, b)` | carry-less 64×64→128 product |

use crate::{gf2, polynomial::Polynomial, tables::Crc32Tables};

#[cfg(target_arch = "aarch64")]
pub mod aarch64;
#[cfg(target_arch = "x86_64")]
pub mod x86_64;

#[cfg(target_arch = "aarch64")]
pub(crate) use aarch64::{Native, NativeFold};
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) use unsupported::{Native, NativeFold};
#[cfg(target_arch = "x86_64")]
pub(crate) use x86_64::{Native, NativeFold};

// ─────────────────────────────────────────────────────────────────────────────
// Capability trait
// ─────────────────────────────────────────────────────────────────────────────

/// Primitives a CRC-accumulate unit offers.
///
/// Implementations must agree bit-for-bit with the bit-serial engine for
/// [`polynomial`](Self::polynomial).
pub trait CrcHardware: Copy {
  /// Kernel family name used in backend introspection.
  const NAME: &'static str;

  /// The polynomial the accumulate primitives implement.
  fn polynomial(self) -> Polynomial;

  /// Retire one byte.
  fn accumulate8(self, crc: u32, byte: u8) -> u32;

  /// Retire one little-endian 64-bit word.
  fn accumulate64(self, crc: u32, word: u64) -> u32;

  /// Carry-less multiply. Defaults to the software product.
  #[inline(always)]
  fn clmul64(self, a: u64, b: u64) -> u128 {
    gf2::clmul64(a, b)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Software capability
// ─────────────────────────────────────────────────────────────────────────────

/// Table-driven stand-in for a hardware CRC unit.
#[derive(Clone, Copy, Debug)]
pub struct Emulated<'t> {
  tables: &'t Crc32Tables,
}

impl<'t> Emulated<'t> {
  /// Wrap a table bundle.
  #[inline]
  #[must_use]
  pub const fn new(tables: &'t Crc32Tables) -> Self {
    Self { tables }
  }
}

impl CrcHardware for Emulated<'_> {
  const NAME: &'static str = "emulated";

  #[inline(always)]
  fn polynomial(self) -> Polynomial {
    self.tables.polynomial()
  }

  #[inline(always)]
  fn accumulate8(self, crc: u32, byte: u8) -> u32 {
    self.tables.bytes().step(crc, byte)
  }

  #[inline(always)]
  fn accumulate64(self, crc: u32, word: u64) -> u32 {
    crate::portable::slice8(crc, &word.to_le_bytes(), self.tables.bytes().all())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lane engines
// ─────────────────────────────────────────────────────────────────────────────

/// Byte-at-a-time over the accumulate unit.
#[inline(always)]
pub fn crc_hw_1byte<H: CrcHardware>(hw: H, mut crc: u32, data: &[u8]) -> u32 {
  for &b in data {
    crc = hw.accumulate8(crc, b);
  }
  crc
}

/// Eight bytes per instruction, byte steps for the tail.
///
/// Alignment is not required; words are loaded little-endian.
#[inline(always)]
pub fn crc_hw_8byte<H: CrcHardware>(hw: H, mut crc: u32, data: &[u8]) -> u32 {
  let (words, tail) = data.as_chunks::<8>();
  for w in words {
    crc = hw.accumulate64(crc, u64::from_le_bytes(*w));
  }
  crc_hw_1byte(hw, crc, tail)
}

// ─────────────────────────────────────────────────────────────────────────────
// Targets without a CRC unit
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
mod unsupported {
  use crate::{error::EngineError, fold::FoldParams, polynomial::Polynomial, tables::FoldTable};

  /// No hardware CRC on this target; uninhabited.
  #[derive(Clone, Copy, Debug)]
  pub(crate) enum Native {}

  /// No hardware CRC on this target; uninhabited.
  #[derive(Clone, Copy, Debug)]
  pub(crate) enum NativeFold {}

  impl Native {
    pub(crate) fn for_polynomial(_poly: Polynomial) -> Result<Self, EngineError> {
      Err(EngineError::MissingCapability { backend: "hwcrc" })
    }

    pub(crate) fn hwcrc1(self, _crc: u32, _data: &[u8]) -> u32 {
      match self {}
    }

    pub(crate) fn hwcrc8(self, _crc: u32, _data: &[u8]) -> u32 {
      match self {}
    }

    pub(crate) fn name(self, _wide: bool) -> &'static str {
      match self {}
    }
  }

  impl NativeFold {
    pub(crate) fn for_polynomial(_poly: Polynomial) -> Result<Self, EngineError> {
      Err(EngineError::MissingCapability { backend: "fold" })
    }

    pub(crate) fn compute(self, _fold: &FoldTable, _params: FoldParams, _crc: u32, _data: &[u8]) -> u32 {
      match self {}
    }

    pub(crate) fn name(self, _params: FoldParams) -> &'static str {
      match self {}
    }
  }
}
