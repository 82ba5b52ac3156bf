//! x86_64 CRC-32C capability tokens (SSE4.2 `crc32`, PCLMULQDQ).
//!
//! The SSE4.2 instruction is hardwired to the Castagnoli polynomial; there is
//! no IEEE variant on x86.
//!
//! # Safety
//!
//! Uses `unsafe` for x86 intrinsics. A token is only handed out after
//! [`platform::caps`] reports the features it wraps, so every method on a
//! token may execute them.
#![allow(unsafe_code)]

use core::arch::x86_64::*;

use platform::caps::x86;

use super::{CrcHardware, crc_hw_1byte, crc_hw_8byte};
use crate::{error::EngineError, fold, fold::FoldParams, polynomial::Polynomial, tables::FoldTable};

// ─────────────────────────────────────────────────────────────────────────────
// Tokens
// ─────────────────────────────────────────────────────────────────────────────

/// Proof that SSE4.2 `crc32` is available.
#[derive(Clone, Copy, Debug)]
pub struct Sse42(());

/// Proof that SSE4.2 `crc32` and PCLMULQDQ are available.
#[derive(Clone, Copy, Debug)]
pub struct Sse42Pclmul(());

impl Sse42 {
  /// Returns the token if the CPU supports SSE4.2.
  #[must_use]
  pub fn detect() -> Option<Self> {
    platform::caps().has(x86::CRC32C_READY).then_some(Self(()))
  }
}

impl Sse42Pclmul {
  /// Returns the token if the CPU supports SSE4.2 and PCLMULQDQ.
  #[must_use]
  pub fn detect() -> Option<Self> {
    platform::caps().has(x86::FOLD_READY).then_some(Self(()))
  }

  /// The accumulate-only capability this token implies.
  #[inline]
  #[must_use]
  pub const fn crc(self) -> Sse42 {
    Sse42(())
  }
}

impl CrcHardware for Sse42 {
  const NAME: &'static str = "x86_64/sse4.2";

  #[inline(always)]
  fn polynomial(self) -> Polynomial {
    Polynomial::CASTAGNOLI
  }

  #[inline(always)]
  fn accumulate8(self, crc: u32, byte: u8) -> u32 {
    // SAFETY: the token exists only when SSE4.2 was detected.
    unsafe { _mm_crc32_u8(crc, byte) }
  }

  #[inline(always)]
  fn accumulate64(self, crc: u32, word: u64) -> u32 {
    // SAFETY: the token exists only when SSE4.2 was detected.
    unsafe { _mm_crc32_u64(crc as u64, word) as u32 }
  }
}

impl CrcHardware for Sse42Pclmul {
  const NAME: &'static str = "x86_64/sse4.2+pclmulqdq";

  #[inline(always)]
  fn polynomial(self) -> Polynomial {
    Polynomial::CASTAGNOLI
  }

  #[inline(always)]
  fn accumulate8(self, crc: u32, byte: u8) -> u32 {
    self.crc().accumulate8(crc, byte)
  }

  #[inline(always)]
  fn accumulate64(self, crc: u32, word: u64) -> u32 {
    self.crc().accumulate64(crc, word)
  }

  #[inline(always)]
  fn clmul64(self, a: u64, b: u64) -> u128 {
    // SAFETY: the token exists only when PCLMULQDQ was detected.
    unsafe {
      let p = _mm_clmulepi64_si128(_mm_cvtsi64_si128(a as i64), _mm_cvtsi64_si128(b as i64), 0x00);
      let lo = _mm_cvtsi128_si64(p) as u64;
      let hi = _mm_cvtsi128_si64(_mm_srli_si128(p, 8)) as u64;
      ((hi as u128) << 64) | lo as u128
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Feature-enabled entry points
// ─────────────────────────────────────────────────────────────────────────────

#[target_feature(enable = "sse4.2")]
unsafe fn hwcrc1_sse42(hw: Sse42, crc: u32, data: &[u8]) -> u32 {
  crc_hw_1byte(hw, crc, data)
}

#[target_feature(enable = "sse4.2")]
unsafe fn hwcrc8_sse42(hw: Sse42, crc: u32, data: &[u8]) -> u32 {
  crc_hw_8byte(hw, crc, data)
}

#[target_feature(enable = "sse4.2", enable = "pclmulqdq")]
unsafe fn fold_sse42_pclmul(hw: Sse42Pclmul, table: &FoldTable, params: FoldParams, crc: u32, data: &[u8]) -> u32 {
  fold::compute(hw, table, params, crc, data)
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine adapters
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) type Native = Sse42;
pub(crate) type NativeFold = Sse42Pclmul;

fn check_polynomial(poly: Polynomial) -> Result<(), EngineError> {
  if poly == Polynomial::CASTAGNOLI {
    Ok(())
  } else {
    Err(EngineError::PolynomialMismatch {
      requested: poly,
      hardware: Polynomial::CASTAGNOLI,
    })
  }
}

impl Sse42 {
  pub(crate) fn for_polynomial(poly: Polynomial) -> Result<Self, EngineError> {
    check_polynomial(poly)?;
    Self::detect().ok_or(EngineError::MissingCapability {
      backend: "x86_64/hwcrc",
    })
  }

  /// Byte-at-a-time `crc32b`.
  #[inline]
  #[must_use]
  pub fn hwcrc1(self, crc: u32, data: &[u8]) -> u32 {
    // SAFETY: the token proves SSE4.2.
    unsafe { hwcrc1_sse42(self, crc, data) }
  }

  /// `crc32q` over 8-byte words, `crc32b` for the tail.
  #[inline]
  #[must_use]
  pub fn hwcrc8(self, crc: u32, data: &[u8]) -> u32 {
    // SAFETY: the token proves SSE4.2.
    unsafe { hwcrc8_sse42(self, crc, data) }
  }

  pub(crate) const fn name(self, wide: bool) -> &'static str {
    if wide { "x86_64/hwcrc8" } else { "x86_64/hwcrc1" }
  }
}

impl Sse42Pclmul {
  pub(crate) fn for_polynomial(poly: Polynomial) -> Result<Self, EngineError> {
    check_polynomial(poly)?;
    Self::detect().ok_or(EngineError::MissingCapability {
      backend: "x86_64/fold",
    })
  }

  /// Parallel-fold engine with hardware accumulate and carry-less multiply.
  #[inline]
  #[must_use]
  pub fn compute(self, table: &FoldTable, params: FoldParams, crc: u32, data: &[u8]) -> u32 {
    // SAFETY: the token proves SSE4.2 and PCLMULQDQ.
    unsafe { fold_sse42_pclmul(self, table, params, crc, data) }
  }

  pub(crate) const fn name(self, params: FoldParams) -> &'static str {
    match params.lanes() {
      fold::Lanes::Two => "x86_64/fold-2way",
      fold::Lanes::Three => "x86_64/fold-3way",
    }
  }
}
