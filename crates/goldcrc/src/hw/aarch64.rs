//! aarch64 CRC capability tokens (ARMv8 CRC extension, PMULL).
//!
//! The CRC extension implements both polynomials: `crc32c*` (Castagnoli) and
//! `crc32*` (IEEE). PMULL ships with the `aes` feature.
//!
//! # Safety
//!
//! Uses `unsafe` for ARM intrinsics. Tokens are only handed out after
//! [`platform::caps`] reports the features they wrap.
#![allow(unsafe_code)]

use core::arch::aarch64::*;

use platform::caps::aarch64;

use super::{CrcHardware, crc_hw_1byte, crc_hw_8byte};
use crate::{
  error::EngineError,
  fold::{self, FoldParams, Lanes},
  polynomial::Polynomial,
  tables::FoldTable,
};

// ─────────────────────────────────────────────────────────────────────────────
// Tokens
// ─────────────────────────────────────────────────────────────────────────────

/// Proof that `crc32c*` is available.
#[derive(Clone, Copy, Debug)]
pub struct CrcC(());

/// Proof that `crc32*` (IEEE) is available.
#[derive(Clone, Copy, Debug)]
pub struct CrcIeee(());

/// Proof that `crc32c*` and PMULL are available.
#[derive(Clone, Copy, Debug)]
pub struct CrcCPmull(());

/// Proof that `crc32*` and PMULL are available.
#[derive(Clone, Copy, Debug)]
pub struct CrcIeeePmull(());

macro_rules! token {
  ($ty:ident, $caps:expr, $name:literal, $poly:expr, $b:ident, $d:ident, pmull: $pmull:tt) => {
    impl $ty {
      /// Returns the token if the CPU reports the required features.
      #[must_use]
      pub fn detect() -> Option<Self> {
        platform::caps().has($caps).then_some(Self(()))
      }
    }

    impl CrcHardware for $ty {
      const NAME: &'static str = $name;

      #[inline(always)]
      fn polynomial(self) -> Polynomial {
        $poly
      }

      #[inline(always)]
      fn accumulate8(self, crc: u32, byte: u8) -> u32 {
        // SAFETY: the token exists only when the CRC extension was detected.
        unsafe { $b(crc, byte) }
      }

      #[inline(always)]
      fn accumulate64(self, crc: u32, word: u64) -> u32 {
        // SAFETY: the token exists only when the CRC extension was detected.
        unsafe { $d(crc, word) }
      }

      token!(@clmul $pmull);
    }
  };
  (@clmul true) => {
    #[inline(always)]
    fn clmul64(self, a: u64, b: u64) -> u128 {
      // SAFETY: the token exists only when PMULL was detected.
      unsafe { vmull_p64(a, b) }
    }
  };
  (@clmul false) => {};
}

token!(CrcC, aarch64::CRC_READY, "aarch64/crc32c", Polynomial::CASTAGNOLI, __crc32cb, __crc32cd, pmull: false);
token!(CrcIeee, aarch64::CRC_READY, "aarch64/crc32", Polynomial::IEEE, __crc32b, __crc32d, pmull: false);
token!(CrcCPmull, aarch64::FOLD_READY, "aarch64/crc32c+pmull", Polynomial::CASTAGNOLI, __crc32cb, __crc32cd, pmull: true);
token!(CrcIeeePmull, aarch64::FOLD_READY, "aarch64/crc32+pmull", Polynomial::IEEE, __crc32b, __crc32d, pmull: true);

// ─────────────────────────────────────────────────────────────────────────────
// Feature-enabled entry points
// ─────────────────────────────────────────────────────────────────────────────

#[target_feature(enable = "crc")]
unsafe fn hwcrc1_crc<H: CrcHardware>(hw: H, crc: u32, data: &[u8]) -> u32 {
  crc_hw_1byte(hw, crc, data)
}

#[target_feature(enable = "crc")]
unsafe fn hwcrc8_crc<H: CrcHardware>(hw: H, crc: u32, data: &[u8]) -> u32 {
  crc_hw_8byte(hw, crc, data)
}

#[target_feature(enable = "crc", enable = "aes")]
unsafe fn fold_crc_pmull<H: CrcHardware>(hw: H, table: &FoldTable, params: FoldParams, crc: u32, data: &[u8]) -> u32 {
  fold::compute(hw, table, params, crc, data)
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine adapters
// ─────────────────────────────────────────────────────────────────────────────

/// Accumulate-only capability for one of the two hardwired polynomials.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Native {
  Castagnoli(CrcC),
  Ieee(CrcIeee),
}

/// Accumulate + PMULL capability for one of the two hardwired polynomials.
#[derive(Clone, Copy, Debug)]
pub(crate) enum NativeFold {
  Castagnoli(CrcCPmull),
  Ieee(CrcIeeePmull),
}

const fn mismatch(poly: Polynomial) -> EngineError {
  EngineError::PolynomialMismatch {
    requested: poly,
    hardware: Polynomial::CASTAGNOLI,
  }
}

const MISSING_CRC: EngineError = EngineError::MissingCapability { backend: "aarch64/hwcrc" };
const MISSING_FOLD: EngineError = EngineError::MissingCapability { backend: "aarch64/fold" };

impl Native {
  pub(crate) fn for_polynomial(poly: Polynomial) -> Result<Self, EngineError> {
    match poly {
      Polynomial::CASTAGNOLI => CrcC::detect().map(Self::Castagnoli).ok_or(MISSING_CRC),
      Polynomial::IEEE => CrcIeee::detect().map(Self::Ieee).ok_or(MISSING_CRC),
      other => Err(mismatch(other)),
    }
  }

  pub(crate) fn hwcrc1(self, crc: u32, data: &[u8]) -> u32 {
    // SAFETY: each variant's token proves the CRC extension.
    unsafe {
      match self {
        Self::Castagnoli(hw) => hwcrc1_crc(hw, crc, data),
        Self::Ieee(hw) => hwcrc1_crc(hw, crc, data),
      }
    }
  }

  pub(crate) fn hwcrc8(self, crc: u32, data: &[u8]) -> u32 {
    // SAFETY: each variant's token proves the CRC extension.
    unsafe {
      match self {
        Self::Castagnoli(hw) => hwcrc8_crc(hw, crc, data),
        Self::Ieee(hw) => hwcrc8_crc(hw, crc, data),
      }
    }
  }

  pub(crate) const fn name(self, wide: bool) -> &'static str {
    if wide { "aarch64/hwcrc8" } else { "aarch64/hwcrc1" }
  }
}

impl NativeFold {
  pub(crate) fn for_polynomial(poly: Polynomial) -> Result<Self, EngineError> {
    match poly {
      Polynomial::CASTAGNOLI => CrcCPmull::detect().map(Self::Castagnoli).ok_or(MISSING_FOLD),
      Polynomial::IEEE => CrcIeeePmull::detect().map(Self::Ieee).ok_or(MISSING_FOLD),
      other => Err(mismatch(other)),
    }
  }

  pub(crate) fn compute(self, table: &FoldTable, params: FoldParams, crc: u32, data: &[u8]) -> u32 {
    // SAFETY: each variant's token proves the CRC extension and PMULL.
    unsafe {
      match self {
        Self::Castagnoli(hw) => fold_crc_pmull(hw, table, params, crc, data),
        Self::Ieee(hw) => fold_crc_pmull(hw, table, params, crc, data),
      }
    }
  }

  pub(crate) const fn name(self, params: FoldParams) -> &'static str {
    match params.lanes() {
      Lanes::Two => "aarch64/fold-2way",
      Lanes::Three => "aarch64/fold-3way",
    }
  }
}
