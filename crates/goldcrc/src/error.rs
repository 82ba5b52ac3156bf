//! Engine construction errors.
//!
//! Computing a CRC never fails; only choosing an engine can.

use core::fmt;

use crate::polynomial::Polynomial;

/// Why a requested engine configuration cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum EngineError {
  /// The backend needs CPU features this machine does not report.
  MissingCapability {
    /// Backend that was requested.
    backend: &'static str,
  },
  /// The hardware CRC instruction is hardwired to a different polynomial.
  PolynomialMismatch {
    /// Polynomial of the table bundle.
    requested: Polynomial,
    /// Polynomial the instruction implements.
    hardware: Polynomial,
  },
  /// Slice width not in {1, 2, 4, 8, 16}.
  InvalidWidth(usize),
}

impl fmt::Display for EngineError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MissingCapability { backend } => write!(f, "backend {backend} is not supported on this CPU"),
      Self::PolynomialMismatch { requested, hardware } => write!(
        f,
        "hardware CRC implements {:#010x}, tables are for {:#010x}",
        hardware.reflected(),
        requested.reflected()
      ),
      Self::InvalidWidth(w) => write!(f, "unsupported slice width {w} (expected 1, 2, 4, 8 or 16)"),
    }
  }
}

impl core::error::Error for EngineError {}
