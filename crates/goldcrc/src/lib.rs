//! CRC-32 engines, from the one-bit-per-step reference to a parallel fold
//! over hardware CRC instructions.
//!
//! # Engines
//!
//! | Backend | Per step | Needs |
//! |---------|----------|-------|
//! | [`Backend::Bitwise`] | 1 bit | nothing |
//! | [`Backend::Table`] | 1–16 bytes | 1–16 KiB of tables |
//! | [`Backend::Hwcrc1`] / [`Backend::Hwcrc8`] | 1 / 8 bytes | SSE4.2 `crc32` or ARMv8 CRC |
//! | [`Backend::Fold`] | 2–3 lanes × 8 bytes | CRC unit + PCLMULQDQ / PMULL |
//! | [`Backend::EmulatedFold`] | 2–3 lanes × 8 bytes | tables (any polynomial) |
//!
//! Every backend computes the same reflected CRC-32 register for the same
//! polynomial, message and initial value.
//!
//! # Example
//!
//! ```rust
//! use goldcrc::{Checksum, ChecksumCombine, Crc32c, Polynomial};
//!
//! // Inverted convention (published check values)
//! assert_eq!(Crc32c::checksum(b"123456789"), 0xE306_9283);
//!
//! // Raw register, any polynomial
//! let raw = goldcrc::compute_crc32(b"123456789", 0, Polynomial::CASTAGNOLI);
//! assert_eq!(raw, 0x58E3_FA20);
//!
//! // Parallel combine
//! let (a, b) = b"123456789".split_at(4);
//! let crc = Crc32c::combine(Crc32c::checksum(a), Crc32c::checksum(b), b.len());
//! assert_eq!(crc, 0xE306_9283);
//! ```
//!
//! # Choosing an engine explicitly
//!
//! ```rust
//! use goldcrc::{Backend, Engine, Lanes, tables::CASTAGNOLI_TABLES};
//!
//! let engine = Engine::with_backend(&CASTAGNOLI_TABLES, Backend::EmulatedFold)?.with_lanes(Lanes::Two);
//! assert_eq!(engine.compute_inverted(b"123456789", 0), 0xE306_9283);
//! # Ok::<(), goldcrc::EngineError>(())
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Without the `std` feature only
//! compile-time CPU features are used and environment overrides are ignored:
//!
//! ```toml
//! [dependencies]
//! goldcrc = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod bitwise;
pub mod config;
mod crc32c;
mod engine;
mod error;
pub mod fold;
pub mod gf2;
pub mod hw;
mod polynomial;
pub mod portable;
pub mod tables;

#[cfg(test)]
mod proptests;

pub use crc32c::{Crc32, Crc32c};
pub use engine::{Backend, Engine, Invert};
pub use error::EngineError;
pub use fold::{FoldParams, Lanes};
pub use polynomial::Polynomial;
pub use portable::Slice;
pub use tables::Crc32Tables;
// Re-export traits for convenience
pub use traits::{Checksum, ChecksumCombine};

/// Raw CRC-32 register of `message` from `prev`, for any polynomial.
///
/// No conditioning is applied; wrap with `!` on both sides for the
/// published convention. Built-in polynomials run on the auto-selected
/// engine; any other polynomial runs bit-serially (build a
/// [`Crc32Tables`] and an [`Engine`] for repeated use).
#[inline]
#[must_use]
pub fn compute_crc32(message: &[u8], prev: u32, polynomial: Polynomial) -> u32 {
  match polynomial {
    Polynomial::CASTAGNOLI => crc32c::castagnoli_engine().compute(message, prev),
    Polynomial::IEEE => crc32c::ieee_engine().compute(message, prev),
    custom => bitwise::compute(custom, prev, message),
  }
}

/// [`compute_crc32`] with the Castagnoli polynomial.
#[inline]
#[must_use]
pub fn compute_crc32c(message: &[u8], prev: u32) -> u32 {
  crc32c::castagnoli_engine().compute(message, prev)
}

/// Returns the CRC-32C backend this process uses on the current machine.
///
/// This is intended for diagnostics and benchmarking.
#[doc(hidden)]
#[inline]
#[must_use]
pub fn selected_backend() -> &'static str {
  crc32c::castagnoli_engine().backend_name()
}
