//! CPU detection, capabilities, and tuning for goldcrc.
//!
//! This crate is the **single source of truth** for deciding which CRC
//! primitives a machine offers and how the parallel-fold engine should be
//! shaped on it.
//!
//! # Core Types
//!
//! - [`Caps`]: What instructions can run on this machine (capabilities)
//! - [`Tune`]: What strategies are optimal on this machine (tuning hints)
//!
//! # Main Entry Point
//!
//! ```ignore
//! let (caps, tune) = platform::get();
//!
//! if caps.has(platform::caps::x86::FOLD_READY) {
//!     // crc32 + pclmulqdq: parallel fold with `tune.fold_lanes` lanes
//! }
//! ```
//!
//! # Design Philosophy
//!
//! 1. **One API**: Algorithms query `platform::get()` instead of doing ad-hoc detection.
//! 2. **Capabilities vs Tuning**: `Caps` says what's *possible*; `Tune` says what's *optimal*.
//! 3. **Zero-cost when possible**: Compile-time features are detected via `cfg!`.
//! 4. **Cached otherwise**: Runtime detection is cached in a `OnceLock` (std).
//! 5. **Miri-safe**: Under Miri, always returns portable-only caps.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

pub mod caps;
mod detect;
pub mod tune;

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

pub use caps::{Arch, Caps};
pub use detect::detect_uncached;
pub use tune::{Tune, TuneKind};

/// Get detected CPU capabilities and tuning hints.
///
/// # Caching
///
/// - With `std`: Results are cached in a `OnceLock` (one-time detection).
/// - Without `std`: Only compile-time features are reported; nothing to cache.
#[inline]
#[must_use]
pub fn get() -> (Caps, Tune) {
  detect::get()
}

/// Get just the CPU capabilities.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::get().0
}

/// Get just the tuning hints.
#[inline]
#[must_use]
pub fn tune() -> Tune {
  detect::get().1
}
