//! Runtime CPU detection.
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (via `is_*_feature_detected!`, `std` only)
//! - Caching (via `OnceLock`, `std` only)
//! - Miri fallback (always returns portable caps)

use crate::{
  caps::{Arch, Caps},
  tune::Tune,
};

/// Get detected capabilities and tuning hints (cached with `std`).
#[inline]
pub(crate) fn get() -> (Caps, Tune) {
  #[cfg(miri)]
  {
    (Caps::NONE, Tune::PORTABLE)
  }

  #[cfg(all(not(miri), feature = "std"))]
  {
    use std::sync::OnceLock;
    static CACHED: OnceLock<(Caps, Tune)> = OnceLock::new();
    *CACHED.get_or_init(detect_uncached)
  }

  #[cfg(all(not(miri), not(feature = "std")))]
  {
    detect_uncached()
  }
}

/// Run detection without consulting the cache.
///
/// Intended for diagnostics and tests; dispatch should use [`crate::get`].
#[must_use]
pub fn detect_uncached() -> (Caps, Tune) {
  let caps = caps_static().union(caps_runtime());
  (caps, tune_for(Arch::current(), caps))
}

// ─────────────────────────────────────────────────────────────────────────────
// Compile-time detection
// ─────────────────────────────────────────────────────────────────────────────

fn caps_static() -> Caps {
  #[allow(unused_mut)]
  let mut caps = Caps::NONE;

  #[cfg(target_arch = "x86_64")]
  {
    use crate::caps::x86;
    if cfg!(target_feature = "sse4.2") {
      caps |= x86::SSE42;
    }
    if cfg!(target_feature = "pclmulqdq") {
      caps |= x86::PCLMULQDQ;
    }
  }

  #[cfg(target_arch = "aarch64")]
  {
    use crate::caps::aarch64;
    if cfg!(target_feature = "crc") {
      caps |= aarch64::CRC;
    }
    if cfg!(target_feature = "aes") {
      caps |= aarch64::PMULL;
    }
  }

  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime detection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(feature = "std", target_arch = "x86_64"))]
fn caps_runtime() -> Caps {
  use crate::caps::x86;

  let mut caps = Caps::NONE;
  if std::arch::is_x86_feature_detected!("sse4.2") {
    caps |= x86::SSE42;
  }
  if std::arch::is_x86_feature_detected!("pclmulqdq") {
    caps |= x86::PCLMULQDQ;
  }
  caps
}

#[cfg(all(feature = "std", target_arch = "aarch64"))]
fn caps_runtime() -> Caps {
  use crate::caps::aarch64;

  let mut caps = Caps::NONE;
  if std::arch::is_aarch64_feature_detected!("crc") {
    caps |= aarch64::CRC;
  }
  if std::arch::is_aarch64_feature_detected!("aes") {
    caps |= aarch64::PMULL;
  }
  caps
}

#[cfg(not(all(feature = "std", any(target_arch = "x86_64", target_arch = "aarch64"))))]
fn caps_runtime() -> Caps {
  Caps::NONE
}

// ─────────────────────────────────────────────────────────────────────────────
// Tuning selection
// ─────────────────────────────────────────────────────────────────────────────

fn tune_for(arch: Arch, caps: Caps) -> Tune {
  match arch {
    Arch::X86_64 if caps.has(crate::caps::x86::CRC32C_READY) => x86_tune(),
    Arch::Aarch64 if caps.has(crate::caps::aarch64::CRC_READY) => Tune::AARCH64,
    _ => Tune::PORTABLE,
  }
}

#[cfg(target_arch = "x86_64")]
fn x86_tune() -> Tune {
  crate::x86_64::Vendor::detect().tune()
}

#[cfg(not(target_arch = "x86_64"))]
fn x86_tune() -> Tune {
  Tune::DEFAULT
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tune::TuneKind;

  #[test]
  fn no_hardware_means_portable_tune() {
    assert_eq!(tune_for(Arch::Other, Caps::NONE).kind(), TuneKind::Portable);
    assert_eq!(tune_for(Arch::X86_64, Caps::NONE).kind(), TuneKind::Portable);
    assert_eq!(tune_for(Arch::Aarch64, Caps::NONE).kind(), TuneKind::Portable);
  }

  #[test]
  fn aarch64_crc_selects_aarch64_tune() {
    let t = tune_for(Arch::Aarch64, crate::caps::aarch64::CRC);
    assert_eq!(t.kind(), TuneKind::Aarch64);
  }

  #[test]
  fn static_caps_are_subset_of_detected() {
    let (caps, _) = detect_uncached();
    assert!(caps.has(caps_static()));
  }

  #[test]
  #[cfg(feature = "std")]
  fn cached_matches_uncached() {
    assert_eq!(get(), detect_uncached());
  }

  #[test]
  fn only_native_bits_reported() {
    let (caps, _) = detect_uncached();
    match Arch::current() {
      Arch::X86_64 => assert!(caps.difference(crate::caps::x86::FOLD_READY).is_empty()),
      Arch::Aarch64 => assert!(caps.difference(crate::caps::aarch64::FOLD_READY).is_empty()),
      Arch::Other => assert!(caps.is_empty()),
    }
  }
}
