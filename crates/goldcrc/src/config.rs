//! Runtime configuration (backend override + fold shape).
//!
//! This module centralizes the knobs that steer [`Engine::new`](crate::Engine::new):
//! - optional forced backend selection
//! - fold lane count and leaf size
//!
//! Environment overrides (read once, `std` only):
//!
//! | Variable | Values |
//! |----------|--------|
//! | `GOLDCRC_FORCE` | `auto`, `bitwise`, `table`, `hwcrc`, `fold` |
//! | `GOLDCRC_FOLD_LANES` | `2`, `3` |
//! | `GOLDCRC_FOLD_LEAF_BYTES` | any byte count; normalized to a multiple of `8 · lanes` |
//!
//! Safety note: forced modes are always clamped to detected CPU capabilities.

use platform::{Caps, Tune};

use crate::fold::{FoldParams, Lanes};

/// Forced backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Crc32Force {
  /// Use the default auto selector.
  #[default]
  Auto,
  /// Force the bit-serial reference engine.
  Bitwise,
  /// Force the slice-by-16 table engine.
  Table,
  /// Force hardware CRC instructions, 8 bytes at a time (if available).
  Hwcrc,
  /// Force the parallel-fold engine on hardware (if available).
  Fold,
}

impl Crc32Force {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Bitwise => "bitwise",
      Self::Table => "table",
      Self::Hwcrc => "hwcrc",
      Self::Fold => "fold",
    }
  }

  /// Parse a force name (case-insensitive, with a few aliases).
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    let is = |name: &str| value.eq_ignore_ascii_case(name);

    if is("auto") {
      Some(Self::Auto)
    } else if is("bitwise") || is("naive") || is("reference") {
      Some(Self::Bitwise)
    } else if is("table") || is("portable") || is("slice16") {
      Some(Self::Table)
    } else if is("hwcrc") || is("crc") || is("hw") {
      Some(Self::Hwcrc)
    } else if is("fold") || is("golden") {
      Some(Self::Fold)
    } else {
      None
    }
  }
}

/// Fold-engine shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoldTunables {
  /// Independent lanes per round.
  pub lanes: Lanes,
  /// Minimum remaining bytes for a round (already normalized).
  pub leaf_bytes: usize,
}

impl FoldTunables {
  #[inline]
  #[must_use]
  pub const fn params(self) -> FoldParams {
    FoldParams::new(self.lanes, self.leaf_bytes)
  }
}

/// Full runtime configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crc32Config {
  /// Requested force mode (env/programmatic).
  pub requested_force: Crc32Force,
  /// Force mode clamped to detected CPU capabilities.
  pub effective_force: Crc32Force,
  /// Fold shape used by fold backends.
  pub fold: FoldTunables,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Overrides {
  force: Crc32Force,
  lanes: Option<Lanes>,
  leaf_bytes: Option<usize>,
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  fn var(name: &str) -> Option<std::string::String> {
    let value = std::env::var(name).ok()?;
    if value.trim().is_empty() { None } else { Some(value) }
  }

  Overrides {
    force: var("GOLDCRC_FORCE").and_then(|v| Crc32Force::parse(&v)).unwrap_or_default(),
    lanes: var("GOLDCRC_FOLD_LANES")
      .and_then(|v| v.trim().parse::<u8>().ok())
      .and_then(Lanes::from_count),
    leaf_bytes: var("GOLDCRC_FOLD_LEAF_BYTES").and_then(|v| v.trim().parse::<usize>().ok()),
  }
}

#[cfg(feature = "std")]
fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_overrides)
}

#[cfg(not(feature = "std"))]
fn overrides() -> Overrides {
  Overrides::default()
}

#[inline]
#[must_use]
#[allow(unused_variables)] // `caps` only used on x86_64/aarch64
fn clamp_force_to_caps(requested: Crc32Force, caps: Caps) -> Crc32Force {
  #[cfg(target_arch = "x86_64")]
  let (crc, fold) = (
    caps.has(platform::caps::x86::CRC32C_READY),
    caps.has(platform::caps::x86::FOLD_READY),
  );
  #[cfg(target_arch = "aarch64")]
  let (crc, fold) = (
    caps.has(platform::caps::aarch64::CRC_READY),
    caps.has(platform::caps::aarch64::FOLD_READY),
  );
  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  let (crc, fold) = (false, false);

  match requested {
    Crc32Force::Auto | Crc32Force::Bitwise | Crc32Force::Table => requested,
    Crc32Force::Hwcrc if crc => requested,
    Crc32Force::Fold if fold => requested,
    Crc32Force::Hwcrc | Crc32Force::Fold => Crc32Force::Auto,
  }
}

fn resolve(caps: Caps, tune: Tune, ov: Overrides) -> Crc32Config {
  let base = FoldParams::from_tune(tune);
  let lanes = ov.lanes.unwrap_or(base.lanes());
  let leaf = ov.leaf_bytes.unwrap_or(tune.fold_leaf_bytes);
  let params = FoldParams::new(lanes, leaf);

  Crc32Config {
    requested_force: ov.force,
    effective_force: clamp_force_to_caps(ov.force, caps),
    fold: FoldTunables {
      lanes: params.lanes(),
      leaf_bytes: params.leaf_bytes(),
    },
  }
}

/// Get the effective configuration for the current platform.
#[inline]
#[must_use]
pub fn get() -> Crc32Config {
  let (caps, tune) = platform::get();
  resolve(caps, tune, overrides())
}
