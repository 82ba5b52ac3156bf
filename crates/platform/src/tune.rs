//! Microarchitecture-derived tuning hints.
//!
//! `Tune` answers: "What should I *prefer* on this machine?"
//!
//! Unlike [`Caps`](crate::Caps) (which describes what's *possible*), `Tune`
//! describes how the parallel-fold CRC engine should be shaped:
//!
//! - how many independent lanes keep the CRC-accumulate unit saturated
//! - the minimum remaining length for which a fold round pays for its
//!   recombination
//!
//! # Lane Count
//!
//! A hardware CRC-accumulate instruction with latency `λ` and reciprocal
//! throughput `τ` can have `⌈λ/τ⌉` independent invocations in flight. On
//! big out-of-order x86 cores `crc32q` is 3 cycles latency / 1 per cycle
//! throughput, so three lanes. Cores that issue fewer of them per cycle (or
//! whose recombination is relatively more expensive) do best with two.

// ─────────────────────────────────────────────────────────────────────────────
// TuneKind: Identity discriminant for O(1) name lookup
// ─────────────────────────────────────────────────────────────────────────────

/// Identifies which tuning preset is in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TuneKind {
  Custom = 0,
  Default,
  Portable,
  Intel,
  Amd,
  Aarch64,
}

impl TuneKind {
  /// Returns the human-readable name for this tuning preset.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Custom => "Custom",
      Self::Default => "Default",
      Self::Portable => "Portable",
      Self::Intel => "Intel",
      Self::Amd => "AMD",
      Self::Aarch64 => "AArch64",
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tune
// ─────────────────────────────────────────────────────────────────────────────

/// Smallest lane count the fold engine implements.
pub const MIN_FOLD_LANES: u8 = 2;
/// Largest lane count the fold engine implements.
pub const MAX_FOLD_LANES: u8 = 3;

/// Microarchitecture-derived tuning hints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tune {
  /// Which preset this tuning came from.
  pub(crate) kind: TuneKind,
  /// Number of independent lanes per fold round (2 or 3).
  pub fold_lanes: u8,
  /// Minimum remaining bytes for which a fold round is entered.
  ///
  /// Smaller values spend proportionally more time in the per-round
  /// carry-less multiply and extra accumulate; larger values push more data
  /// into the sequential tail.
  pub fold_leaf_bytes: usize,
}

impl Tune {
  /// Conservative defaults for unknown CPUs.
  pub const DEFAULT: Self = Self {
    kind: TuneKind::Default,
    fold_lanes: 3,
    fold_leaf_bytes: 7 * 24,
  };

  /// No hardware primitives; the fold engine only runs emulated.
  pub const PORTABLE: Self = Self {
    kind: TuneKind::Portable,
    fold_lanes: 2,
    fold_leaf_bytes: 7 * 16,
  };

  /// Intel cores: `crc32q` 3c latency, 1/c throughput.
  pub const INTEL: Self = Self {
    kind: TuneKind::Intel,
    fold_lanes: 3,
    fold_leaf_bytes: 7 * 24,
  };

  /// AMD cores: two lanes with a 112-byte leaf measured fastest.
  pub const AMD: Self = Self {
    kind: TuneKind::Amd,
    fold_lanes: 2,
    fold_leaf_bytes: 7 * 16,
  };

  /// ARMv8 cores with the CRC extension.
  pub const AARCH64: Self = Self {
    kind: TuneKind::Aarch64,
    fold_lanes: 3,
    fold_leaf_bytes: 7 * 24,
  };

  /// Build a custom tuning from explicit knobs.
  ///
  /// `lanes` is clamped into the supported range.
  #[inline]
  #[must_use]
  pub const fn custom(lanes: u8, leaf_bytes: usize) -> Self {
    Self {
      kind: TuneKind::Custom,
      fold_lanes: clamp_lanes(lanes),
      fold_leaf_bytes: leaf_bytes,
    }
  }

  /// Lane count that saturates an accumulate unit with the given timing.
  ///
  /// Returns `⌈latency / reciprocal_throughput⌉`, clamped into
  /// `MIN_FOLD_LANES..=MAX_FOLD_LANES`.
  #[inline]
  #[must_use]
  pub const fn lanes_for(latency: u32, reciprocal_throughput: u32) -> u8 {
    if reciprocal_throughput == 0 {
      return MAX_FOLD_LANES;
    }
    let lanes = latency.div_ceil(reciprocal_throughput);
    if lanes > MAX_FOLD_LANES as u32 { MAX_FOLD_LANES } else { clamp_lanes(lanes as u8) }
  }

  /// Which preset this tuning came from.
  #[inline]
  #[must_use]
  pub const fn kind(self) -> TuneKind {
    self.kind
  }

  /// Human-readable preset name.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    self.kind.name()
  }
}

impl Default for Tune {
  #[inline]
  fn default() -> Self {
    Self::DEFAULT
  }
}

const fn clamp_lanes(lanes: u8) -> u8 {
  if lanes < MIN_FOLD_LANES {
    MIN_FOLD_LANES
  } else if lanes > MAX_FOLD_LANES {
    MAX_FOLD_LANES
  } else {
    lanes
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn presets_use_supported_lane_counts() {
    for t in [Tune::DEFAULT, Tune::PORTABLE, Tune::INTEL, Tune::AMD, Tune::AARCH64] {
      assert!((MIN_FOLD_LANES..=MAX_FOLD_LANES).contains(&t.fold_lanes), "{}", t.name());
      assert_eq!(t.fold_leaf_bytes % (8 * t.fold_lanes as usize), 0, "{}", t.name());
    }
  }

  #[test]
  fn lanes_for_is_ceil_ratio() {
    assert_eq!(Tune::lanes_for(3, 1), 3);
    assert_eq!(Tune::lanes_for(3, 2), 2);
    assert_eq!(Tune::lanes_for(2, 1), 2);
    assert_eq!(Tune::lanes_for(1, 1), MIN_FOLD_LANES);
    assert_eq!(Tune::lanes_for(7, 1), MAX_FOLD_LANES);
    assert_eq!(Tune::lanes_for(3, 0), MAX_FOLD_LANES);
  }

  #[test]
  fn custom_clamps_lanes() {
    assert_eq!(Tune::custom(0, 64).fold_lanes, 2);
    assert_eq!(Tune::custom(9, 64).fold_lanes, 3);
    assert_eq!(Tune::custom(2, 64).kind(), TuneKind::Custom);
  }

  #[test]
  fn names() {
    assert_eq!(Tune::AMD.name(), "AMD");
    assert_eq!(Tune::default().name(), "Default");
  }
}
