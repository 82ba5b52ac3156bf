//! Parallel-fold CRC ("Golden"): L independent accumulate lanes per round,
//! recombined with one carry-less multiply per non-final lane.
//!
//! A single accumulate instruction has a latency of several cycles but can
//! issue every cycle, so one serial dependency chain leaves the unit mostly
//! idle. Splitting each round into L contiguous blocks keeps L chains in
//! flight; the partial CRCs are then moved to their true message positions
//! with [`FoldTable`] multipliers.
//!
//! # Round structure
//!
//! With `n` words per lane and lanes `0..L` covering consecutive `8n`-byte
//! blocks:
//!
//! ```text
//! crcs[0] = running crc, crcs[1..] = 0
//! for i in 0..n-1:  crcs[l] = acc64(crcs[l], lane_l[i])      (all lanes)
//! for l in 0..L-1:  crcs[l] = acc64(crcs[l], lane_l[n-1])    (lane L-1 holds its last word back)
//! combined = lane_{L-1}[n-1] ^ Σ_l clmul(crcs[l], adv_{L-1-l}(n))
//! crc      = acc64(crcs[L-1], combined)
//! ```
//!
//! Folding the repositioned lanes into the last lane's final word costs one
//! accumulate instead of a separate 64→32 reduction.

// SAFETY: Lane word indices are `l·n + i` with `l < L` and `i < n`, and every round's
// block holds exactly `L·n` words. FoldTable lookups use `1 ≤ j·n ≤ 2·FOLD_CAP`.
#![allow(clippy::indexing_slicing)]

use platform::Tune;

use crate::{
  hw::{CrcHardware, crc_hw_1byte, crc_hw_8byte},
  tables::{FOLD_CAP, FoldTable},
};

/// Number of independent lanes per fold round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lanes {
  Two,
  Three,
}

impl Lanes {
  /// Lane count from an integer; `None` unless 2 or 3.
  #[inline]
  #[must_use]
  pub const fn from_count(count: u8) -> Option<Self> {
    match count {
      2 => Some(Self::Two),
      3 => Some(Self::Three),
      _ => None,
    }
  }

  #[inline]
  #[must_use]
  pub const fn count(self) -> usize {
    match self {
      Self::Two => 2,
      Self::Three => 3,
    }
  }
}

/// Shape of a fold computation: lane count and leaf size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FoldParams {
  lanes: Lanes,
  leaf_bytes: usize,
}

impl FoldParams {
  /// Build parameters, normalizing `leaf_bytes` down to a multiple of
  /// `8 · lanes` with a floor of one word per lane.
  #[must_use]
  pub const fn new(lanes: Lanes, leaf_bytes: usize) -> Self {
    let stride = 8 * lanes.count();
    let leaf = leaf_bytes - leaf_bytes % stride;
    Self {
      lanes,
      leaf_bytes: if leaf < stride { stride } else { leaf },
    }
  }

  /// Parameters for a tuning preset.
  #[must_use]
  pub const fn from_tune(tune: Tune) -> Self {
    let lanes = match Lanes::from_count(tune.fold_lanes) {
      Some(l) => l,
      None => Lanes::Three,
    };
    Self::new(lanes, tune.fold_leaf_bytes)
  }

  #[inline]
  #[must_use]
  pub const fn lanes(self) -> Lanes {
    self.lanes
  }

  /// Minimum remaining length for which a round is entered.
  #[inline]
  #[must_use]
  pub const fn leaf_bytes(self) -> usize {
    self.leaf_bytes
  }

  /// Kernel name, e.g. `"fold-3way"`.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self.lanes {
      Lanes::Two => "fold-2way",
      Lanes::Three => "fold-3way",
    }
  }
}

impl Default for FoldParams {
  fn default() -> Self {
    Self::from_tune(Tune::DEFAULT)
  }
}

/// Run the fold engine from raw register `crc` over `data`.
///
/// `fold` must have been generated for `hw.polynomial()`.
#[inline]
pub fn compute<H: CrcHardware>(hw: H, fold: &FoldTable, params: FoldParams, mut crc: u32, data: &[u8]) -> u32 {
  let head = data.as_ptr().align_offset(8).min(data.len());
  let (head, mut rest) = data.split_at(head);
  crc = crc_hw_1byte(hw, crc, head);

  let lanes = params.lanes.count();
  while rest.len() >= params.leaf_bytes {
    let n = (rest.len() / (8 * lanes)).min(FOLD_CAP);
    let (block, tail) = rest.split_at(8 * lanes * n);
    crc = match params.lanes {
      Lanes::Two => round::<H, 2>(hw, fold, crc, block, n),
      Lanes::Three => round::<H, 3>(hw, fold, crc, block, n),
    };
    rest = tail;
  }

  crc_hw_8byte(hw, crc, rest)
}

/// One round over exactly `L · n` words.
#[inline(always)]
fn round<H: CrcHardware, const L: usize>(hw: H, fold: &FoldTable, crc: u32, block: &[u8], n: usize) -> u32 {
  let (words, _) = block.as_chunks::<8>();
  let word = |l: usize, i: usize| u64::from_le_bytes(words[l * n + i]);

  let mut crcs = [0u32; L];
  crcs[0] = crc;

  for i in 0..n - 1 {
    for (l, c) in crcs.iter_mut().enumerate() {
      *c = hw.accumulate64(*c, word(l, i));
    }
  }

  let mut combined = word(L - 1, n - 1);
  for l in 0..L - 1 {
    let c = hw.accumulate64(crcs[l], word(l, n - 1));
    combined ^= hw.clmul64(c as u64, fold.adv(L - 1 - l, n) as u64) as u64;
  }

  hw.accumulate64(crcs[L - 1], combined)
}
