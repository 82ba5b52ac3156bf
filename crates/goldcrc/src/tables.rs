//! Const-fn lookup table generation.
//!
//! Two kinds of table are derived from a polynomial, both bootstrapped from
//! the bit-serial engine so they are correct by construction:
//!
//! | Table | Shape | Entry |
//! |-------|-------|-------|
//! | [`ByteTables`] | 16×256×u32 | `T_k[x]` = register after byte `x` then `k` zero bytes |
//! | [`FoldTable`] | 256×u32 | `x^(31 + 64·i) mod P`, the lane-repositioning multipliers |
//!
//! The built-in polynomials are evaluated at compile time into
//! [`CASTAGNOLI_TABLES`] and [`IEEE_TABLES`]. Custom polynomials build a
//! [`Crc32Tables`] once at runtime and share it by reference.

// SAFETY: All array indexing in this module uses bounded loop indices (0..256, 0..16,
// 0..2·FOLD_CAP) or is guarded by an explicit range check. Clippy cannot prove this in
// const fn contexts, but bounds are statically guaranteed.
#![allow(clippy::indexing_slicing)]

use crate::{bitwise, polynomial::Polynomial};

/// Number of byte tables (slice-by-16 is the widest tabular engine).
pub const SLICES: usize = 16;

/// Largest per-lane block count (in 8-byte words) a single fold round can use.
pub const FOLD_CAP: usize = 128;

// ─────────────────────────────────────────────────────────────────────────────
// Byte tables
// ─────────────────────────────────────────────────────────────────────────────

/// Slice-by-N lookup tables.
///
/// `T_0[x]` is one bit-serial byte step of `x` from a zero register. Higher
/// slices advance the previous slice through one more zero byte:
///
/// ```text
/// T_k[x] = T_0[T_{k-1}[x] & 0xFF] ^ (T_{k-1}[x] >> 8)
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteTables {
  tables: [[u32; 256]; SLICES],
}

impl ByteTables {
  /// Generate all 16 slices for `poly`.
  #[must_use]
  pub const fn new(poly: Polynomial) -> Self {
    let mut tables = [[0u32; 256]; SLICES];

    let mut i = 0usize;
    while i < 256 {
      tables[0][i] = bitwise::compute_byte(0, i as u8, poly);
      i += 1;
    }

    let mut k = 1usize;
    while k < SLICES {
      i = 0;
      while i < 256 {
        let prev = tables[k - 1][i];
        tables[k][i] = tables[0][(prev & 0xFF) as usize] ^ (prev >> 8);
        i += 1;
      }
      k += 1;
    }

    Self { tables }
  }

  /// All slices, `T_0` first.
  #[inline]
  #[must_use]
  pub const fn all(&self) -> &[[u32; 256]; SLICES] {
    &self.tables
  }

  /// The byte table itself (`T_0`).
  #[inline]
  #[must_use]
  pub const fn t0(&self) -> &[u32; 256] {
    &self.tables[0]
  }

  /// One table-driven byte step.
  #[inline(always)]
  #[must_use]
  pub const fn step(&self, crc: u32, byte: u8) -> u32 {
    self.tables[0][((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fold table
// ─────────────────────────────────────────────────────────────────────────────

/// Lane-repositioning multipliers for the parallel-fold engine.
///
/// Entry `i` is the register obtained by starting from `R = 1` (which denotes
/// `x^31`) and advancing `64·i` zero bits, i.e. `x^(31 + 64·i) mod P`.
/// For a fold round with `n` words per lane, a lane that sits `j` lanes
/// before the last one is repositioned with
///
/// ```text
/// adv_j(n) = raw[j·n - 1] = x^(64·j·n - 33)
/// ```
///
/// which is exactly `gf2::fold_multiplier(64·j·n)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoldTable {
  raw: [u32; 2 * FOLD_CAP],
}

impl FoldTable {
  /// Generate `2 · FOLD_CAP` powers for `poly` by repeated zero-advance.
  #[must_use]
  pub const fn new(poly: Polynomial) -> Self {
    let mut raw = [0u32; 2 * FOLD_CAP];
    let mut r = 1u32;
    let mut i = 0usize;
    while i < 2 * FOLD_CAP {
      raw[i] = r;
      let mut b = 0;
      while b < 64 {
        r = bitwise::step(r, 0, poly);
        b += 1;
      }
      i += 1;
    }
    Self { raw }
  }

  /// Raw power list, `x^31` first.
  #[inline]
  #[must_use]
  pub const fn raw(&self) -> &[u32; 2 * FOLD_CAP] {
    &self.raw
  }

  /// Multiplier moving a lane `lanes_ahead · n` words forward.
  ///
  /// `lanes_ahead` is 1 or 2 and `n` is in `1..=FOLD_CAP`; out-of-range
  /// arguments return 0 (which would erase the lane, so callers normalize
  /// first).
  #[inline(always)]
  #[must_use]
  pub const fn adv(&self, lanes_ahead: usize, n: usize) -> u32 {
    let idx = lanes_ahead * n;
    if idx == 0 || idx > 2 * FOLD_CAP {
      return 0;
    }
    self.raw[idx - 1]
  }

  /// `[adv_1(n), adv_2(n)]`.
  #[inline]
  #[must_use]
  pub const fn pair(&self, n: usize) -> [u32; 2] {
    [self.adv(1, n), self.adv(2, n)]
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bundle
// ─────────────────────────────────────────────────────────────────────────────

/// Every table an engine needs for one polynomial.
///
/// Construct once and share: the bundle is immutable, and engines borrow it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crc32Tables {
  poly: Polynomial,
  bytes: ByteTables,
  fold: FoldTable,
}

impl Crc32Tables {
  /// Generate the full bundle for `poly`.
  #[must_use]
  pub const fn new(poly: Polynomial) -> Self {
    Self {
      poly,
      bytes: ByteTables::new(poly),
      fold: FoldTable::new(poly),
    }
  }

  /// The static bundle for a built-in polynomial, if there is one.
  #[must_use]
  pub fn builtin(poly: Polynomial) -> Option<&'static Self> {
    match poly {
      Polynomial::CASTAGNOLI => Some(&CASTAGNOLI_TABLES),
      Polynomial::IEEE => Some(&IEEE_TABLES),
      _ => None,
    }
  }

  /// The polynomial these tables were generated for.
  #[inline]
  #[must_use]
  pub const fn polynomial(&self) -> Polynomial {
    self.poly
  }

  /// Slice-by-N tables.
  #[inline]
  #[must_use]
  pub const fn bytes(&self) -> &ByteTables {
    &self.bytes
  }

  /// Fold multipliers.
  #[inline]
  #[must_use]
  pub const fn fold(&self) -> &FoldTable {
    &self.fold
  }
}

/// Tables for CRC-32C.
pub static CASTAGNOLI_TABLES: Crc32Tables = Crc32Tables::new(Polynomial::CASTAGNOLI);

/// Tables for CRC-32 (IEEE).
pub static IEEE_TABLES: Crc32Tables = Crc32Tables::new(Polynomial::IEEE);
