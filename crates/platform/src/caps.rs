//! CPU capability representation.
//!
//! [`Caps`] is a 64-bit bitset answering "what instructions can I legally run
//! on this machine?" for the primitives the CRC engines consume: a hardware
//! CRC-accumulate instruction and a 64×64→128 carry-less multiply.
//!
//! # Bit Layout
//!
//! - Bits 0-31: x86_64 features
//! - Bits 32-63: aarch64 features

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities: a 64-bit feature bitset.
///
/// `Caps` is `Copy`, `Send`, and `Sync`. It can be freely shared across threads.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) u64);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self(0);

  /// Create a capability set from a raw word.
  ///
  /// Normal usage should prefer the predefined constants.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(bits: u64) -> Self {
    Self(bits)
  }

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0 & required.0) == required.0
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Capability set with every feature of `other` removed.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  /// Check if the capability set is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Count the number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0.count_ones()
  }

  /// Create a capability set with a single bit set.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    Self(1u64 << (bit % 64))
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl core::fmt::Debug for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    let mut set = f.debug_set();
    for (name, cap) in x86::NAMED.iter().chain(aarch64::NAMED.iter()) {
      if self.has(*cap) {
        set.entry(name);
      }
    }
    set.finish()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  Aarch64,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    #[cfg(target_arch = "x86_64")]
    {
      Self::X86_64
    }
    #[cfg(target_arch = "aarch64")]
    {
      Self::Aarch64
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
      Self::Other
    }
  }

  /// Returns the human-readable name for this architecture.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

impl core::fmt::Display for Arch {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86_64 Features (bits 0-31)
// ─────────────────────────────────────────────────────────────────────────────

/// x86_64 feature bits.
pub mod x86 {
  use super::Caps;

  /// SSE4.2: `crc32` instruction (Castagnoli polynomial only).
  pub const SSE42: Caps = Caps::bit(0);
  /// PCLMULQDQ: 64×64→128 carry-less multiply.
  pub const PCLMULQDQ: Caps = Caps::bit(1);

  /// Hardware CRC-32C accumulate is usable.
  pub const CRC32C_READY: Caps = SSE42;
  /// Everything the parallel-fold engine needs.
  pub const FOLD_READY: Caps = Caps(SSE42.0 | PCLMULQDQ.0);

  pub(crate) const NAMED: [(&str, Caps); 2] = [("sse4.2", SSE42), ("pclmulqdq", PCLMULQDQ)];
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64 Features (bits 32-63)
// ─────────────────────────────────────────────────────────────────────────────

/// aarch64 feature bits.
pub mod aarch64 {
  use super::Caps;

  /// ARMv8 CRC extension (`crc32*` and `crc32c*`, both polynomials).
  pub const CRC: Caps = Caps::bit(32);
  /// PMULL 64×64→128 carry-less multiply (part of the `aes` feature).
  pub const PMULL: Caps = Caps::bit(33);

  /// Hardware CRC-32 / CRC-32C accumulate is usable.
  pub const CRC_READY: Caps = CRC;
  /// Everything the parallel-fold engine needs.
  pub const FOLD_READY: Caps = Caps(CRC.0 | PMULL.0);

  pub(crate) const NAMED: [(&str, Caps); 2] = [("crc", CRC), ("pmull", PMULL)];
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::format;

  use super::*;

  #[test]
  fn none_is_empty() {
    assert!(Caps::NONE.is_empty());
    assert_eq!(Caps::NONE.count(), 0);
    assert!(Caps::NONE.has(Caps::NONE));
  }

  #[test]
  fn ready_masks_imply_components() {
    assert!(x86::FOLD_READY.has(x86::SSE42));
    assert!(x86::FOLD_READY.has(x86::PCLMULQDQ));
    assert!(!x86::CRC32C_READY.has(x86::FOLD_READY));
    assert!(aarch64::FOLD_READY.has(aarch64::CRC));
    assert!(aarch64::FOLD_READY.has(aarch64::PMULL));
  }

  #[test]
  fn architectures_do_not_overlap() {
    let x = x86::SSE42 | x86::PCLMULQDQ;
    let a = aarch64::CRC | aarch64::PMULL;
    assert_eq!((x | a).count(), 4);
    assert_eq!(x.difference(a), x);
  }

  #[test]
  fn difference_removes_bits() {
    let c = x86::FOLD_READY.difference(x86::PCLMULQDQ);
    assert!(c.has(x86::CRC32C_READY));
    assert!(!c.has(x86::FOLD_READY));
  }

  #[test]
  fn debug_lists_features() {
    let dbg = format!("{:?}", x86::FOLD_READY);
    assert_eq!(dbg, r#"{"sse4.2", "pclmulqdq"}"#);
    assert_eq!(format!("{:?}", Caps::NONE), "{}");
  }

  #[test]
  fn from_raw_roundtrips_has() {
    let c = Caps::from_raw(1 << 33);
    assert!(c.has(aarch64::PMULL));
    assert!(!c.has(aarch64::CRC));
  }
}
