//! Streaming CRC-32C and CRC-32 hashers.
//!
//! # Usage
//!
//! ```
//! use goldcrc::Crc32c;
//!
//! // One-shot computation
//! let crc = Crc32c::checksum(b"hello world");
//!
//! // Incremental computation
//! let mut hasher = Crc32c::new();
//! hasher.update(b"hello ");
//! hasher.update(b"world");
//! assert_eq!(hasher.finalize(), crc);
//! ```
//!
//! Both hashers run on the auto-selected [`Engine`](crate::Engine) for their
//! polynomial: parallel fold where the CPU has a matching CRC unit and a
//! carry-less multiply, slice-by-16 otherwise.

use traits::{Checksum, ChecksumCombine};

use crate::{engine::Engine, gf2, polynomial::Polynomial};

macro_rules! define_crc32 {
  (
    $(#[$meta:meta])*
    $name:ident, $poly:expr, $engine:path, $check:literal
  ) => {
    $(#[$meta])*
    ///
    /// `Send` and `Sync`; partial results from parallel hashers can be joined
    /// with [`combine`](Self::combine).
    #[derive(Clone, Debug)]
    pub struct $name {
      /// Current register (inverted; XOR applied on finalize).
      state: u32,
      /// Register restored by `reset`.
      initial: u32,
    }

    impl $name {
      /// Initial register value (all ones).
      const INIT: u32 = 0xFFFF_FFFF;

      /// Generator polynomial.
      pub const POLYNOMIAL: Polynomial = $poly;

      /// Create a new hasher with the default initial value.
      #[inline]
      #[must_use]
      pub const fn new() -> Self {
        Self {
          state: Self::INIT,
          initial: Self::INIT,
        }
      }

      /// Create a hasher that continues from a previously finalized CRC.
      #[inline]
      #[must_use]
      pub const fn resume(crc: u32) -> Self {
        Self {
          state: crc ^ Self::INIT,
          initial: crc ^ Self::INIT,
        }
      }

      /// Checksum of `data` in one shot.
      ///
      /// ```
      #[doc = concat!("assert_eq!(goldcrc::", stringify!($name), "::checksum(b\"123456789\"), ", stringify!($check), ");")]
      /// ```
      #[inline]
      #[must_use]
      pub fn checksum(data: &[u8]) -> u32 {
        $engine().compute(data, Self::INIT) ^ Self::INIT
      }

      /// Feed more data.
      #[inline]
      pub fn update(&mut self, data: &[u8]) {
        self.state = $engine().compute(data, self.state);
      }

      /// Current checksum. Does not consume the hasher; further updates are allowed.
      #[inline]
      #[must_use]
      pub const fn finalize(&self) -> u32 {
        self.state ^ Self::INIT
      }

      /// Return to the initial (or resumed-from) state.
      #[inline]
      pub fn reset(&mut self) {
        self.state = self.initial;
      }

      /// `crc(A ‖ B)` from `crc(A)`, `crc(B)` and `len(B)`, in O(log len(B)).
      #[inline]
      #[must_use]
      pub const fn combine(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
        gf2::combine(crc_a, crc_b, len_b, $poly)
      }
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        Self::new()
      }
    }

    impl Checksum for $name {
      const OUTPUT_SIZE: usize = 4;
      type Output = u32;

      #[inline]
      fn new() -> Self {
        $name::new()
      }

      #[inline]
      fn with_initial(initial: u32) -> Self {
        $name::resume(initial)
      }

      #[inline]
      fn update(&mut self, data: &[u8]) {
        $name::update(self, data);
      }

      #[inline]
      fn finalize(&self) -> u32 {
        $name::finalize(self)
      }

      #[inline]
      fn reset(&mut self) {
        $name::reset(self);
      }

      #[inline]
      fn checksum(data: &[u8]) -> u32 {
        $name::checksum(data)
      }
    }

    impl ChecksumCombine for $name {
      #[inline]
      fn combine(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
        $name::combine(crc_a, crc_b, len_b)
      }
    }
  };
}

define_crc32!(
  /// CRC-32C (Castagnoli, iSCSI).
  Crc32c,
  Polynomial::CASTAGNOLI,
  castagnoli_engine,
  0xE306_9283
);

define_crc32!(
  /// CRC-32 (IEEE 802.3, zlib, PNG).
  Crc32,
  Polynomial::IEEE,
  ieee_engine,
  0xCBF4_3926
);

/// Auto-selected engine for CRC-32C (cached with `std`).
#[inline]
pub(crate) fn castagnoli_engine() -> Engine<'static> {
  #[cfg(feature = "std")]
  {
    use std::sync::OnceLock;
    static ENGINE: OnceLock<Engine<'static>> = OnceLock::new();
    *ENGINE.get_or_init(|| Engine::new(&crate::tables::CASTAGNOLI_TABLES))
  }
  #[cfg(not(feature = "std"))]
  {
    Engine::new(&crate::tables::CASTAGNOLI_TABLES)
  }
}

/// Auto-selected engine for CRC-32 (cached with `std`).
#[inline]
pub(crate) fn ieee_engine() -> Engine<'static> {
  #[cfg(feature = "std")]
  {
    use std::sync::OnceLock;
    static ENGINE: OnceLock<Engine<'static>> = OnceLock::new();
    *ENGINE.get_or_init(|| Engine::new(&crate::tables::IEEE_TABLES))
  }
  #[cfg(not(feature = "std"))]
  {
    Engine::new(&crate::tables::IEEE_TABLES)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const CRC32C_HELLO_WORLD: u32 = 0xC994_65AA;
  const CRC32_HELLO_WORLD: u32 = 0x0D4A_1185;

  #[test]
  fn check_values() {
    assert_eq!(Crc32c::checksum(b"123456789"), 0xE306_9283);
    assert_eq!(Crc32::checksum(b"123456789"), 0xCBF4_3926);
    assert_eq!(Crc32c::checksum(b"hello world"), CRC32C_HELLO_WORLD);
    assert_eq!(Crc32::checksum(b"hello world"), CRC32_HELLO_WORLD);
    assert_eq!(Crc32c::checksum(b""), 0);
  }

  #[test]
  fn streaming_matches_oneshot() {
    let data = b"The quick brown fox jumps over the lazy dog";
    for split in 0..=data.len() {
      let (a, b) = data.split_at(split);
      let mut h = Crc32c::new();
      h.update(a);
      h.update(b);
      assert_eq!(h.finalize(), Crc32c::checksum(data));
    }
  }

  #[test]
  fn resume_continues() {
    let (a, b) = b"hello world".split_at(6);
    let mut h = Crc32::resume(Crc32::checksum(a));
    h.update(b);
    assert_eq!(h.finalize(), CRC32_HELLO_WORLD);
  }

  #[test]
  fn reset_restores_initial() {
    let mut h = Crc32c::resume(0x1234_5678);
    h.update(b"abc");
    h.reset();
    assert_eq!(h.finalize(), 0x1234_5678);
  }

  #[test]
  fn finalize_is_idempotent() {
    let mut h = Crc32c::new();
    h.update(b"1234");
    assert_eq!(h.finalize(), h.finalize());
    h.update(b"56789");
    assert_eq!(h.finalize(), 0xE306_9283);
  }

  #[test]
  fn combine_matches_concatenation() {
    let data = b"hello world";
    let (a, b) = data.split_at(6);
    assert_eq!(Crc32c::combine(Crc32c::checksum(a), Crc32c::checksum(b), b.len()), CRC32C_HELLO_WORLD);
    assert_eq!(Crc32::combine(Crc32::checksum(a), Crc32::checksum(b), b.len()), CRC32_HELLO_WORLD);
    assert_eq!(Crc32c::combine(Crc32c::checksum(data), 0, 0), CRC32C_HELLO_WORLD);
  }

  #[test]
  fn trait_surface() {
    fn via_trait<C: ChecksumCombine<Output = u32>>(data: &[u8]) -> u32 {
      let mut h = C::new();
      h.update_vectored(&[&data[..3], &data[3..]]);
      C::combine(h.finalize(), C::checksum(b""), 0)
    }
    assert_eq!(via_trait::<Crc32c>(b"123456789"), 0xE306_9283);
    assert_eq!(via_trait::<Crc32>(b"123456789"), 0xCBF4_3926);
    assert_eq!(<Crc32c as Checksum>::with_initial(7).finalize(), 7);
  }
}
