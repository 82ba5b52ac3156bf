//! Generator polynomials in reflected, truncated form.

/// A CRC-32 generator polynomial.
///
/// Stored bit-reflected with the implied x^32 term dropped, which is the form
/// the reflected (LSB-first) register update consumes directly:
///
/// ```text
/// R' = (R >> 1) ^ (P & -(R & 1))
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Polynomial(u32);

impl Polynomial {
  /// CRC-32C (Castagnoli), normal form 0x1EDC6F41.
  ///
  /// This is the polynomial hardwired into the SSE4.2 `crc32` instruction and
  /// the ARMv8 `crc32c*` instructions.
  pub const CASTAGNOLI: Self = Self(0x82F6_3B78);

  /// CRC-32 (IEEE 802.3), normal form 0x04C11DB7.
  ///
  /// Hardwired into the ARMv8 `crc32*` instructions; x86 has no equivalent.
  pub const IEEE: Self = Self(0xEDB8_8320);

  /// Wrap a reflected, truncated polynomial.
  #[inline]
  #[must_use]
  pub const fn new(reflected: u32) -> Self {
    Self(reflected)
  }

  /// Build from the conventional (MSB-first) truncated form.
  #[inline]
  #[must_use]
  pub const fn from_normal(normal: u32) -> Self {
    Self(normal.reverse_bits())
  }

  /// Reflected, truncated form.
  #[inline]
  #[must_use]
  pub const fn reflected(self) -> u32 {
    self.0
  }

  /// Conventional (MSB-first) truncated form.
  #[inline]
  #[must_use]
  pub const fn normal(self) -> u32 {
    self.0.reverse_bits()
  }

  /// Conventional form with the explicit x^32 term (33 bits).
  #[inline]
  #[must_use]
  pub const fn full(self) -> u64 {
    (1u64 << 32) | self.normal() as u64
  }

  /// Short catalog name for the well-known polynomials.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self.0 {
      0x82F6_3B78 => "crc32c",
      0xEDB8_8320 => "crc32",
      _ => "custom",
    }
  }
}

impl Default for Polynomial {
  #[inline]
  fn default() -> Self {
    Self::CASTAGNOLI
  }
}
