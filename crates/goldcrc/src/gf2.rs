//! GF(2) polynomial algebra in the reflected CRC-32 domain.
//!
//! Every other engine's combination formula is derived from, and tested
//! against, the operations here. Addition in GF(2) is XOR and is written
//! inline as `^` throughout the crate.
//!
//! # Representation
//!
//! A 32-bit register value `r` denotes the polynomial
//!
//! ```text
//! r(x) = Σ bit_i(r) · x^(31-i)
//! ```
//!
//! so bit 31 is `x^0` and bit 0 is `x^31`. A 64-bit message word loaded
//! little-endian denotes `Σ bit_i(w) · x^(63-i)`, matching the order in which
//! a reflected CRC consumes message bits.
//!
//! In this representation one bit-serial step over a zero bit multiplies the
//! register by `x` modulo P, and the carry-less product of two 32-bit values
//! read as a 64-bit word equals `a(x) · b(x) · x`.

use crate::polynomial::Polynomial;

/// `x^0` in the reflected register representation.
pub const ONE: u32 = 1 << 31;

/// Carry-less multiplication of two 64-bit values.
///
/// This is the software equivalent of PCLMULQDQ/PMULL: the XOR of copies of
/// `b` shifted left by the position of every set bit of `a`.
#[inline]
#[must_use]
pub const fn clmul64(a: u64, b: u64) -> u128 {
  let mut product: u128 = 0;
  let mut i = 0;
  while i < 64 {
    if (a >> i) & 1 != 0 {
      product ^= (b as u128) << i;
    }
    i += 1;
  }
  product
}

/// Multiply two reflected register values modulo P.
#[must_use]
pub const fn mul_mod(a: u32, mut b: u32, poly: Polynomial) -> u32 {
  let p = poly.reflected();
  let mut m = ONE;
  let mut product = 0u32;
  loop {
    if a & m != 0 {
      product ^= b;
      if a & (m - 1) == 0 {
        break;
      }
    }
    m >>= 1;
    if m == 0 {
      break;
    }
    b = (b >> 1) ^ (p & 0u32.wrapping_sub(b & 1));
  }
  product
}

/// `x^n mod P` in reflected form (square-and-multiply, O(log n)).
#[must_use]
pub const fn xpow_mod(mut n: u64, poly: Polynomial) -> u32 {
  let mut result = ONE;
  let mut base = ONE >> 1;
  while n != 0 {
    if n & 1 != 0 {
      result = mul_mod(result, base, poly);
    }
    base = mul_mod(base, base, poly);
    n >>= 1;
  }
  result
}

/// Advance a register through `bits` zero message bits.
///
/// Equivalent to running the bit-serial step `bits` times with a zero input
/// bit, in O(log bits) multiplications.
#[inline]
#[must_use]
pub const fn shift_zeros(crc: u32, bits: u64, poly: Polynomial) -> u32 {
  mul_mod(crc, xpow_mod(bits, poly), poly)
}

/// Zero-advance multiplier for repositioning a lane's partial CRC.
///
/// For a partial CRC `a` that must be moved `shift_bits` further along the
/// message, `clmul(a, fold_multiplier(shift_bits))` is a 64-bit word whose
/// contribution through one 64-bit accumulate step equals `a · x^shift_bits`:
///
/// ```text
/// accumulate64(0, w) = w(x) · x^32          (mod P)
/// clmul(a, k)        = a(x) · k(x) · x
/// ⇒ k = x^(shift_bits - 33)
/// ```
///
/// `shift_bits` must be at least 64 (one block).
#[inline]
#[must_use]
pub const fn fold_multiplier(shift_bits: u64, poly: Polynomial) -> u32 {
  xpow_mod(shift_bits - 33, poly)
}

/// Combine two CRCs: `crc(A ‖ B)` from `crc(A)`, `crc(B)`, `len(B)`.
///
/// Valid both for raw registers (where `crc_b` was computed from a zero
/// register) and for the inverted convention, where the init and xorout
/// contributions cancel.
#[inline]
#[must_use]
pub const fn combine(crc_a: u32, crc_b: u32, len_b: usize, poly: Polynomial) -> u32 {
  shift_zeros(crc_a, (len_b as u64).wrapping_mul(8), poly) ^ crc_b
}
