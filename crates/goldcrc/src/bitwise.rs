//! Bit-serial CRC-32: one message bit per step, no tables.
//!
//! This is the reference engine. It is obviously correct (the loop is the
//! definition of a reflected CRC), works for any polynomial, and is
//! const-evaluable, which is how every lookup table in [`crate::tables`] is
//! bootstrapped.
//!
//! # Step encoding
//!
//! "Conditionally XOR P" is expressed branchlessly by negating the
//! shifted-out bit into an all-ones/all-zeros mask:
//!
//! - `0u32.wrapping_sub(0)` = `0x00000000`
//! - `0u32.wrapping_sub(1)` = `0xFFFFFFFF`
//!
//! Branching, multiply-by-bit and select encodings compute bit-identical
//! results; the test module keeps them as cross-checks.

use crate::polynomial::Polynomial;

/// Retire one message bit.
///
/// XORs `bit` (0 or 1) into the register's low position, shifts right, and
/// XORs in P if the bit shifted out was set.
#[inline(always)]
#[must_use]
pub const fn step(crc: u32, bit: u32, poly: Polynomial) -> u32 {
  let r = crc ^ (bit & 1);
  let mask = 0u32.wrapping_sub(r & 1);
  (r >> 1) ^ (poly.reflected() & mask)
}

/// Retire one message byte (8 steps, LSB first).
#[inline]
#[must_use]
pub const fn compute_byte(mut crc: u32, byte: u8, poly: Polynomial) -> u32 {
  crc ^= byte as u32;
  let mut i = 0;
  while i < 8 {
    crc = step(crc, 0, poly);
    i += 1;
  }
  crc
}

/// Fold [`step`] over all `8 · data.len()` message bits starting from `crc`.
///
/// `crc` is the raw register; no inversion is applied.
///
/// # Example
///
/// ```
/// use goldcrc::{Polynomial, bitwise};
///
/// let crc = bitwise::compute(Polynomial::CASTAGNOLI, !0, b"123456789") ^ !0;
/// assert_eq!(crc, 0xE306_9283);
/// ```
#[must_use]
pub const fn compute(poly: Polynomial, mut crc: u32, data: &[u8]) -> u32 {
  let mut rest = data;
  while let [byte, tail @ ..] = rest {
    crc = compute_byte(crc, *byte, poly);
    rest = tail;
  }
  crc
}
