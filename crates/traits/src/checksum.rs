//! Streaming checksum contract.
//!
//! A checksum here is a register folded over a byte stream: it can be fed in
//! pieces, read at any point without disturbing it, and (for CRCs) stitched
//! together from independently computed fragments.

use core::fmt::Debug;

/// An incremental checksum over a byte stream.
///
/// # Usage
///
/// ```rust,ignore
/// use goldcrc::{Checksum, Crc32c};
///
/// // One-shot (fastest for data already in memory)
/// let crc = Crc32c::checksum(b"hello world");
///
/// // Streaming
/// let mut hasher = Crc32c::new();
/// hasher.update(b"hello ");
/// hasher.update(b"world");
/// assert_eq!(hasher.finalize(), crc);
/// ```
///
/// # Contract
///
/// - `new()` and `Default::default()` produce the same state
/// - `finalize()` only reads the state, so repeated calls agree
/// - `reset()` returns to the state the hasher was constructed with
pub trait Checksum: Clone + Default {
  /// Width of [`Output`](Self::Output) in bytes.
  const OUTPUT_SIZE: usize;

  /// The checksum output type (`u32` for CRC-32 variants).
  type Output: Copy + Eq + Debug + Default;

  /// Hasher at the algorithm's standard starting register.
  #[must_use]
  fn new() -> Self;

  /// Hasher that picks up where a finalized checksum left off.
  #[must_use]
  fn with_initial(initial: Self::Output) -> Self;

  /// Fold `data` into the register.
  fn update(&mut self, data: &[u8]);

  /// Fold several buffers, in order, as if they were one contiguous slice.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Checksum of everything fed so far. The hasher stays usable.
  #[must_use]
  fn finalize(&self) -> Self::Output;

  /// Discard all input since construction.
  fn reset(&mut self);

  /// Checksum of a single buffer.
  #[inline]
  #[must_use]
  fn checksum(data: &[u8]) -> Self::Output {
    let mut h = Self::new();
    h.update(data);
    h.finalize()
  }

  /// Checksum of several buffers taken as one message.
  #[inline]
  #[must_use]
  fn checksum_vectored(bufs: &[&[u8]]) -> Self::Output {
    let mut h = Self::new();
    h.update_vectored(bufs);
    h.finalize()
  }
}

/// Checksums that can be composed from the checksums of adjacent fragments.
///
/// For CRCs this works because:
///
/// ```text
/// crc(A || B) = crc(A) * x^(8*len(B)) mod G(x) XOR crc(B)
/// ```
///
/// with the usual init/xorout corrections applied by the implementor.
pub trait ChecksumCombine: Checksum {
  /// Given `crc_a = crc(A)` and `crc_b = crc(B)`, computes `crc(A || B)`.
  #[must_use]
  fn combine(crc_a: Self::Output, crc_b: Self::Output, len_b: usize) -> Self::Output;
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Additive toy checksum, enough to exercise the provided methods.
  #[derive(Clone, Default)]
  struct Sum(u32);

  impl Checksum for Sum {
    const OUTPUT_SIZE: usize = 4;
    type Output = u32;

    fn new() -> Self {
      Self(0)
    }

    fn with_initial(initial: u32) -> Self {
      Self(initial)
    }

    fn update(&mut self, data: &[u8]) {
      for &b in data {
        self.0 = self.0.wrapping_add(b as u32);
      }
    }

    fn finalize(&self) -> u32 {
      self.0
    }

    fn reset(&mut self) {
      self.0 = 0;
    }
  }

  #[test]
  fn vectored_matches_contiguous() {
    let joined = Sum::checksum(b"hello world");
    let split = Sum::checksum_vectored(&[b"hel", b"lo ", b"", b"world"]);
    assert_eq!(joined, split);
  }

  #[test]
  fn finalize_is_idempotent() {
    let mut h = Sum::new();
    h.update(b"abc");
    assert_eq!(h.finalize(), h.finalize());
    h.reset();
    assert_eq!(h.finalize(), 0);
  }
}
