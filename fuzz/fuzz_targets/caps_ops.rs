//! Fuzz target for `Caps` set operations.
//!
//! Checks the algebra the engine selector relies on: `has` is a subset test,
//! `union` only adds and `difference` only removes features.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use platform::Caps;

#[derive(Arbitrary, Debug)]
struct Input {
  a: u64,
  b: u64,
  c: u64,
}

fuzz_target!(|input: Input| {
  let a = Caps::from_raw(input.a);
  let b = Caps::from_raw(input.b);
  let c = Caps::from_raw(input.c);

  // ─── Union ───
  assert_eq!(a | b, b | a, "union must be commutative");
  assert_eq!((a | b) | c, a | (b | c), "union must be associative");
  assert!((a | b).has(a) && (a | b).has(b), "union must contain both operands");

  // ─── Difference ───
  let d = a.difference(b);
  assert!(a.has(d), "difference must be a subset of the minuend");
  assert!(d.union(b).has(a), "difference plus subtrahend must cover the minuend");
  assert_eq!(d.difference(b), d, "difference must be idempotent");

  // ─── Counts ───
  assert!((a | b).count() >= a.count().max(b.count()), "union count bound");
  assert_eq!(d.count() + (a | b).difference(d).count(), (a | b).count(), "partition count");

  // ─── Ready masks ───
  use platform::caps::{aarch64, x86};
  assert_eq!(a.has(x86::FOLD_READY), a.has(x86::SSE42) && a.has(x86::PCLMULQDQ));
  assert_eq!(a.has(aarch64::FOLD_READY), a.has(aarch64::CRC) && a.has(aarch64::PMULL));
});
