//! Checksum traits for the goldcrc workspace.
//!
//! This crate provides the streaming contract every checksum type in the
//! workspace conforms to. It is `no_std` and has zero dependencies.
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Checksum`] | One-shot and incremental checksum computation |
//! | [`ChecksumCombine`] | `crc(A ‖ B)` from `crc(A)`, `crc(B)` and `len(B)` |
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

mod checksum;

pub use checksum::{Checksum, ChecksumCombine};
