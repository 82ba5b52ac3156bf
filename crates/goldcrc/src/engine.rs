//! Engine selection and dispatch.
//!
//! An [`Engine`] is an immutable configuration object: a borrowed table
//! bundle, the kernel chosen for it, and the fold shape. It is `Copy`,
//! `Send` and `Sync`, and computing through it never allocates or fails.
//!
//! # Auto selection
//!
//! 1. Hardware CRC matching the tables' polynomial plus carry-less multiply → [`Backend::Fold`]
//! 2. Hardware CRC matching the tables' polynomial → [`Backend::Hwcrc8`]
//! 3. Otherwise → [`Backend::Table`] with [`Slice::By16`]
//!
//! `GOLDCRC_FORCE` (see [`config`](crate::config)) can steer this; forced
//! backends the CPU cannot run fall back to auto selection.

use crate::{
  bitwise,
  config::{self, Crc32Force},
  error::EngineError,
  fold::{self, FoldParams, Lanes},
  hw::{Emulated, Native, NativeFold},
  polynomial::Polynomial,
  portable::Slice,
  tables::Crc32Tables,
};

/// Register conditioning applied around a computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Invert {
  /// Raw register in, raw register out.
  #[default]
  None,
  /// XOR with `!0` before and after; the published CRC-32/CRC-32C convention.
  Both,
}

/// The kernel family an engine runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
  /// One bit per step, no tables.
  Bitwise,
  /// Slice-by-N lookup tables.
  Table(Slice),
  /// Hardware accumulate, one byte per instruction.
  Hwcrc1,
  /// Hardware accumulate, eight bytes per instruction.
  Hwcrc8,
  /// Parallel fold over hardware accumulate + carry-less multiply.
  Fold,
  /// Parallel fold over the table-driven software capability (any polynomial).
  EmulatedFold,
}

impl Backend {
  /// Every backend, in the order of the comparative benchmark.
  pub const ALL: [Self; 10] = [
    Self::Bitwise,
    Self::Table(Slice::By1),
    Self::Table(Slice::By2),
    Self::Table(Slice::By4),
    Self::Table(Slice::By8),
    Self::Table(Slice::By16),
    Self::Hwcrc1,
    Self::Hwcrc8,
    Self::Fold,
    Self::EmulatedFold,
  ];

  /// Architecture-neutral name.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Bitwise => "bitwise",
      Self::Table(s) => s.name(),
      Self::Hwcrc1 => "hwcrc1",
      Self::Hwcrc8 => "hwcrc8",
      Self::Fold => "fold",
      Self::EmulatedFold => "emulated-fold",
    }
  }

  /// Whether the backend needs a hardware CRC unit.
  #[must_use]
  pub const fn is_hardware(self) -> bool {
    matches!(self, Self::Hwcrc1 | Self::Hwcrc8 | Self::Fold)
  }
}

#[derive(Clone, Copy, Debug)]
enum Kernel {
  Bitwise,
  Table(Slice),
  Hw1(Native),
  Hw8(Native),
  Fold(NativeFold),
  EmulatedFold,
}

/// A configured CRC-32 engine for one polynomial.
#[derive(Clone, Copy, Debug)]
pub struct Engine<'t> {
  tables: &'t Crc32Tables,
  kernel: Kernel,
  fold: FoldParams,
}

impl<'t> Engine<'t> {
  /// Pick the fastest available backend for `tables`.
  #[must_use]
  pub fn new(tables: &'t Crc32Tables) -> Self {
    let cfg = config::get();
    let kernel = match cfg.effective_force {
      Crc32Force::Bitwise => Some(Kernel::Bitwise),
      Crc32Force::Table => Some(Kernel::Table(Slice::By16)),
      Crc32Force::Hwcrc => Native::for_polynomial(tables.polynomial()).ok().map(Kernel::Hw8),
      Crc32Force::Fold => NativeFold::for_polynomial(tables.polynomial()).ok().map(Kernel::Fold),
      Crc32Force::Auto => None,
    };
    Self {
      tables,
      kernel: kernel.unwrap_or_else(|| auto_kernel(tables.polynomial())),
      fold: cfg.fold.params(),
    }
  }

  /// Use exactly `backend`.
  ///
  /// # Errors
  ///
  /// - [`EngineError::PolynomialMismatch`] if a hardware backend is requested
  ///   for a polynomial the instruction does not implement.
  /// - [`EngineError::MissingCapability`] if the CPU lacks the features.
  pub fn with_backend(tables: &'t Crc32Tables, backend: Backend) -> Result<Self, EngineError> {
    let poly = tables.polynomial();
    let kernel = match backend {
      Backend::Bitwise => Kernel::Bitwise,
      Backend::Table(s) => Kernel::Table(s),
      Backend::Hwcrc1 => Kernel::Hw1(Native::for_polynomial(poly)?),
      Backend::Hwcrc8 => Kernel::Hw8(Native::for_polynomial(poly)?),
      Backend::Fold => Kernel::Fold(NativeFold::for_polynomial(poly)?),
      Backend::EmulatedFold => Kernel::EmulatedFold,
    };
    Ok(Self {
      tables,
      kernel,
      fold: config::get().fold.params(),
    })
  }

  /// Replace the fold shape (used by [`Backend::Fold`] and [`Backend::EmulatedFold`]).
  #[must_use]
  pub const fn with_fold_params(mut self, params: FoldParams) -> Self {
    self.fold = params;
    self
  }

  /// Shorthand for [`with_fold_params`](Self::with_fold_params) keeping the leaf size.
  #[must_use]
  pub const fn with_lanes(self, lanes: Lanes) -> Self {
    let leaf = self.fold.leaf_bytes();
    self.with_fold_params(FoldParams::new(lanes, leaf))
  }

  /// CRC of `message` from raw register `prev`; no conditioning.
  ///
  /// An empty message returns `prev`.
  #[inline]
  #[must_use]
  pub fn compute(&self, message: &[u8], prev: u32) -> u32 {
    match self.kernel {
      Kernel::Bitwise => bitwise::compute(self.tables.polynomial(), prev, message),
      Kernel::Table(s) => s.compute(self.tables.bytes(), prev, message),
      Kernel::Hw1(hw) => hw.hwcrc1(prev, message),
      Kernel::Hw8(hw) => hw.hwcrc8(prev, message),
      Kernel::Fold(hw) => hw.compute(self.tables.fold(), self.fold, prev, message),
      Kernel::EmulatedFold => fold::compute(Emulated::new(self.tables), self.tables.fold(), self.fold, prev, message),
    }
  }

  /// CRC of `message` with the given conditioning.
  #[inline]
  #[must_use]
  pub fn compute_with(&self, message: &[u8], prev: u32, invert: Invert) -> u32 {
    match invert {
      Invert::None => self.compute(message, prev),
      Invert::Both => !self.compute(message, !prev),
    }
  }

  /// CRC of `message` with inverted init and output.
  ///
  /// Chaining: `compute_inverted(b, compute_inverted(a, 0)) == compute_inverted(a ‖ b, 0)`.
  #[inline]
  #[must_use]
  pub fn compute_inverted(&self, message: &[u8], prev: u32) -> u32 {
    self.compute_with(message, prev, Invert::Both)
  }

  /// Selected backend.
  #[must_use]
  pub const fn backend(&self) -> Backend {
    match self.kernel {
      Kernel::Bitwise => Backend::Bitwise,
      Kernel::Table(s) => Backend::Table(s),
      Kernel::Hw1(_) => Backend::Hwcrc1,
      Kernel::Hw8(_) => Backend::Hwcrc8,
      Kernel::Fold(_) => Backend::Fold,
      Kernel::EmulatedFold => Backend::EmulatedFold,
    }
  }

  /// Kernel name including architecture, e.g. `"x86_64/fold-3way"`.
  #[must_use]
  pub fn backend_name(&self) -> &'static str {
    match self.kernel {
      Kernel::Bitwise => "portable/bitwise",
      Kernel::Table(Slice::By1) => "portable/slice1",
      Kernel::Table(Slice::By2) => "portable/slice2",
      Kernel::Table(Slice::By4) => "portable/slice4",
      Kernel::Table(Slice::By8) => "portable/slice8",
      Kernel::Table(Slice::By16) => "portable/slice16",
      Kernel::Hw1(hw) => hw.name(false),
      Kernel::Hw8(hw) => hw.name(true),
      Kernel::Fold(hw) => hw.name(self.fold),
      Kernel::EmulatedFold => match self.fold.lanes() {
        Lanes::Two => "portable/emulated-fold-2way",
        Lanes::Three => "portable/emulated-fold-3way",
      },
    }
  }

  /// Polynomial of the underlying tables.
  #[inline]
  #[must_use]
  pub const fn polynomial(&self) -> Polynomial {
    self.tables.polynomial()
  }

  #[inline]
  #[must_use]
  pub const fn tables(&self) -> &'t Crc32Tables {
    self.tables
  }

  #[inline]
  #[must_use]
  pub const fn fold_params(&self) -> FoldParams {
    self.fold
  }
}

fn auto_kernel(poly: Polynomial) -> Kernel {
  if let Ok(hw) = NativeFold::for_polynomial(poly) {
    Kernel::Fold(hw)
  } else if let Ok(hw) = Native::for_polynomial(poly) {
    Kernel::Hw8(hw)
  } else {
    Kernel::Table(Slice::By16)
  }
}
