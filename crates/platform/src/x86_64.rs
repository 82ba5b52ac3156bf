//! x86_64 vendor identification.
//!
//! The fold engine's lane count follows the vendor: Intel cores sustain three
//! independent `crc32q` streams, AMD cores were measured fastest with two.

#![allow(unsafe_code)] // Required for CPUID intrinsics

use core::arch::x86_64::__cpuid;

use crate::tune::Tune;

/// CPU vendor identification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vendor {
  Intel,
  Amd,
  Unknown,
}

impl Vendor {
  /// Query CPUID leaf 0 for the vendor string.
  #[must_use]
  pub fn detect() -> Self {
    // SAFETY: CPUID is always available on x86_64
    #[allow(unused_unsafe)]
    let r = unsafe { __cpuid(0) };
    Self::from_cpuid(r.ebx, r.edx, r.ecx)
  }

  /// Decode the vendor from the EBX-EDX-ECX registers of leaf 0.
  #[must_use]
  pub const fn from_cpuid(ebx: u32, edx: u32, ecx: u32) -> Self {
    // "Genu" "ineI" "ntel"
    if ebx == 0x756e_6547 && edx == 0x4965_6e69 && ecx == 0x6c65_746e {
      Self::Intel
    // "Auth" "enti" "cAMD"
    } else if ebx == 0x6874_7541 && edx == 0x6974_6e65 && ecx == 0x444d_4163 {
      Self::Amd
    } else {
      Self::Unknown
    }
  }

  /// Tuning preset for this vendor.
  #[must_use]
  pub const fn tune(self) -> Tune {
    match self {
      Self::Intel => Tune::INTEL,
      Self::Amd => Tune::AMD,
      Self::Unknown => Tune::DEFAULT,
    }
  }
}
