//! Hardware abstraction traits for the Mandrel motion controller firmware
//!
//! This crate defines the interfaces that chip-specific HALs implement:
//!
//! - Checksummed non-volatile byte storage (EEPROM or emulated EEPROM)
//!
//! A host-testable in-RAM implementation is provided so that core logic
//! can be exercised without hardware.

#![no_std]
#![deny(unsafe_code)]

pub mod nvm;

pub use nvm::{ChecksummedNvm, RamEeprom};
