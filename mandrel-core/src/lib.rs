//! Board-agnostic core logic for the Mandrel motion controller firmware
//!
//! This crate contains application logic that does not depend on
//! specific hardware implementations:
//!
//! - Tool-setter probe position persistence

#![no_std]
#![deny(unsafe_code)]

pub mod toolsetter;
