//! Checksummed non-volatile byte storage
//!
//! Provides the trait for integrity-protected byte-range access to a
//! byte-addressable non-volatile medium, plus an in-RAM implementation
//! used for host testing and hardware emulation.
//!
//! Each stored block carries a one-byte running checksum written
//! immediately after the data. The checksum is a rotate-left-then-add
//! over the block, matching the on-medium format used by AVR-era
//! controller EEPROM drivers, so records remain readable across ports.

/// Integrity-protected access to a fixed region of non-volatile memory.
///
/// Implementations attach a checksum on write and verify it on read.
/// Neither operation reports a write-side failure: a write that did not
/// take effect is detected only by a later read returning `false`.
pub trait ChecksummedNvm {
    /// Write `data` to `address` and store its integrity code.
    fn write_checked(&mut self, address: u16, data: &[u8]);

    /// Read `buffer.len()` bytes from `address` and verify the stored
    /// integrity code.
    ///
    /// Returns `true` if the code matches. On `false` the buffer content
    /// must not be trusted.
    fn read_checked(&mut self, address: u16, buffer: &mut [u8]) -> bool;
}

/// Running checksum over a byte block: rotate left one bit, then add.
fn checksum(data: &[u8]) -> u8 {
    let mut acc: u8 = 0;
    for &byte in data {
        acc = acc.rotate_left(1);
        acc = acc.wrapping_add(byte);
    }
    acc
}

/// In-RAM EEPROM with the checksummed block format.
///
/// Backs host tests and the desktop emulator. Fresh instances read as
/// erased flash (`0xFF` everywhere), so any checked read on an unwritten
/// region fails verification.
pub struct RamEeprom<const SIZE: usize> {
    data: [u8; SIZE],
}

impl<const SIZE: usize> RamEeprom<SIZE> {
    /// Create an erased EEPROM image
    pub const fn new() -> Self {
        Self { data: [0xFF; SIZE] }
    }

    /// Read a single raw byte, bypassing integrity checking
    pub fn read_byte(&self, address: u16) -> u8 {
        self.data[address as usize]
    }

    /// Write a single raw byte, bypassing integrity checking
    ///
    /// Raw writes do not maintain block checksums; a block touched this
    /// way will fail its next checked read unless the checksum byte is
    /// rewritten too.
    pub fn write_byte(&mut self, address: u16, value: u8) {
        self.data[address as usize] = value;
    }
}

impl<const SIZE: usize> Default for RamEeprom<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SIZE: usize> ChecksummedNvm for RamEeprom<SIZE> {
    fn write_checked(&mut self, address: u16, data: &[u8]) {
        let start = address as usize;
        let end = start + data.len();
        self.data[start..end].copy_from_slice(data);
        self.data[end] = checksum(data);
    }

    fn read_checked(&mut self, address: u16, buffer: &mut [u8]) -> bool {
        let start = address as usize;
        let end = start + buffer.len();
        buffer.copy_from_slice(&self.data[start..end]);
        self.data[end] == checksum(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_verifies() {
        let mut eeprom = RamEeprom::<256>::new();
        eeprom.write_checked(16, &[1, 2, 3, 4]);

        let mut buffer = [0u8; 4];
        assert!(eeprom.read_checked(16, &mut buffer));
        assert_eq!(buffer, [1, 2, 3, 4]);
    }

    #[test]
    fn test_fresh_medium_fails_verification() {
        let mut eeprom = RamEeprom::<256>::new();
        let mut buffer = [0u8; 8];
        assert!(!eeprom.read_checked(0, &mut buffer));
    }

    #[test]
    fn test_corrupted_data_byte_detected() {
        let mut eeprom = RamEeprom::<256>::new();
        eeprom.write_checked(32, &[0xDE, 0xAD, 0xBE, 0xEF]);

        eeprom.write_byte(33, eeprom.read_byte(33) ^ 0x01);

        let mut buffer = [0u8; 4];
        assert!(!eeprom.read_checked(32, &mut buffer));
    }

    #[test]
    fn test_corrupted_checksum_byte_detected() {
        let mut eeprom = RamEeprom::<256>::new();
        eeprom.write_checked(32, &[0xDE, 0xAD, 0xBE, 0xEF]);

        // Checksum lives right after the block
        eeprom.write_byte(36, eeprom.read_byte(36) ^ 0x01);

        let mut buffer = [0u8; 4];
        assert!(!eeprom.read_checked(32, &mut buffer));
    }

    #[test]
    fn test_checksum_order_sensitive() {
        // The rotate makes the checksum depend on byte order, not just the sum
        assert_ne!(checksum(&[1, 2, 3]), checksum(&[3, 2, 1]));
    }

    #[test]
    fn test_overwrite_replaces_block() {
        let mut eeprom = RamEeprom::<256>::new();
        eeprom.write_checked(64, &[1, 1, 1, 1]);
        eeprom.write_checked(64, &[2, 2, 2, 2]);

        let mut buffer = [0u8; 4];
        assert!(eeprom.read_checked(64, &mut buffer));
        assert_eq!(buffer, [2, 2, 2, 2]);
    }
}
