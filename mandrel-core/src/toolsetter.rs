//! Persistent tool-setter probe position
//!
//! The tool-length-setter's XY position is measured once during machine
//! setup and must survive power cycles. It lives in a single fixed EEPROM
//! slot as a 10-byte record:
//!
//! ```text
//! ┌──────────┬──────────┬───────────┐
//! │ x        │ y        │ marker    │
//! │ f32 LE   │ f32 LE   │ u16 LE    │
//! └──────────┴──────────┴───────────┘
//! ```
//!
//! A record is valid only when the EEPROM integrity check passes AND the
//! marker matches [`TOOL_SETTER_MARKER`]. Everything else - erased flash,
//! a corrupted block, stale data from an incompatible firmware build -
//! reads as "not calibrated". The checksum proves the bytes are internally
//! consistent; the marker proves they encode this record shape.

use mandrel_hal::ChecksummedNvm;

/// Fixed EEPROM address of the tool-setter position slot
pub const TOOL_SETTER_ADDR: u16 = 900;

/// Marker identifying a record written by the current format
pub const TOOL_SETTER_MARKER: u16 = 0xA5C3;

/// Encoded record size in bytes
pub const TOOL_SETTER_RECORD_LEN: usize = 10;

/// Tool-setter position record as stored in EEPROM
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct ToolSetterRecord {
    /// Horizontal calibration offset in millimeters
    x: f32,
    /// Vertical calibration offset in millimeters
    y: f32,
    /// Format marker, [`TOOL_SETTER_MARKER`] when written by this store
    marker: u16,
}

impl ToolSetterRecord {
    /// Encode field by field in little-endian byte order
    ///
    /// Explicit encoding keeps the on-medium layout free of struct
    /// padding and host endianness, so records stay portable across
    /// controller architectures.
    fn encode(&self) -> [u8; TOOL_SETTER_RECORD_LEN] {
        let mut bytes = [0u8; TOOL_SETTER_RECORD_LEN];
        bytes[0..4].copy_from_slice(&self.x.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.y.to_le_bytes());
        bytes[8..10].copy_from_slice(&self.marker.to_le_bytes());
        bytes
    }

    /// Decode from the fixed little-endian layout
    fn decode(bytes: &[u8; TOOL_SETTER_RECORD_LEN]) -> Self {
        Self {
            x: f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            y: f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            marker: u16::from_le_bytes([bytes[8], bytes[9]]),
        }
    }
}

/// Persistent store for the tool-setter probe position.
///
/// Owns the NVM handle and maps the one logical record onto its fixed
/// slot. The interface is total: no operation fails, and every invalid
/// or absent state collapses to "not calibrated". Construct once at
/// startup and hand to the command handler that runs probing.
pub struct ToolSetterStore<N: ChecksummedNvm> {
    nvm: N,
}

impl<N: ChecksummedNvm> ToolSetterStore<N> {
    /// Create a store over the given NVM handle
    pub const fn new(nvm: N) -> Self {
        Self { nvm }
    }

    /// Get the underlying NVM handle for low-level access
    pub fn nvm(&mut self) -> &mut N {
        &mut self.nvm
    }

    /// Read the slot and validate checksum and marker
    fn read_record(&mut self) -> Option<ToolSetterRecord> {
        let mut bytes = [0u8; TOOL_SETTER_RECORD_LEN];
        if !self.nvm.read_checked(TOOL_SETTER_ADDR, &mut bytes) {
            return None;
        }
        let record = ToolSetterRecord::decode(&bytes);
        if record.marker != TOOL_SETTER_MARKER {
            return None;
        }
        Some(record)
    }

    /// Check whether a calibrated position is present.
    ///
    /// Returns `true` only if the stored block passes its integrity
    /// check and carries the current format marker. Never fails; any
    /// read or verification failure reads as `false`.
    pub fn is_set(&mut self) -> bool {
        self.read_record().is_some()
    }

    /// Read the calibrated position.
    ///
    /// Returns the stored `(x, y)` when a valid record is present, or
    /// `(0.0, 0.0)` otherwise. The default is a defined value, not an
    /// error; callers that need to distinguish use [`Self::is_set`].
    /// Every call reads the medium; no value is cached.
    pub fn get(&mut self) -> (f32, f32) {
        match self.read_record() {
            Some(record) => (record.x, record.y),
            None => (0.0, 0.0),
        }
    }

    /// Store a calibrated position, overwriting any prior record.
    ///
    /// Writes the full record in one block. There is no verify-after-
    /// write and no retry: a write that did not take effect surfaces as
    /// [`Self::is_set`] returning `false` on the next read.
    pub fn store(&mut self, x: f32, y: f32) {
        let record = ToolSetterRecord {
            x,
            y,
            marker: TOOL_SETTER_MARKER,
        };
        self.nvm.write_checked(TOOL_SETTER_ADDR, &record.encode());
    }
}
