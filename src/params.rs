//! Strongly typed parameter enumerations for the ADXL345 driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the high-level driver APIs. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use adxl345::params::{Address, Range};
//!
//! let address = Address::Default;
//! let range = Range::G4;
//! let _ = (address, range);
//! ```

/// Available measurement range selections (± full scale in g).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Range {
    /// ±2 g full scale.
    G2,
    /// ±4 g full scale.
    G4,
    /// ±8 g full scale.
    G8,
    /// ±16 g full scale.
    G16,
}

impl Range {
    /// Returns the 2-bit `DATA_FORMAT` range field encoding.
    pub const fn code(self) -> u8 {
        match self {
            Self::G2 => 0b00,
            Self::G4 => 0b01,
            Self::G8 => 0b10,
            Self::G16 => 0b11,
        }
    }

    /// Decodes a `DATA_FORMAT` range field value.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0b00 => Some(Self::G2),
            0b01 => Some(Self::G4),
            0b10 => Some(Self::G8),
            0b11 => Some(Self::G16),
            _ => None,
        }
    }

    /// Maps a plain range magnitude (2, 4, 8 or 16) to a selection.
    pub const fn from_g(g: u16) -> Option<Self> {
        match g {
            2 => Some(Self::G2),
            4 => Some(Self::G4),
            8 => Some(Self::G8),
            16 => Some(Self::G16),
            _ => None,
        }
    }

    /// Returns the full-scale magnitude in g.
    pub const fn full_scale_g(self) -> u16 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Returns the scale factor in g per LSB at the part's 10-bit resolution.
    pub const fn gain(self) -> f32 {
        2.0 * self.full_scale_g() as f32 / 1024.0
    }
}

/// Bus address selection pinned by the `ALT ADDRESS` hardware strap.
///
/// The strap is sampled at power-up; the selection is a wiring fact, never
/// auto-detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Address {
    /// Strap tied low: address `0x53`.
    Default,
    /// Strap tied high: address `0x1D`.
    Alternate,
}

impl Address {
    /// Returns the 7-bit bus address for this strap wiring.
    pub const fn value(self) -> u8 {
        match self {
            Self::Default => 0x53,
            Self::Alternate => 0x1D,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_codes_match_data_format_field() {
        assert_eq!(Range::G2.code(), 0b00);
        assert_eq!(Range::G4.code(), 0b01);
        assert_eq!(Range::G8.code(), 0b10);
        assert_eq!(Range::G16.code(), 0b11);
    }

    #[test]
    fn range_code_roundtrip() {
        for range in [Range::G2, Range::G4, Range::G8, Range::G16] {
            assert_eq!(Range::from_code(range.code()), Some(range));
        }
        assert_eq!(Range::from_code(4), None);
    }

    #[test]
    fn range_magnitude_mapping_is_permissive() {
        assert_eq!(Range::from_g(2), Some(Range::G2));
        assert_eq!(Range::from_g(16), Some(Range::G16));
        assert_eq!(Range::from_g(3), None);
        assert_eq!(Range::from_g(0), None);
    }

    #[test]
    fn gain_is_two_r_over_1024() {
        assert_eq!(Range::G2.gain(), 0.00390625);
        assert_eq!(Range::G4.gain(), 0.0078125);
        assert_eq!(Range::G8.gain(), 0.015625);
        assert_eq!(Range::G16.gain(), 0.03125);
    }

    #[test]
    fn strap_addresses_match_datasheet() {
        assert_eq!(Address::Default.value(), 0x53);
        assert_eq!(Address::Alternate.value(), 0x1D);
    }
}
