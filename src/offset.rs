//! Sign-magnitude channel offsets (`CH1OS` / `CH2OS`).
//!
//! The offset fields hold a 5-bit magnitude and a sign bit at bit 5 rather than
//! a two's complement value. Two constructors are offered:
//!
//! - [`ChannelOffset::new`] rejects magnitudes above 31.
//! - [`ChannelOffset::truncating`] keeps the low five bits of the magnitude,
//!   which is what the register itself does with an oversized write.

use crate::registers::{Ch1Offset, Ch2Offset};

/// Signed offset in the range `-31..=31`, stored as sign and magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelOffset {
    negative: bool,
    magnitude: u8,
}

/// Offset magnitude does not fit the 5-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OffsetOutOfRange(pub i8);

impl ChannelOffset {
    /// Largest representable magnitude.
    pub const MAX_MAGNITUDE: u8 = 0x1F;

    /// Zero offset.
    pub const ZERO: Self = Self {
        negative: false,
        magnitude: 0,
    };

    /// Creates an offset, failing when `|value| > 31`.
    pub const fn new(value: i8) -> core::result::Result<Self, OffsetOutOfRange> {
        if value.unsigned_abs() > Self::MAX_MAGNITUDE {
            return Err(OffsetOutOfRange(value));
        }
        Ok(Self::truncating(value))
    }

    /// Creates an offset keeping only the low five bits of `|value|`.
    ///
    /// The sign is preserved, so `40` becomes `8` and `-33` becomes `-1`.
    pub const fn truncating(value: i8) -> Self {
        Self {
            negative: value < 0,
            magnitude: value.unsigned_abs() & Self::MAX_MAGNITUDE,
        }
    }

    /// Signed value of the offset.
    pub const fn value(self) -> i8 {
        let magnitude = self.magnitude as i8;
        if self.negative { -magnitude } else { magnitude }
    }

    /// Magnitude field (bits 4:0).
    pub const fn magnitude(self) -> u8 {
        self.magnitude
    }

    /// Sign bit (bit 5).
    pub const fn is_negative(self) -> bool {
        self.negative
    }

    /// Encodes the `CH1OS` register byte.
    pub fn to_ch1(self, integrator: bool) -> Ch1Offset {
        Ch1Offset::new()
            .with_magnitude(self.magnitude)
            .with_negative(self.negative)
            .with_integrator(integrator)
    }

    /// Encodes the `CH2OS` register byte.
    pub fn to_ch2(self) -> Ch2Offset {
        Ch2Offset::new()
            .with_magnitude(self.magnitude)
            .with_negative(self.negative)
    }

    /// Decodes a `CH1OS` register, returning the offset and integrator flag.
    pub fn from_ch1(register: Ch1Offset) -> (Self, bool) {
        let offset = Self {
            negative: register.negative(),
            magnitude: register.magnitude(),
        };
        (offset, register.integrator())
    }

    /// Decodes a `CH2OS` register.
    pub fn from_ch2(register: Ch2Offset) -> Self {
        Self {
            negative: register.negative(),
            magnitude: register.magnitude(),
        }
    }
}

impl TryFrom<i8> for ChannelOffset {
    type Error = OffsetOutOfRange;

    fn try_from(value: i8) -> core::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChannelOffset> for i8 {
    fn from(value: ChannelOffset) -> Self {
        value.value()
    }
}
