//! Strongly typed parameter enumerations for the ADE7753 driver.
//!
//! These enums map directly to datasheet field encodings and are used by the
//! register bitfields and the setup structures. Prefer these types over raw
//! integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use ade7753::params::{FullScale, PgaGain, WaveformSource};
//!
//! let gain = PgaGain::X4;
//! let scale = FullScale::V0_25;
//! let source = WaveformSource::Channel1;
//! let _ = (gain, scale, source);
//! ```

use modular_bitfield::prelude::Specifier;

/// Programmable gain amplifier selection (`GAIN[2:0]` and `GAIN[7:5]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum PgaGain {
    /// Gain of 1.
    X1 = 0b000,
    /// Gain of 2.
    X2 = 0b001,
    /// Gain of 4.
    X4 = 0b010,
    /// Gain of 8.
    X8 = 0b011,
    /// Gain of 16.
    X16 = 0b100,
}

impl PgaGain {
    /// Returns the linear gain factor.
    pub const fn factor(self) -> u8 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
            Self::X16 => 16,
        }
    }
}

/// Channel 1 full-scale input range (`GAIN[4:3]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum FullScale {
    /// 0.5 V full scale.
    V0_5 = 0b00,
    /// 0.25 V full scale.
    V0_25 = 0b01,
    /// 0.125 V full scale.
    V0_125 = 0b10,
}

impl FullScale {
    /// Returns the full-scale range in millivolts.
    pub const fn millivolts(self) -> u16 {
        match self {
            Self::V0_5 => 500,
            Self::V0_25 => 250,
            Self::V0_125 => 125,
        }
    }
}

/// Waveform register update rate (`MODE[12:11]`, DTRT1..0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum WaveformRate {
    /// CLKIN/128, 27.9 kSPS at 3.58 MHz.
    Clkin128 = 0b00,
    /// CLKIN/256, 14 kSPS at 3.58 MHz.
    Clkin256 = 0b01,
    /// CLKIN/512, 7 kSPS at 3.58 MHz.
    Clkin512 = 0b10,
    /// CLKIN/1024, 3.5 kSPS at 3.58 MHz.
    Clkin1024 = 0b11,
}

impl WaveformRate {
    /// Returns the CLKIN divider applied to the waveform sample rate.
    pub const fn divider(self) -> u16 {
        match self {
            Self::Clkin128 => 128,
            Self::Clkin256 => 256,
            Self::Clkin512 => 512,
            Self::Clkin1024 => 1_024,
        }
    }
}

/// Waveform register data source (`MODE[14:13]`, WAVSEL1..0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum WaveformSource {
    /// 24-bit active power signal (output of LPF2).
    ActivePower = 0b00,
    /// Reserved encoding.
    Reserved = 0b01,
    /// 24-bit channel 1 samples.
    Channel1 = 0b10,
    /// 24-bit channel 2 samples.
    Channel2 = 0b11,
}

/// RMS measurement channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RmsChannel {
    /// Channel 1 (current) RMS, `IRMS`.
    Current,
    /// Channel 2 (voltage) RMS, `VRMS`.
    Voltage,
}
