//! Calibration and threshold parameter sets written by the multi-register setters.
//!
//! Values are raw register codes. Nothing is range checked beyond the
//! significant-bit mask of the destination register; translating physical
//! quantities into these codes is left to the caller.

use crate::offset::ChannelOffset;
use crate::params::{FullScale, PgaGain};
use crate::registers::Gain;

/// Energy calibration (`WGAIN`, `WDIV`, `APOS`, `VAGAIN`, `VADIV`, `PHCAL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EnergySetup {
    /// Active power gain, 12-bit two's complement.
    pub active_power_gain: i16,
    /// Active energy divider.
    pub active_energy_divider: u8,
    /// Active power offset, 16-bit two's complement.
    pub active_power_offset: i16,
    /// Apparent power gain, 12-bit two's complement.
    pub apparent_power_gain: i16,
    /// Apparent energy divider.
    pub apparent_energy_divider: u8,
    /// Phase calibration code, 6 bits.
    pub phase_calibration: u8,
}

/// CF pulse output divider (`CFNUM`, `CFDEN`), both 12 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrequencySetup {
    /// Numerator.
    pub numerator: u16,
    /// Denominator.
    pub denominator: u16,
}

impl Default for FrequencySetup {
    fn default() -> Self {
        Self {
            numerator: 0x3F,
            denominator: 0x3F,
        }
    }
}

/// Analog front end (`GAIN`, `CH1OS`, `CH2OS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogSetup {
    /// Channel 1 PGA gain.
    pub ch1_gain: PgaGain,
    /// Channel 2 PGA gain.
    pub ch2_gain: PgaGain,
    /// Channel 1 full-scale range.
    pub full_scale: FullScale,
    /// Channel 1 offset.
    pub ch1_offset: ChannelOffset,
    /// Channel 2 offset.
    pub ch2_offset: ChannelOffset,
    /// Channel 1 digital integrator (di/dt sensors).
    pub integrator: bool,
}

impl AnalogSetup {
    /// Encodes the `GAIN` register.
    pub fn gain(&self) -> Gain {
        Gain::new()
            .with_ch1_gain(self.ch1_gain)
            .with_full_scale(self.full_scale)
            .with_ch2_gain(self.ch2_gain)
    }
}

impl Default for AnalogSetup {
    fn default() -> Self {
        Self {
            ch1_gain: PgaGain::X1,
            ch2_gain: PgaGain::X1,
            full_scale: FullScale::V0_5,
            ch1_offset: ChannelOffset::ZERO,
            ch2_offset: ChannelOffset::ZERO,
            integrator: false,
        }
    }
}

/// RMS offset correction (`IRMSOS`, `VRMSOS`), 12-bit two's complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RmsOffsets {
    /// Channel 1 (current) RMS offset.
    pub current: i16,
    /// Channel 2 (voltage) RMS offset.
    pub voltage: i16,
}

/// Detection thresholds and test mode (`ZXTOUT`, `SAGCYC`, `SAGLVL`, `IPKLVL`, `VPKLVL`, `TMODE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MiscSetup {
    /// Zero-crossing timeout, 12 bits.
    pub zero_crossing_timeout: u16,
    /// Line cycles below `sag_level` before SAG asserts.
    pub sag_cycles: u8,
    /// Sag detection level.
    pub sag_level: u8,
    /// Channel 1 peak threshold.
    pub current_peak_level: u8,
    /// Channel 2 peak threshold.
    pub voltage_peak_level: u8,
    /// Test mode register; leave at zero in normal operation.
    pub test_mode: u8,
}

impl Default for MiscSetup {
    fn default() -> Self {
        Self {
            zero_crossing_timeout: 0x0FFF,
            sag_cycles: 0xFF,
            sag_level: 0,
            current_peak_level: 0xFF,
            voltage_peak_level: 0xFF,
            test_mode: 0,
        }
    }
}
