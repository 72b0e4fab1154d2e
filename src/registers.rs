//! Register map definitions for the ADE7753 energy metering IC.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{FullScale, PgaGain, WaveformRate, WaveformSource};

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Read/write register.
    ReadWrite,
    /// Read-only register whose contents are reset to zero by a read.
    ReadClear,
}

impl RegisterAccess {
    /// Returns `true` when the register accepts writes.
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::ReadWrite)
    }
}

/// ADE7753 register addresses.
///
/// The address, transfer width, significant bits, signedness and access mode
/// of every register are fixed by the datasheet and exposed as `const fn`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Sampled waveform data (channel 1, channel 2 or active power).
    Waveform = 0x01,
    /// Active energy accumulator.
    AEnergy = 0x02,
    /// Active energy accumulator, reset on read.
    RaEnergy = 0x03,
    /// Line-cycle accumulated active energy.
    LaEnergy = 0x04,
    /// Apparent energy accumulator.
    VaEnergy = 0x05,
    /// Apparent energy accumulator, reset on read.
    RvaEnergy = 0x06,
    /// Line-cycle accumulated apparent energy.
    LvaEnergy = 0x07,
    /// Line-cycle accumulated reactive energy.
    LvarEnergy = 0x08,
    /// Mode register.
    Mode = 0x09,
    /// Interrupt enable register.
    IrqEn = 0x0A,
    /// Interrupt status register.
    Status = 0x0B,
    /// Interrupt status register, reset on read.
    RstStatus = 0x0C,
    /// Channel 1 offset adjust (sign-magnitude) and integrator enable.
    Ch1Os = 0x0D,
    /// Channel 2 offset adjust (sign-magnitude).
    Ch2Os = 0x0E,
    /// PGA gain adjust.
    Gain = 0x0F,
    /// Phase calibration.
    PhCal = 0x10,
    /// Active power offset correction.
    APos = 0x11,
    /// Active power gain adjust.
    WGain = 0x12,
    /// Active energy divider.
    WDiv = 0x13,
    /// CF frequency divider numerator.
    CfNum = 0x14,
    /// CF frequency divider denominator.
    CfDen = 0x15,
    /// Channel 1 RMS value.
    Irms = 0x16,
    /// Channel 2 RMS value.
    Vrms = 0x17,
    /// Channel 1 RMS offset correction.
    IrmsOs = 0x18,
    /// Channel 2 RMS offset correction.
    VrmsOs = 0x19,
    /// Apparent gain adjust.
    VaGain = 0x1A,
    /// Apparent energy divider.
    VaDiv = 0x1B,
    /// Line-cycle energy accumulation half-cycle count.
    LineCyc = 0x1C,
    /// Zero-crossing timeout.
    ZxTout = 0x1D,
    /// Sag line cycle count.
    SagCyc = 0x1E,
    /// Sag voltage level.
    SagLvl = 0x1F,
    /// Channel 1 peak level threshold.
    IpkLvl = 0x20,
    /// Channel 2 peak level threshold.
    VpkLvl = 0x21,
    /// Channel 1 peak value.
    IPeak = 0x22,
    /// Channel 1 peak value, reset on read.
    RstIPeak = 0x23,
    /// Channel 2 peak value.
    VPeak = 0x24,
    /// Channel 2 peak value, reset on read.
    RstVPeak = 0x25,
    /// Temperature conversion result.
    Temp = 0x26,
    /// Line period estimated from zero crossings.
    Period = 0x27,
    /// Test mode register.
    TMode = 0x3D,
    /// Checksum of the previous read.
    ChkSum = 0x3E,
    /// Die revision.
    DieRev = 0x3F,
}

impl Register {
    /// Every register in address order.
    pub const ALL: [Register; 42] = [
        Self::Waveform,
        Self::AEnergy,
        Self::RaEnergy,
        Self::LaEnergy,
        Self::VaEnergy,
        Self::RvaEnergy,
        Self::LvaEnergy,
        Self::LvarEnergy,
        Self::Mode,
        Self::IrqEn,
        Self::Status,
        Self::RstStatus,
        Self::Ch1Os,
        Self::Ch2Os,
        Self::Gain,
        Self::PhCal,
        Self::APos,
        Self::WGain,
        Self::WDiv,
        Self::CfNum,
        Self::CfDen,
        Self::Irms,
        Self::Vrms,
        Self::IrmsOs,
        Self::VrmsOs,
        Self::VaGain,
        Self::VaDiv,
        Self::LineCyc,
        Self::ZxTout,
        Self::SagCyc,
        Self::SagLvl,
        Self::IpkLvl,
        Self::VpkLvl,
        Self::IPeak,
        Self::RstIPeak,
        Self::VPeak,
        Self::RstVPeak,
        Self::Temp,
        Self::Period,
        Self::TMode,
        Self::ChkSum,
        Self::DieRev,
    ];

    /// Register address as documented in the datasheet.
    pub const fn address(self) -> u8 {
        self as u8
    }

    /// Looks up a register by address.
    pub fn from_address(address: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|register| register.address() == address)
    }

    /// Number of significant bits held by the register.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Waveform
            | Self::AEnergy
            | Self::RaEnergy
            | Self::LaEnergy
            | Self::VaEnergy
            | Self::RvaEnergy
            | Self::LvaEnergy
            | Self::LvarEnergy
            | Self::Irms
            | Self::Vrms
            | Self::IPeak
            | Self::RstIPeak
            | Self::VPeak
            | Self::RstVPeak => 24,
            Self::Mode
            | Self::IrqEn
            | Self::Status
            | Self::RstStatus
            | Self::APos
            | Self::LineCyc
            | Self::Period => 16,
            Self::WGain
            | Self::CfNum
            | Self::CfDen
            | Self::IrmsOs
            | Self::VrmsOs
            | Self::VaGain
            | Self::ZxTout => 12,
            Self::PhCal | Self::ChkSum => 6,
            Self::Ch1Os
            | Self::Ch2Os
            | Self::Gain
            | Self::WDiv
            | Self::VaDiv
            | Self::SagCyc
            | Self::SagLvl
            | Self::IpkLvl
            | Self::VpkLvl
            | Self::Temp
            | Self::TMode
            | Self::DieRev => 8,
        }
    }

    /// Number of payload bytes moved on the bus for this register.
    pub const fn width(self) -> usize {
        match self.bits() {
            17..=24 => 3,
            9..=16 => 2,
            _ => 1,
        }
    }

    /// Mask covering the significant bits of the register.
    pub const fn mask(self) -> u32 {
        (1u32 << self.bits()) - 1
    }

    /// Access permission classification.
    pub const fn access(self) -> RegisterAccess {
        match self {
            Self::RaEnergy | Self::RvaEnergy | Self::RstStatus | Self::RstIPeak | Self::RstVPeak => {
                RegisterAccess::ReadClear
            }
            Self::Waveform
            | Self::AEnergy
            | Self::LaEnergy
            | Self::VaEnergy
            | Self::LvaEnergy
            | Self::LvarEnergy
            | Self::Status
            | Self::Irms
            | Self::Vrms
            | Self::IPeak
            | Self::VPeak
            | Self::Temp
            | Self::Period
            | Self::ChkSum
            | Self::DieRev => RegisterAccess::ReadOnly,
            _ => RegisterAccess::ReadWrite,
        }
    }

    /// Whether the contents are two's complement.
    ///
    /// `CH1OS` and `CH2OS` are sign-magnitude and report `false`; decode them
    /// with [`ChannelOffset`](crate::offset::ChannelOffset).
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Self::Waveform
                | Self::AEnergy
                | Self::RaEnergy
                | Self::LaEnergy
                | Self::LvarEnergy
                | Self::PhCal
                | Self::APos
                | Self::WGain
                | Self::IrmsOs
                | Self::VrmsOs
                | Self::VaGain
                | Self::Temp
        )
    }

    /// The register whose contents a read of this register also clears.
    pub const fn clears(self) -> Option<Register> {
        match self {
            Self::RaEnergy => Some(Self::AEnergy),
            Self::RvaEnergy => Some(Self::VaEnergy),
            Self::RstStatus => Some(Self::Status),
            Self::RstIPeak => Some(Self::IPeak),
            Self::RstVPeak => Some(Self::VPeak),
            _ => None,
        }
    }

    /// Power-on value of the writable registers.
    pub const fn reset_value(self) -> Option<u32> {
        match self {
            Self::Mode => Some(0x000C),
            Self::IrqEn => Some(0x0040),
            Self::PhCal => Some(0x0D),
            Self::CfNum | Self::CfDen => Some(0x3F),
            Self::LineCyc => Some(0xFFFF),
            Self::ZxTout => Some(0x0FFF),
            Self::SagCyc | Self::IpkLvl | Self::VpkLvl => Some(0xFF),
            _ if self.access().is_writable() => Some(0),
            _ => None,
        }
    }

    /// Sign-extends a raw value read from this register.
    pub const fn sign_extend(self, raw: u32) -> i32 {
        let raw = raw & self.mask();
        if !self.is_signed() {
            return raw as i32;
        }
        let shift = 32 - self.bits() as u32;
        ((raw << shift) as i32) >> shift
    }
}

/// `MODE` register bit masks.
pub mod mode {
    /// High-pass filter in channel 1 disabled.
    pub const DISHPF: u16 = 1 << 0;
    /// LPF2 after the multiplier disabled.
    pub const DISLPF2: u16 = 1 << 1;
    /// CF frequency output disabled.
    pub const DISCF: u16 = 1 << 2;
    /// Line voltage sag detection disabled.
    pub const DISSAG: u16 = 1 << 3;
    /// Both A/D converters suspended.
    pub const ASUSPEND: u16 = 1 << 4;
    /// Start a temperature conversion; self-clearing.
    pub const TEMPSEL: u16 = 1 << 5;
    /// Software chip reset.
    pub const SWRST: u16 = 1 << 6;
    /// Line-cycle energy accumulation mode.
    pub const CYCMODE: u16 = 1 << 7;
    /// Channel 1 inputs shorted.
    pub const DISCH1: u16 = 1 << 8;
    /// Channel 2 inputs shorted.
    pub const DISCH2: u16 = 1 << 9;
    /// Channel 1 and channel 2 inputs swapped.
    pub const SWAP: u16 = 1 << 10;
    /// Waveform update rate selector (two bits).
    pub const DTRT: u16 = 0b11 << 11;
    /// Waveform source selector (two bits).
    pub const WAVSEL: u16 = 0b11 << 13;
    /// Only positive active power accumulated.
    pub const POAM: u16 = 1 << 15;
}

/// Interrupt enable/status bit masks shared by `IRQEN`, `STATUS` and `RSTSTATUS`.
pub mod irq {
    /// Active energy register more than half full.
    pub const AEHF: u16 = 1 << 0;
    /// Line voltage sag.
    pub const SAG: u16 = 1 << 1;
    /// End of line-cycle energy accumulation.
    pub const CYCEND: u16 = 1 << 2;
    /// New waveform sample available.
    pub const WSMP: u16 = 1 << 3;
    /// Zero crossing on the voltage channel.
    pub const ZX: u16 = 1 << 4;
    /// Temperature conversion result available.
    pub const TEMPREADY: u16 = 1 << 5;
    /// End of a hardware or software reset.
    pub const RESET: u16 = 1 << 6;
    /// Active energy register overflow.
    pub const AEOF: u16 = 1 << 7;
    /// Channel 2 sample exceeded `VPKLVL`.
    pub const PKV: u16 = 1 << 8;
    /// Channel 1 sample exceeded `IPKLVL`.
    pub const PKI: u16 = 1 << 9;
    /// Apparent energy register more than half full.
    pub const VAEHF: u16 = 1 << 10;
    /// Apparent energy register overflow.
    pub const VAEOF: u16 = 1 << 11;
    /// Missing zero crossing for `ZXTOUT`.
    pub const ZXTO: u16 = 1 << 12;
    /// Power went from negative to positive.
    pub const PPOS: u16 = 1 << 13;
    /// Power went from positive to negative.
    pub const PNEG: u16 = 1 << 14;
}

/// Bitfield representation of the `MODE` register (address `0x09`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    // Channel 1 high-pass filter disabled (bit 0).
    pub dishpf: bool,
    // LPF2 disabled (bit 1).
    pub dislpf2: bool,
    // CF output disabled (bit 2).
    pub discf: bool,
    // Sag detection disabled (bit 3).
    pub dissag: bool,
    // ADCs suspended (bit 4).
    pub asuspend: bool,
    // Temperature conversion start (bit 5).
    pub tempsel: bool,
    // Software reset (bit 6).
    pub swrst: bool,
    // Line-cycle accumulation mode (bit 7).
    pub cycmode: bool,
    // Channel 1 inputs shorted (bit 8).
    pub disch1: bool,
    // Channel 2 inputs shorted (bit 9).
    pub disch2: bool,
    // Channel inputs swapped (bit 10).
    pub swap: bool,
    // Waveform update rate (bits 12:11).
    pub waveform_rate: WaveformRate,
    // Waveform source (bits 14:13).
    pub waveform_source: WaveformSource,
    // Positive-only accumulation (bit 15).
    pub poam: bool,
}

impl From<u16> for Mode {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<Mode> for u16 {
    fn from(value: Mode) -> Self {
        u16::from_le_bytes(value.into_bytes())
    }
}

/// Bitfield representation of the interrupt flag set (`IRQEN`, `STATUS`, `RSTSTATUS`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptFlags {
    // Active energy half full (bit 0).
    pub aehf: bool,
    // Line voltage sag (bit 1).
    pub sag: bool,
    // Line-cycle accumulation end (bit 2).
    pub cycend: bool,
    // Waveform sample ready (bit 3).
    pub wsmp: bool,
    // Zero crossing (bit 4).
    pub zx: bool,
    // Temperature ready (bit 5).
    pub temp_ready: bool,
    // Reset complete (bit 6).
    pub reset: bool,
    // Active energy overflow (bit 7).
    pub aeof: bool,
    // Voltage peak exceeded (bit 8).
    pub pkv: bool,
    // Current peak exceeded (bit 9).
    pub pki: bool,
    // Apparent energy half full (bit 10).
    pub vaehf: bool,
    // Apparent energy overflow (bit 11).
    pub vaeof: bool,
    // Zero-crossing timeout (bit 12).
    pub zxto: bool,
    // Power negative to positive (bit 13).
    pub ppos: bool,
    // Power positive to negative (bit 14).
    pub pneg: bool,
    #[skip]
    __: B1,
}

impl InterruptFlags {
    /// Returns the raw 16-bit mask.
    pub fn bits(self) -> u16 {
        u16::from(self)
    }

    /// Returns `true` when every bit of `mask` is set.
    pub fn contains(self, mask: u16) -> bool {
        self.bits() & mask == mask
    }

    /// Returns `true` when at least one bit of `mask` is set.
    pub fn intersects(self, mask: u16) -> bool {
        self.bits() & mask != 0
    }

    /// Returns `true` when no flag is set.
    pub fn is_empty(self) -> bool {
        self.bits() == 0
    }
}

impl From<u16> for InterruptFlags {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<InterruptFlags> for u16 {
    fn from(value: InterruptFlags) -> Self {
        u16::from_le_bytes(value.into_bytes())
    }
}

/// Bitfield representation of the `GAIN` register (address `0x0F`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gain {
    // Channel 1 PGA gain (bits 2:0).
    pub ch1_gain: PgaGain,
    // Channel 1 full-scale range (bits 4:3).
    pub full_scale: FullScale,
    // Channel 2 PGA gain (bits 7:5).
    pub ch2_gain: PgaGain,
}

impl From<u8> for Gain {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Gain> for u8 {
    fn from(value: Gain) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `CH1OS` register (address `0x0D`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ch1Offset {
    // Offset magnitude (bits 4:0).
    pub magnitude: B5,
    // Offset sign (bit 5).
    pub negative: bool,
    #[skip]
    __: B1,
    // Digital integrator enable (bit 7).
    pub integrator: bool,
}

impl From<u8> for Ch1Offset {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Ch1Offset> for u8 {
    fn from(value: Ch1Offset) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `CH2OS` register (address `0x0E`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ch2Offset {
    // Offset magnitude (bits 4:0).
    pub magnitude: B5,
    // Offset sign (bit 5).
    pub negative: bool,
    #[skip]
    __: B2,
}

impl From<u8> for Ch2Offset {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Ch2Offset> for u8 {
    fn from(value: Ch2Offset) -> Self {
        value.into_bytes()[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single-bit mode masks paired with their bitfield accessors.
    fn mode_flags() -> [(u16, fn(Mode) -> bool); 12] {
        [
            (mode::DISHPF, |m| m.dishpf()),
            (mode::DISLPF2, |m| m.dislpf2()),
            (mode::DISCF, |m| m.discf()),
            (mode::DISSAG, |m| m.dissag()),
            (mode::ASUSPEND, |m| m.asuspend()),
            (mode::TEMPSEL, |m| m.tempsel()),
            (mode::SWRST, |m| m.swrst()),
            (mode::CYCMODE, |m| m.cycmode()),
            (mode::DISCH1, |m| m.disch1()),
            (mode::DISCH2, |m| m.disch2()),
            (mode::SWAP, |m| m.swap()),
            (mode::POAM, |m| m.poam()),
        ]
    }

    #[test]
    fn register_table_matches_datasheet() {
        assert_eq!(Register::ALL.len(), 42);
        for pair in Register::ALL.windows(2) {
            assert!(pair[0].address() < pair[1].address());
        }
        assert_eq!(Register::Mode.address(), 0x09);
        assert_eq!(Register::Mode.width(), 2);
        assert_eq!(Register::Vrms.width(), 3);
        assert_eq!(Register::ZxTout.width(), 2);
        assert_eq!(Register::ZxTout.mask(), 0x0FFF);
        assert_eq!(Register::PhCal.width(), 1);
        assert_eq!(Register::Temp.width(), 1);
        assert_eq!(Register::RstStatus.access(), RegisterAccess::ReadClear);
        assert_eq!(Register::RstStatus.clears(), Some(Register::Status));
        assert_eq!(Register::Status.access(), RegisterAccess::ReadOnly);
        assert!(Register::LineCyc.access().is_writable());
        assert_eq!(Register::Mode.reset_value(), Some(0x000C));
        assert_eq!(Register::Irms.reset_value(), None);
        assert_eq!(Register::from_address(0x3F), Some(Register::DieRev));
        assert_eq!(Register::from_address(0x28), None);
    }

    #[test]
    fn sign_extension_uses_significant_bits() {
        assert_eq!(Register::LaEnergy.sign_extend(0xFF_FFFF), -1);
        assert_eq!(Register::LaEnergy.sign_extend(0x7F_FFFF), 0x7F_FFFF);
        assert_eq!(Register::WGain.sign_extend(0x0800), -2048);
        assert_eq!(Register::WGain.sign_extend(0xF7FF), 0x07FF);
        assert_eq!(Register::PhCal.sign_extend(0x20), -32);
        assert_eq!(Register::Temp.sign_extend(0xF6), -10);
        assert_eq!(Register::Vrms.sign_extend(0xFF_FFFF), 0xFF_FFFF);
    }

    #[test]
    fn mode_single_flags_are_independent() {
        for base in [0x0000u16, 0xFFFF, 0x000C, 0xA5A5, 0x5A5A] {
            for bit in 0..16 {
                let toggled = base ^ (1 << bit);
                let mode = Mode::from(toggled);
                assert_eq!(u16::from(mode), toggled);

                for (mask, get) in mode_flags() {
                    assert_eq!(get(mode), toggled & mask != 0, "bit {bit} base {base:#06x}");
                }
            }
        }
    }

    #[test]
    fn mode_setters_touch_only_their_bits() {
        for base in [0x0000u16, 0xFFFF, 0x000C, 0xA5A5] {
            let mode = Mode::from(base);
            assert_eq!(u16::from(mode.with_tempsel(true)), base | mode::TEMPSEL);
            assert_eq!(u16::from(mode.with_tempsel(false)), base & !mode::TEMPSEL);
            assert_eq!(u16::from(mode.with_cycmode(true)), base | mode::CYCMODE);
            assert_eq!(u16::from(mode.with_poam(false)), base & !mode::POAM);
            assert_eq!(u16::from(mode.with_dishpf(true)), base | mode::DISHPF);

            let rate = mode.with_waveform_rate(WaveformRate::Clkin512);
            assert_eq!(u16::from(rate) & !mode::DTRT, base & !mode::DTRT);
            assert_eq!(u16::from(rate) & mode::DTRT, 0b10 << 11);

            let source = mode.with_waveform_source(WaveformSource::Channel2);
            assert_eq!(u16::from(source) & !mode::WAVSEL, base & !mode::WAVSEL);
            assert_eq!(u16::from(source) & mode::WAVSEL, 0b11 << 13);
        }
    }

    #[test]
    fn mode_masks_cover_the_word_without_overlap() {
        let mut union = 0u16;
        for (mask, _) in mode_flags() {
            assert_eq!(union & mask, 0);
            union |= mask;
        }
        assert_eq!(union & (mode::DTRT | mode::WAVSEL), 0);
        assert_eq!(union | mode::DTRT | mode::WAVSEL, 0xFFFF);
    }

    #[test]
    fn interrupt_flag_masks_follow_set_laws() {
        let a = InterruptFlags::from(irq::ZX | irq::SAG);
        let b = InterruptFlags::from(irq::ZX | irq::TEMPREADY);
        let union = InterruptFlags::from(a.bits() | b.bits());
        let intersection = InterruptFlags::from(a.bits() & b.bits());

        assert!(union.contains(a.bits()));
        assert!(union.contains(b.bits()));
        assert_eq!(intersection.bits(), irq::ZX);
        assert!(a.intersects(b.bits()));
        assert!(!a.contains(irq::TEMPREADY));
        assert!(InterruptFlags::from(0).is_empty());

        let status = InterruptFlags::from(irq::ZX | irq::TEMPREADY | irq::PNEG);
        assert!(status.zx());
        assert!(status.temp_ready());
        assert!(status.pneg());
        assert!(!status.reset());
        assert_eq!(u16::from(status), irq::ZX | irq::TEMPREADY | irq::PNEG);
    }

    #[test]
    fn gain_packs_three_fields_into_one_byte() {
        let gain = Gain::new()
            .with_ch1_gain(PgaGain::X16)
            .with_full_scale(FullScale::V0_125)
            .with_ch2_gain(PgaGain::X2);

        assert_eq!(u8::from(gain), 0b001_10_100);
        let decoded = Gain::from(0b001_10_100);
        assert_eq!(decoded.ch1_gain(), PgaGain::X16);
        assert_eq!(decoded.full_scale(), FullScale::V0_125);
        assert_eq!(decoded.ch2_gain(), PgaGain::X2);
        assert!(Gain::from(0b111).ch1_gain_or_err().is_err());
    }

    #[test]
    fn offset_layouts_match_datasheet() {
        let ch1 = Ch1Offset::from(0b1010_0011);
        assert_eq!(ch1.magnitude(), 3);
        assert!(ch1.negative());
        assert!(ch1.integrator());

        let ch2 = Ch2Offset::new().with_magnitude(31).with_negative(true);
        assert_eq!(u8::from(ch2), 0b0011_1111);
    }
}
