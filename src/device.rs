//! High-level ADE7753 device driver implementation.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiDevice;

use crate::acquisition::{self, Acquisition, AveragedRms, LineCycleEnergy, NoWatchdog, WaitOutcome, Watchdog};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::interface::spi::SpiInterface;
use crate::interface::Ade7753Interface;
use crate::offset::ChannelOffset;
use crate::params::RmsChannel;
use crate::registers::{
    irq,
    mode,
    Ch1Offset,
    Ch2Offset,
    Gain,
    InterruptFlags,
    Mode,
    Register,
    RegisterAccess,
};
use crate::setup::{AnalogSetup, EnergySetup, FrequencySetup, MiscSetup, RmsOffsets};

// Datasheet recovery time after a software reset (microseconds).
const SOFT_RESET_RECOVERY_US: u32 = 18;

/// Number of registers whose read has no side effect.
pub const DUMPED_REGISTER_COUNT: usize = 37;

/// One entry of a register dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterValue {
    /// Register that was read.
    pub register: Register,
    /// Raw contents, masked to the significant bits.
    pub raw: u32,
}

/// High-level synchronous driver for the ADE7753 energy metering IC.
///
/// The driver owns the bus, a delay provider used to space status polls and
/// an optional watchdog fed whenever a wait gives up.
pub struct Ade7753<IFACE, D, W = NoWatchdog> {
    interface: IFACE,
    delay: D,
    watchdog: W,
    config: Config,
}

impl<IFACE, D> Ade7753<IFACE, D, NoWatchdog> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    pub fn new(interface: IFACE, delay: D, config: Config) -> Self {
        Self {
            interface,
            delay,
            watchdog: NoWatchdog,
            config,
        }
    }
}

impl<IFACE, D, W> Ade7753<IFACE, D, W> {
    /// Replaces the watchdog fed on wait timeouts.
    pub fn with_watchdog<W2: Watchdog>(self, watchdog: W2) -> Ade7753<IFACE, D, W2> {
        Ade7753 {
            interface: self.interface,
            delay: self.delay,
            watchdog,
            config: self.config,
        }
    }

    /// Consumes the driver and returns the owned bus, delay and watchdog.
    pub fn release(self) -> (IFACE, D, W) {
        (self.interface, self.delay, self.watchdog)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<SPI, D> Ade7753<SpiInterface<SPI>, D, NoWatchdog>
where
    SPI: SpiDevice,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for SPI transports.
    pub fn new_spi(spi: SPI, delay: D, config: Config) -> Self {
        Self::new(SpiInterface::new(spi), delay, config)
    }
}

impl<SPI, D, W> Ade7753<SpiInterface<SPI>, D, W>
where
    SPI: SpiDevice,
{
    /// Releases the driver, returning the SPI device, delay and watchdog.
    pub fn release_spi(self) -> (SPI, D, W) {
        let (iface, delay, watchdog) = self.release();
        (iface.release(), delay, watchdog)
    }
}

impl<IFACE, D, W, CommE> Ade7753<IFACE, D, W>
where
    IFACE: Ade7753Interface<Error = CommE>,
    D: DelayNs,
    W: Watchdog,
{
    // ==================================================================
    // == Initialization & Global Configuration ==========================
    // ==================================================================
    /// Validates the configuration and resets the chip.
    pub fn init(&mut self) -> Result<(), CommE> {
        self.config.validate().map_err(|_| Error::InvalidConfig)?;
        self.soft_reset()
    }

    /// Replaces the driver configuration after validating it.
    pub fn configure(&mut self, config: Config) -> Result<(), CommE> {
        config.validate().map_err(|_| Error::InvalidConfig)?;
        self.config = config;
        Ok(())
    }

    /// Sets `SWRST` and waits for the chip to come back.
    ///
    /// Every writable register returns to its power-on value.
    pub fn soft_reset(&mut self) -> Result<(), CommE> {
        let current = self.mode()?;
        self.set_mode(current.with_swrst(true))?;
        self.delay.delay_us(SOFT_RESET_RECOVERY_US);
        Ok(())
    }

    // ==================================================================
    // == Register Access ================================================
    // ==================================================================
    /// Reads a register, masked to its significant bits.
    pub fn read(&mut self, register: Register) -> Result<u32, CommE> {
        let address = register.address();
        let raw = match register.width() {
            1 => u32::from(self.interface.read8(address)?),
            2 => u32::from(self.interface.read16(address)?),
            _ => self.interface.read24(address)?,
        };
        Ok(raw & register.mask())
    }

    /// Reads a register and sign-extends it when its contents are two's complement.
    pub fn read_signed(&mut self, register: Register) -> Result<i32, CommE> {
        let raw = self.read(register)?;
        Ok(register.sign_extend(raw))
    }

    /// Writes the significant bits of `value` to a writable register.
    pub fn write(&mut self, register: Register, value: u32) -> Result<(), CommE> {
        if !register.access().is_writable() {
            return Err(Error::ReadOnlyRegister(register));
        }

        let value = value & register.mask();
        debug!("write {} <- {=u32:#x}", register, value);

        let address = register.address();
        match register.width() {
            1 => self.interface.write8(address, value as u8)?,
            2 => self.interface.write16(address, value as u16)?,
            _ => self.interface.write24(address, value)?,
        }
        Ok(())
    }

    /// Returns an image of every register whose read has no side effect.
    ///
    /// Each entry is also logged at debug level.
    pub fn dump_registers(&mut self) -> Result<[RegisterValue; DUMPED_REGISTER_COUNT], CommE> {
        let mut dump = [RegisterValue {
            register: Register::Waveform,
            raw: 0,
        }; DUMPED_REGISTER_COUNT];

        let readable = Register::ALL
            .into_iter()
            .filter(|register| register.access() != RegisterAccess::ReadClear);
        for (slot, register) in dump.iter_mut().zip(readable) {
            let raw = self.read(register)?;
            debug!("{} = {=u32:#x}", register, raw);
            *slot = RegisterValue { register, raw };
        }

        Ok(dump)
    }

    // ==================================================================
    // == Mode Control ===================================================
    // ==================================================================
    /// Reads the `MODE` register.
    pub fn mode(&mut self) -> Result<Mode, CommE> {
        Ok(Mode::from(self.read_u16(Register::Mode)?))
    }

    /// Writes the whole `MODE` register.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), CommE> {
        self.write(Register::Mode, u32::from(u16::from(mode)))
    }

    /// Read-modify-write of `MODE`; the write is skipped when nothing changed.
    pub fn update_mode<F>(&mut self, mutate: F) -> Result<Mode, CommE>
    where
        F: FnOnce(&mut Mode),
    {
        let current = self.mode()?;
        let mut updated = current;
        mutate(&mut updated);

        if updated != current {
            self.set_mode(updated)?;
        }
        Ok(updated)
    }

    /// Runs `scope` with `MODE` temporarily set to `transient`.
    ///
    /// The prior value is written back on every exit path, including a failure
    /// inside `scope`. The first error encountered is the one returned.
    pub fn with_mode<T, F>(&mut self, transient: Mode, scope: F) -> Result<T, CommE>
    where
        F: FnOnce(&mut Self) -> Result<T, CommE>,
    {
        let prior = self.mode()?;
        let outcome = self.set_mode(transient).and_then(|()| scope(self));
        let restored = self.set_mode(prior);

        let value = outcome?;
        restored?;
        Ok(value)
    }

    // ==================================================================
    // == Interrupts =====================================================
    // ==================================================================
    /// Writes the `IRQEN` mask (bits from [`irq`]).
    pub fn set_interrupt_mask(&mut self, mask: u16) -> Result<(), CommE> {
        self.write(Register::IrqEn, u32::from(mask))
    }

    /// Reads the `IRQEN` mask.
    pub fn enabled_interrupts(&mut self) -> Result<InterruptFlags, CommE> {
        Ok(InterruptFlags::from(self.read_u16(Register::IrqEn)?))
    }

    /// Reads `STATUS` without clearing it.
    pub fn interrupt_status(&mut self) -> Result<InterruptFlags, CommE> {
        Ok(InterruptFlags::from(self.read_u16(Register::Status)?))
    }

    /// Reads `RSTSTATUS`, which returns the pending flags and clears them.
    pub fn reset_interrupt_status(&mut self) -> Result<InterruptFlags, CommE> {
        Ok(InterruptFlags::from(self.read_u16(Register::RstStatus)?))
    }

    // ==================================================================
    // == Synchronised Acquisition =======================================
    // ==================================================================
    /// Clears pending flags and polls until a flag in `mask` is raised.
    ///
    /// A timeout feeds the watchdog and is reported as [`WaitOutcome::TimedOut`].
    /// A configuration with a zero poll interval fails with [`Error::InvalidConfig`].
    pub fn wait_for(&mut self, mask: u16) -> Result<WaitOutcome, CommE> {
        acquisition::wait_for_flags(
            &mut self.interface,
            &mut self.delay,
            &mut self.watchdog,
            &self.config,
            mask,
        )
    }

    /// Waits for a flag in `mask`, then reads `register` whatever the outcome.
    pub fn read_synced(&mut self, mask: u16, register: Register) -> Result<Acquisition<u32>, CommE> {
        let outcome = self.wait_for(mask)?;
        let value = self.read(register)?;
        Ok(Acquisition::new(outcome, value))
    }

    /// Reads an RMS register right after a zero crossing.
    pub fn rms(&mut self, channel: RmsChannel) -> Result<Acquisition<u32>, CommE> {
        let register = match channel {
            RmsChannel::Current => Register::Irms,
            RmsChannel::Voltage => Register::Vrms,
        };
        self.read_synced(irq::ZX, register)
    }

    /// Channel 1 RMS synchronised to a zero crossing.
    pub fn irms(&mut self) -> Result<Acquisition<u32>, CommE> {
        self.rms(RmsChannel::Current)
    }

    /// Channel 2 RMS synchronised to a zero crossing.
    pub fn vrms(&mut self) -> Result<Acquisition<u32>, CommE> {
        self.rms(RmsChannel::Voltage)
    }

    /// Averages a burst of synchronised RMS reads.
    ///
    /// The first `discard_samples` reads are thrown away and the truncated mean
    /// of the next `average_samples` is returned.
    pub fn average_rms(&mut self, channel: RmsChannel) -> Result<AveragedRms, CommE> {
        let Config {
            discard_samples,
            average_samples,
            ..
        } = self.config;
        acquisition::average(discard_samples, average_samples, || self.rms(channel))
    }

    /// Averaged channel 1 RMS.
    pub fn average_irms(&mut self) -> Result<AveragedRms, CommE> {
        self.average_rms(RmsChannel::Current)
    }

    /// Averaged channel 2 RMS.
    pub fn average_vrms(&mut self) -> Result<AveragedRms, CommE> {
        self.average_rms(RmsChannel::Voltage)
    }

    /// Runs a temperature conversion and returns the signed `TEMP` reading.
    ///
    /// `MODE` is set to `TEMPSEL` alone for the conversion and restored afterwards.
    pub fn temperature(&mut self) -> Result<Acquisition<i8>, CommE> {
        let transient = Mode::from(mode::TEMPSEL);
        let raw = self.with_mode(transient, |dev| dev.read_synced(irq::TEMPREADY, Register::Temp))?;
        Ok(raw.map(|raw| Register::Temp.sign_extend(raw) as i8))
    }

    /// Waits for the end of a line-cycle accumulation and reads the three
    /// line-cycle energy registers.
    ///
    /// `CYCMODE` must already be enabled and `LINECYC` programmed.
    pub fn read_line_cycle_energy(&mut self) -> Result<Acquisition<LineCycleEnergy>, CommE> {
        let outcome = self.wait_for(irq::CYCEND)?;
        let energy = LineCycleEnergy {
            active: self.read_signed(Register::LaEnergy)?,
            apparent: self.read(Register::LvaEnergy)?,
            reactive: self.read_signed(Register::LvarEnergy)?,
        };
        Ok(Acquisition::new(outcome, energy))
    }

    // ==================================================================
    // == Measurements ===================================================
    // ==================================================================
    /// Active energy accumulator.
    pub fn active_energy(&mut self) -> Result<i32, CommE> {
        self.read_signed(Register::AEnergy)
    }

    /// Active energy accumulator; the read resets it.
    pub fn active_energy_reset(&mut self) -> Result<i32, CommE> {
        self.read_signed(Register::RaEnergy)
    }

    /// Active energy accumulated over the last `LINECYC` half cycles.
    pub fn line_active_energy(&mut self) -> Result<i32, CommE> {
        self.read_signed(Register::LaEnergy)
    }

    /// Apparent energy accumulator.
    pub fn apparent_energy(&mut self) -> Result<u32, CommE> {
        self.read(Register::VaEnergy)
    }

    /// Apparent energy accumulator; the read resets it.
    pub fn apparent_energy_reset(&mut self) -> Result<u32, CommE> {
        self.read(Register::RvaEnergy)
    }

    /// Apparent energy accumulated over the last `LINECYC` half cycles.
    pub fn line_apparent_energy(&mut self) -> Result<u32, CommE> {
        self.read(Register::LvaEnergy)
    }

    /// Reactive energy accumulated over the last `LINECYC` half cycles.
    pub fn line_reactive_energy(&mut self) -> Result<i32, CommE> {
        self.read_signed(Register::LvarEnergy)
    }

    /// Latest waveform sample selected by `MODE.WAVSEL`.
    pub fn waveform(&mut self) -> Result<i32, CommE> {
        self.read_signed(Register::Waveform)
    }

    /// Channel 1 peak since the last reset read.
    pub fn current_peak(&mut self) -> Result<u32, CommE> {
        self.read(Register::IPeak)
    }

    /// Channel 1 peak; the read resets it.
    pub fn current_peak_reset(&mut self) -> Result<u32, CommE> {
        self.read(Register::RstIPeak)
    }

    /// Channel 2 peak since the last reset read.
    pub fn voltage_peak(&mut self) -> Result<u32, CommE> {
        self.read(Register::VPeak)
    }

    /// Channel 2 peak; the read resets it.
    pub fn voltage_peak_reset(&mut self) -> Result<u32, CommE> {
        self.read(Register::RstVPeak)
    }

    /// Line period.
    pub fn period(&mut self) -> Result<u16, CommE> {
        self.read_u16(Register::Period)
    }

    /// Checksum of the previous read transfer.
    pub fn checksum(&mut self) -> Result<u8, CommE> {
        self.read_u8(Register::ChkSum)
    }

    /// Die revision.
    pub fn die_revision(&mut self) -> Result<u8, CommE> {
        self.read_u8(Register::DieRev)
    }

    // ==================================================================
    // == Calibration Getters ============================================
    // ==================================================================
    /// Reads the energy calibration registers.
    pub fn energy_setup(&mut self) -> Result<EnergySetup, CommE> {
        Ok(EnergySetup {
            active_power_gain: self.active_power_gain()?,
            active_energy_divider: self.active_energy_divider()?,
            active_power_offset: self.active_power_offset()?,
            apparent_power_gain: self.apparent_power_gain()?,
            apparent_energy_divider: self.apparent_energy_divider()?,
            phase_calibration: self.phase_calibration()?,
        })
    }

    /// Reads `CFNUM` and `CFDEN`.
    pub fn frequency_setup(&mut self) -> Result<FrequencySetup, CommE> {
        Ok(FrequencySetup {
            numerator: self.cf_numerator()?,
            denominator: self.cf_denominator()?,
        })
    }

    /// Reads and decodes `GAIN`, `CH1OS` and `CH2OS`.
    pub fn analog_setup(&mut self) -> Result<AnalogSetup, CommE> {
        let gain = self.gain()?;
        let (ch1_offset, integrator) = self.ch1_offset()?;
        let ch2_offset = self.ch2_offset()?;

        Ok(AnalogSetup {
            ch1_gain: gain
                .ch1_gain_or_err()
                .map_err(|_| Error::UnexpectedValue(Register::Gain))?,
            ch2_gain: gain
                .ch2_gain_or_err()
                .map_err(|_| Error::UnexpectedValue(Register::Gain))?,
            full_scale: gain
                .full_scale_or_err()
                .map_err(|_| Error::UnexpectedValue(Register::Gain))?,
            ch1_offset,
            ch2_offset,
            integrator,
        })
    }

    /// Reads the RMS offset corrections.
    pub fn rms_offsets(&mut self) -> Result<RmsOffsets, CommE> {
        Ok(RmsOffsets {
            current: self.read_i16(Register::IrmsOs)?,
            voltage: self.read_i16(Register::VrmsOs)?,
        })
    }

    /// Reads the detection thresholds and test mode.
    pub fn misc_setup(&mut self) -> Result<MiscSetup, CommE> {
        Ok(MiscSetup {
            zero_crossing_timeout: self.zero_crossing_timeout()?,
            sag_cycles: self.sag_cycles()?,
            sag_level: self.sag_level()?,
            current_peak_level: self.current_peak_level()?,
            voltage_peak_level: self.voltage_peak_level()?,
            test_mode: self.read_u8(Register::TMode)?,
        })
    }

    /// Raw `GAIN` register.
    pub fn gain(&mut self) -> Result<Gain, CommE> {
        Ok(Gain::from(self.read_u8(Register::Gain)?))
    }

    /// Channel 1 offset and digital integrator flag.
    pub fn ch1_offset(&mut self) -> Result<(ChannelOffset, bool), CommE> {
        let raw = Ch1Offset::from(self.read_u8(Register::Ch1Os)?);
        Ok(ChannelOffset::from_ch1(raw))
    }

    /// Channel 2 offset.
    pub fn ch2_offset(&mut self) -> Result<ChannelOffset, CommE> {
        let raw = Ch2Offset::from(self.read_u8(Register::Ch2Os)?);
        Ok(ChannelOffset::from_ch2(raw))
    }

    /// Phase calibration code (6 bits).
    pub fn phase_calibration(&mut self) -> Result<u8, CommE> {
        self.read_u8(Register::PhCal)
    }

    /// Active power offset `APOS`, 16-bit two's complement.
    pub fn active_power_offset(&mut self) -> Result<i16, CommE> {
        self.read_i16(Register::APos)
    }

    /// Active power gain `WGAIN`, 12-bit two's complement.
    pub fn active_power_gain(&mut self) -> Result<i16, CommE> {
        self.read_i16(Register::WGain)
    }

    /// Active energy divider `WDIV`.
    pub fn active_energy_divider(&mut self) -> Result<u8, CommE> {
        self.read_u8(Register::WDiv)
    }

    /// Apparent power gain `VAGAIN`, 12-bit two's complement.
    pub fn apparent_power_gain(&mut self) -> Result<i16, CommE> {
        self.read_i16(Register::VaGain)
    }

    /// Apparent energy divider `VADIV`.
    pub fn apparent_energy_divider(&mut self) -> Result<u8, CommE> {
        self.read_u8(Register::VaDiv)
    }

    /// CF divider numerator `CFNUM`, 12 bits.
    pub fn cf_numerator(&mut self) -> Result<u16, CommE> {
        self.read_u16(Register::CfNum)
    }

    /// CF divider denominator `CFDEN`, 12 bits.
    pub fn cf_denominator(&mut self) -> Result<u16, CommE> {
        self.read_u16(Register::CfDen)
    }

    /// Half line cycles per line-cycle accumulation.
    pub fn line_cycles(&mut self) -> Result<u16, CommE> {
        self.read_u16(Register::LineCyc)
    }

    /// Zero-crossing timeout `ZXTOUT`, 12 bits.
    pub fn zero_crossing_timeout(&mut self) -> Result<u16, CommE> {
        self.read_u16(Register::ZxTout)
    }

    /// Half cycles below the sag level before `SAG` asserts (`SAGCYC`).
    pub fn sag_cycles(&mut self) -> Result<u8, CommE> {
        self.read_u8(Register::SagCyc)
    }

    /// Sag detection level `SAGLVL`.
    pub fn sag_level(&mut self) -> Result<u8, CommE> {
        self.read_u8(Register::SagLvl)
    }

    /// Channel 1 peak threshold `IPKLVL`.
    pub fn current_peak_level(&mut self) -> Result<u8, CommE> {
        self.read_u8(Register::IpkLvl)
    }

    /// Channel 2 peak threshold `VPKLVL`.
    pub fn voltage_peak_level(&mut self) -> Result<u8, CommE> {
        self.read_u8(Register::VpkLvl)
    }

    // ==================================================================
    // == Calibration Setters ============================================
    // ==================================================================
    /// Programs `WGAIN`, `WDIV`, `APOS`, `VAGAIN`, `VADIV` and `PHCAL` in that order.
    pub fn set_energy_setup(&mut self, setup: &EnergySetup) -> Result<(), CommE> {
        self.set_active_power_gain(setup.active_power_gain)?;
        self.set_active_energy_divider(setup.active_energy_divider)?;
        self.set_active_power_offset(setup.active_power_offset)?;
        self.set_apparent_power_gain(setup.apparent_power_gain)?;
        self.set_apparent_energy_divider(setup.apparent_energy_divider)?;
        self.set_phase_calibration(setup.phase_calibration)
    }

    /// Programs the active and apparent power gains together.
    pub fn set_energy_gains(&mut self, active: i16, apparent: i16) -> Result<(), CommE> {
        self.set_active_power_gain(active)?;
        self.set_apparent_power_gain(apparent)
    }

    /// Programs the CF output divider.
    pub fn set_frequency_setup(&mut self, setup: &FrequencySetup) -> Result<(), CommE> {
        self.set_cf_numerator(setup.numerator)?;
        self.set_cf_denominator(setup.denominator)
    }

    /// Programs `GAIN`, `CH1OS` and `CH2OS`.
    pub fn set_analog_setup(&mut self, setup: &AnalogSetup) -> Result<(), CommE> {
        self.set_gain(setup.gain())?;
        self.set_ch1_offset(setup.ch1_offset, setup.integrator)?;
        self.set_ch2_offset(setup.ch2_offset)
    }

    /// Programs `IRMSOS` and `VRMSOS`.
    pub fn set_rms_offsets(&mut self, offsets: &RmsOffsets) -> Result<(), CommE> {
        self.write_i16(Register::IrmsOs, offsets.current)?;
        self.write_i16(Register::VrmsOs, offsets.voltage)
    }

    /// Programs the detection thresholds and test mode.
    pub fn set_misc_setup(&mut self, setup: &MiscSetup) -> Result<(), CommE> {
        self.set_zero_crossing_timeout(setup.zero_crossing_timeout)?;
        self.set_sag_cycles(setup.sag_cycles)?;
        self.set_sag_level(setup.sag_level)?;
        self.set_current_peak_level(setup.current_peak_level)?;
        self.set_voltage_peak_level(setup.voltage_peak_level)?;
        self.write(Register::TMode, u32::from(setup.test_mode))
    }

    /// Writes the `GAIN` register.
    pub fn set_gain(&mut self, gain: Gain) -> Result<(), CommE> {
        self.write(Register::Gain, u32::from(u8::from(gain)))
    }

    /// Writes `CH1OS`, keeping `integrator` in bit 7.
    pub fn set_ch1_offset(&mut self, offset: ChannelOffset, integrator: bool) -> Result<(), CommE> {
        self.write(Register::Ch1Os, u32::from(u8::from(offset.to_ch1(integrator))))
    }

    /// Writes `CH2OS`.
    pub fn set_ch2_offset(&mut self, offset: ChannelOffset) -> Result<(), CommE> {
        self.write(Register::Ch2Os, u32::from(u8::from(offset.to_ch2())))
    }

    /// Writes both channel offsets, rejecting magnitudes above 31.
    ///
    /// Nothing is written when either value is out of range.
    pub fn set_channel_offsets(&mut self, ch1: i8, ch2: i8, integrator: bool) -> Result<(), CommE> {
        let ch1 = ChannelOffset::new(ch1).map_err(|_| Error::OffsetOutOfRange)?;
        let ch2 = ChannelOffset::new(ch2).map_err(|_| Error::OffsetOutOfRange)?;
        self.set_ch1_offset(ch1, integrator)?;
        self.set_ch2_offset(ch2)
    }

    /// Phase calibration code; only the low six bits are kept.
    pub fn set_phase_calibration(&mut self, code: u8) -> Result<(), CommE> {
        self.write(Register::PhCal, u32::from(code))
    }

    /// Active power offset `APOS`, 16-bit two's complement.
    pub fn set_active_power_offset(&mut self, offset: i16) -> Result<(), CommE> {
        self.write_i16(Register::APos, offset)
    }

    /// Active power gain; 12-bit two's complement.
    pub fn set_active_power_gain(&mut self, gain: i16) -> Result<(), CommE> {
        self.write_i16(Register::WGain, gain)
    }

    /// Active energy divider `WDIV`.
    pub fn set_active_energy_divider(&mut self, divider: u8) -> Result<(), CommE> {
        self.write(Register::WDiv, u32::from(divider))
    }

    /// Apparent power gain; 12-bit two's complement.
    pub fn set_apparent_power_gain(&mut self, gain: i16) -> Result<(), CommE> {
        self.write_i16(Register::VaGain, gain)
    }

    /// Apparent energy divider `VADIV`.
    pub fn set_apparent_energy_divider(&mut self, divider: u8) -> Result<(), CommE> {
        self.write(Register::VaDiv, u32::from(divider))
    }

    /// CF divider numerator `CFNUM`; only the low 12 bits are kept.
    pub fn set_cf_numerator(&mut self, numerator: u16) -> Result<(), CommE> {
        self.write(Register::CfNum, u32::from(numerator))
    }

    /// CF divider denominator `CFDEN`; only the low 12 bits are kept.
    pub fn set_cf_denominator(&mut self, denominator: u16) -> Result<(), CommE> {
        self.write(Register::CfDen, u32::from(denominator))
    }

    /// Channel 1 RMS offset `IRMSOS`, 12-bit two's complement.
    pub fn set_current_rms_offset(&mut self, offset: i16) -> Result<(), CommE> {
        self.write_i16(Register::IrmsOs, offset)
    }

    /// Channel 2 RMS offset `VRMSOS`, 12-bit two's complement.
    pub fn set_voltage_rms_offset(&mut self, offset: i16) -> Result<(), CommE> {
        self.write_i16(Register::VrmsOs, offset)
    }

    /// Half line cycles per line-cycle accumulation.
    pub fn set_line_cycles(&mut self, half_cycles: u16) -> Result<(), CommE> {
        self.write(Register::LineCyc, u32::from(half_cycles))
    }

    /// Zero-crossing timeout; only the low 12 bits are kept.
    pub fn set_zero_crossing_timeout(&mut self, timeout: u16) -> Result<(), CommE> {
        self.write(Register::ZxTout, u32::from(timeout))
    }

    /// Half cycles below the sag level before `SAG` asserts (`SAGCYC`).
    pub fn set_sag_cycles(&mut self, cycles: u8) -> Result<(), CommE> {
        self.write(Register::SagCyc, u32::from(cycles))
    }

    /// Sag detection level `SAGLVL`.
    pub fn set_sag_level(&mut self, level: u8) -> Result<(), CommE> {
        self.write(Register::SagLvl, u32::from(level))
    }

    /// Channel 1 peak threshold `IPKLVL`.
    pub fn set_current_peak_level(&mut self, level: u8) -> Result<(), CommE> {
        self.write(Register::IpkLvl, u32::from(level))
    }

    /// Channel 2 peak threshold `VPKLVL`.
    pub fn set_voltage_peak_level(&mut self, level: u8) -> Result<(), CommE> {
        self.write(Register::VpkLvl, u32::from(level))
    }

    // ==================================================================
    // == Internal Helpers ===============================================
    // ==================================================================
    fn read_u8(&mut self, register: Register) -> Result<u8, CommE> {
        Ok(self.read(register)? as u8)
    }

    fn read_u16(&mut self, register: Register) -> Result<u16, CommE> {
        Ok(self.read(register)? as u16)
    }

    fn read_i16(&mut self, register: Register) -> Result<i16, CommE> {
        Ok(self.read_signed(register)? as i16)
    }

    fn write_i16(&mut self, register: Register, value: i16) -> Result<(), CommE> {
        self.write(register, u32::from(value as u16))
    }
}
