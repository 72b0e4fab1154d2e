//! Polled event synchronisation.
//!
//! The ADE7753 `IRQ` output is not wired on every board, so events are found
//! by polling the interrupt status register. One acquisition session is:
//!
//! 1. read `RSTSTATUS` to clear every pending flag,
//! 2. poll `STATUS` until a flag of the requested mask is set or the time
//!    budget runs out (the watchdog is fed on timeout),
//! 3. read the target register, whatever the outcome of step 2.
//!
//! The outcome of step 2 travels with the value as an [`Acquisition`].

use embedded_hal::delay::DelayNs;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::interface::Ade7753Interface;
use crate::registers::{InterruptFlags, Register};

/// Hardware watchdog kept alive while a wait gives up.
pub trait Watchdog {
    /// Restarts the watchdog countdown.
    fn feed(&mut self);
}

/// Watchdog placeholder for hosts without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWatchdog;

impl Watchdog for NoWatchdog {
    fn feed(&mut self) {}
}

/// Result of waiting for an interrupt flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitOutcome {
    /// A requested flag was observed in `STATUS`.
    Observed,
    /// The time budget ran out before any requested flag was set.
    TimedOut,
}

impl WaitOutcome {
    /// Returns `true` when the event was seen.
    pub const fn is_observed(self) -> bool {
        matches!(self, Self::Observed)
    }
}

/// A register value tagged with the outcome of the wait that preceded it.
///
/// A `TimedOut` value was read without synchronisation and may be stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Acquisition<T> {
    /// Read right after the awaited event.
    Synced(T),
    /// Read after the wait timed out.
    TimedOut(T),
}

impl<T> Acquisition<T> {
    /// Tags `value` with `outcome`.
    pub fn new(outcome: WaitOutcome, value: T) -> Self {
        match outcome {
            WaitOutcome::Observed => Self::Synced(value),
            WaitOutcome::TimedOut => Self::TimedOut(value),
        }
    }

    /// The wait outcome.
    pub fn outcome(&self) -> WaitOutcome {
        match self {
            Self::Synced(_) => WaitOutcome::Observed,
            Self::TimedOut(_) => WaitOutcome::TimedOut,
        }
    }

    /// Returns `true` when the value was read after a timeout.
    pub fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut(_))
    }

    /// Borrows the value regardless of the outcome.
    pub fn value(&self) -> &T {
        match self {
            Self::Synced(value) | Self::TimedOut(value) => value,
        }
    }

    /// Consumes the acquisition and returns the value regardless of the outcome.
    pub fn into_value(self) -> T {
        match self {
            Self::Synced(value) | Self::TimedOut(value) => value,
        }
    }

    /// Returns the value only when it was synchronised.
    pub fn synced(self) -> Option<T> {
        match self {
            Self::Synced(value) => Some(value),
            Self::TimedOut(_) => None,
        }
    }

    /// Transforms the value, keeping the tag.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Acquisition<U> {
        match self {
            Self::Synced(value) => Acquisition::Synced(f(value)),
            Self::TimedOut(value) => Acquisition::TimedOut(f(value)),
        }
    }
}

/// Mean of a burst of synchronised RMS reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AveragedRms {
    /// Truncated arithmetic mean of the retained samples.
    pub mean: u32,
    /// Number of retained samples.
    pub samples: u16,
    /// Retained samples that were read after a timeout.
    pub timed_out: u16,
}

impl AveragedRms {
    /// Returns `true` when every retained sample was synchronised.
    pub const fn is_synced(&self) -> bool {
        self.timed_out == 0
    }
}

/// Line-cycle accumulated energies read after `CYCEND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineCycleEnergy {
    /// `LAENERGY`, signed.
    pub active: i32,
    /// `LVAENERGY`, unsigned.
    pub apparent: u32,
    /// `LVARENERGY`, signed.
    pub reactive: i32,
}

/// Clears the status flags, then polls `STATUS` until a flag in `mask` is set.
///
/// Elapsed time is the sum of the requested poll delays plus the bus overhead
/// the interface reports for each status read. When it reaches
/// `config.poll_timeout_us` the watchdog is fed and `TimedOut` is returned.
/// A zero `mask` always times out. A zero poll interval is rejected with
/// [`Error::InvalidConfig`] before the bus is touched.
pub fn wait_for_flags<IFACE, D, W>(
    interface: &mut IFACE,
    delay: &mut D,
    watchdog: &mut W,
    config: &Config,
    mask: u16,
) -> Result<WaitOutcome, IFACE::Error>
where
    IFACE: Ade7753Interface,
    D: DelayNs,
    W: Watchdog,
{
    if config.poll_interval_us == 0 {
        return Err(Error::InvalidConfig);
    }

    interface.read16(Register::RstStatus.address())?;

    let timeout_ns = u64::from(config.poll_timeout_us) * 1_000;
    let step_ns = u64::from(config.poll_interval_us) * 1_000
        + u64::from(interface.transfer_overhead_ns(Register::Status.width()));
    let mut elapsed_ns = 0u64;

    loop {
        let status = InterruptFlags::from(interface.read16(Register::Status.address())?);
        if status.intersects(mask) {
            trace!("irq {=u16:#x} observed after {=u64} ns", mask, elapsed_ns);
            return Ok(WaitOutcome::Observed);
        }

        if elapsed_ns >= timeout_ns {
            watchdog.feed();
            warn!("irq {=u16:#x} wait timed out after {=u64} ns", mask, elapsed_ns);
            return Ok(WaitOutcome::TimedOut);
        }

        delay.delay_us(config.poll_interval_us);
        elapsed_ns += step_ns;
    }
}

/// Reads `discard + samples` values and averages the last `samples`.
///
/// The leading reads of a burst follow an idle gap and are not trusted. A zero
/// `samples` count yields a mean of zero.
pub fn average<E, F>(discard: u16, samples: u16, mut read: F) -> core::result::Result<AveragedRms, E>
where
    F: FnMut() -> core::result::Result<Acquisition<u32>, E>,
{
    for _ in 0..discard {
        read()?;
    }

    let mut sum = 0u64;
    let mut timed_out = 0u16;
    for _ in 0..samples {
        let sample = read()?;
        if sample.is_timed_out() {
            timed_out += 1;
        }
        sum += u64::from(sample.into_value());
    }

    let mean = if samples == 0 { 0 } else { (sum / u64::from(samples)) as u32 };
    Ok(AveragedRms {
        mean,
        samples,
        timed_out,
    })
}
