#![no_std]

#[macro_use]
mod log;

mod error;

pub mod acquisition;
pub mod config;
pub mod device;
pub mod interface;
pub mod offset;
pub mod params;
pub mod registers;
pub mod setup;

#[cfg(test)]
mod testing;

pub use crate::acquisition::{Acquisition, AveragedRms, LineCycleEnergy, NoWatchdog, WaitOutcome, Watchdog};
pub use crate::config::{Config, ConfigError};
pub use crate::device::{Ade7753, RegisterValue};
pub use crate::error::{Error, Result};
pub use crate::interface::spi::SpiInterface;
pub use crate::interface::Ade7753Interface;
pub use crate::offset::{ChannelOffset, OffsetOutOfRange};
pub use crate::registers::Register;
