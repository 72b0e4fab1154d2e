//! SPI interface implementation built on top of `embedded-hal` `SpiDevice`.
//!
//! The ADE7753 has no transfer handshake, so every byte on the bus (address
//! and payload alike) is framed by a fixed settle interval inside the
//! chip-select window:
//!
//! ```text
//! CS low | settle | ADDR | settle | B2 | settle | B1 | settle | B0 | settle | CS high
//! ```

use embedded_hal::spi::{Operation, SpiDevice};

use super::{Ade7753Interface, MAX_PAYLOAD_BYTES};

/// Bit 7 of the address byte selects a write transfer.
pub const WRITE_BIT: u8 = 0x80;

/// Default settle interval between bytes, in nanoseconds.
pub const DEFAULT_SETTLE_NS: u32 = 50_000;

// Leading settle, address, settle, then a (byte, settle) pair per payload byte.
const MAX_OPERATIONS: usize = 3 + 2 * MAX_PAYLOAD_BYTES;

/// SPI-based interface implementation for the ADE7753 driver.
pub struct SpiInterface<SPI> {
    spi: SPI,
    settle_ns: u32,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new interface using the default 50 µs settle interval.
    pub const fn new(spi: SPI) -> Self {
        Self {
            spi,
            settle_ns: DEFAULT_SETTLE_NS,
        }
    }

    /// Overrides the settle interval inserted around every byte.
    #[must_use]
    pub const fn with_settle_ns(mut self, settle_ns: u32) -> Self {
        self.settle_ns = settle_ns;
        self
    }

    /// Returns the configured settle interval in nanoseconds.
    pub const fn settle_ns(&self) -> u32 {
        self.settle_ns
    }

    /// Builds the address byte used to select registers over SPI.
    const fn command_byte(register: u8, is_write: bool) -> u8 {
        let command = register & !WRITE_BIT;
        if is_write { command | WRITE_BIT } else { command }
    }

    /// Provides mutable access to the wrapped SPI device.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Ade7753Interface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn read_register(&mut self, address: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        debug_assert!(
            buf.len() <= MAX_PAYLOAD_BYTES,
            "ADE7753 registers carry at most 3 payload bytes"
        );
        if buf.is_empty() {
            return Ok(());
        }

        let settle = self.settle_ns;
        let command = [Self::command_byte(address, false)];
        let payload_len = buf.len().min(MAX_PAYLOAD_BYTES);

        let mut operations: [Operation<'_, u8>; MAX_OPERATIONS] =
            core::array::from_fn(|_| Operation::DelayNs(settle));
        operations[1] = Operation::Write(&command);
        for (slot, byte) in operations[3..].iter_mut().step_by(2).zip(buf.chunks_mut(1)) {
            *slot = Operation::Read(byte);
        }

        self.spi.transaction(&mut operations[..3 + 2 * payload_len])
    }

    fn write_register(&mut self, address: u8, data: &[u8]) -> core::result::Result<(), Self::Error> {
        debug_assert!(
            data.len() <= MAX_PAYLOAD_BYTES,
            "ADE7753 registers carry at most 3 payload bytes"
        );
        if data.is_empty() {
            return Ok(());
        }

        let settle = self.settle_ns;
        let command = [Self::command_byte(address, true)];
        let payload_len = data.len().min(MAX_PAYLOAD_BYTES);

        let mut operations: [Operation<'_, u8>; MAX_OPERATIONS] =
            core::array::from_fn(|_| Operation::DelayNs(settle));
        operations[1] = Operation::Write(&command);
        for (slot, byte) in operations[3..].iter_mut().step_by(2).zip(data.chunks(1)) {
            *slot = Operation::Write(byte);
        }

        self.spi.transaction(&mut operations[..3 + 2 * payload_len])
    }

    fn transfer_overhead_ns(&self, payload_len: usize) -> u32 {
        let settles = payload_len.min(MAX_PAYLOAD_BYTES) as u32 + 2;
        self.settle_ns.saturating_mul(settles)
    }
}
