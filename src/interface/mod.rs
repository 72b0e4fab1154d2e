//! Bus interface abstraction for the ADE7753 driver.

pub mod spi;

/// Largest payload carried by a single register transfer (24-bit registers).
pub const MAX_PAYLOAD_BYTES: usize = 3;

/// Abstraction over the low-level bus access required by the driver.
///
/// One call is one chip-select framed transaction: the address byte followed by
/// the payload, most significant byte first.
pub trait Ade7753Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Reads `buf.len()` payload bytes from the register at `address`.
    ///
    /// `buf` holds at most [`MAX_PAYLOAD_BYTES`] bytes.
    fn read_register(&mut self, address: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error>;

    /// Writes `data` as the payload of the register at `address`.
    ///
    /// `data` holds at most [`MAX_PAYLOAD_BYTES`] bytes.
    fn write_register(&mut self, address: u8, data: &[u8]) -> core::result::Result<(), Self::Error>;

    /// Bus time spent on settle intervals by one transfer of `payload_len` bytes.
    ///
    /// Poll loops add this to their elapsed-time budget.
    fn transfer_overhead_ns(&self, payload_len: usize) -> u32 {
        let _ = payload_len;
        0
    }

    /// Reads an 8-bit register.
    fn read8(&mut self, address: u8) -> core::result::Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_register(address, &mut buf)?;
        Ok(buf[0])
    }

    /// Reads a 16-bit register, big-endian assembled.
    fn read16(&mut self, address: u8) -> core::result::Result<u16, Self::Error> {
        let mut buf = [0u8; 2];
        self.read_register(address, &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Reads a 24-bit register, big-endian assembled into the low 24 bits.
    fn read24(&mut self, address: u8) -> core::result::Result<u32, Self::Error> {
        let mut buf = [0u8; 4];
        self.read_register(address, &mut buf[1..])?;
        Ok(u32::from_be_bytes(buf))
    }

    /// Writes an 8-bit register.
    fn write8(&mut self, address: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.write_register(address, core::slice::from_ref(&value))
    }

    /// Writes a 16-bit register, most significant byte first.
    fn write16(&mut self, address: u8, value: u16) -> core::result::Result<(), Self::Error> {
        self.write_register(address, &value.to_be_bytes())
    }

    /// Writes the low 24 bits of `value`, most significant byte first.
    fn write24(&mut self, address: u8, value: u32) -> core::result::Result<(), Self::Error> {
        self.write_register(address, &value.to_be_bytes()[1..])
    }
}
