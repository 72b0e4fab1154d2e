extern crate std;

use std::collections::{BTreeMap, VecDeque};
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::acquisition::Watchdog;
use crate::interface::Ade7753Interface;
use crate::registers::Register;

/// Bus failure injected by [`MockInterface::fail_reads_of`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MockBusError;

/// Register-file model of the chip.
///
/// Read-and-clear registers zero their partner on read. Per-register scripts
/// take precedence over the register file until they run dry.
#[derive(Clone, Debug)]
pub(crate) struct MockInterface {
    regs: [u32; 64],
    scripts: BTreeMap<u8, VecDeque<u32>>,
    reads: Vec<u8>,
    writes: Vec<(u8, u32)>,
    raise_flags: u16,
    raise_after: u32,
    polls_since_clear: u32,
    overhead_ns: u32,
    failing_read: Option<u8>,
    failing_write: Option<(u8, usize)>,
}

impl Default for MockInterface {
    fn default() -> Self {
        Self {
            regs: [0u32; 64],
            scripts: BTreeMap::new(),
            reads: Vec::new(),
            writes: Vec::new(),
            raise_flags: 0,
            raise_after: 0,
            polls_since_clear: 0,
            overhead_ns: 0,
            failing_read: None,
            failing_write: None,
        }
    }
}

impl MockInterface {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_reg(mut self, register: Register, value: u32) -> Self {
        self.set_reg(register, value);
        self
    }

    pub(crate) fn set_reg(&mut self, register: Register, value: u32) {
        self.regs[register.address() as usize] = value & register.mask();
    }

    pub(crate) fn reg(&self, register: Register) -> u32 {
        self.regs[register.address() as usize]
    }

    /// Queues values returned by successive reads of `register`.
    pub(crate) fn script(mut self, register: Register, values: impl IntoIterator<Item = u32>) -> Self {
        self.scripts
            .entry(register.address())
            .or_default()
            .extend(values);
        self
    }

    /// ORs `flags` into `STATUS` on the `polls`-th status read after each clear.
    pub(crate) fn raise_after(mut self, flags: u16, polls: u32) -> Self {
        self.raise_flags = flags;
        self.raise_after = polls;
        self
    }

    pub(crate) fn with_overhead_ns(mut self, overhead_ns: u32) -> Self {
        self.overhead_ns = overhead_ns;
        self
    }

    pub(crate) fn fail_reads_of(mut self, register: Register) -> Self {
        self.failing_read = Some(register.address());
        self
    }

    /// Lets `accepted` writes to `register` through, then fails every later one.
    pub(crate) fn fail_writes_after(mut self, register: Register, accepted: usize) -> Self {
        self.failing_write = Some((register.address(), accepted));
        self
    }

    pub(crate) fn reads(&self) -> &[u8] {
        &self.reads
    }

    pub(crate) fn read_count(&self, register: Register) -> usize {
        self.reads
            .iter()
            .filter(|&&address| address == register.address())
            .count()
    }

    pub(crate) fn writes(&self) -> &[(u8, u32)] {
        &self.writes
    }

    fn writes_to(&self, register: Register) -> Vec<u32> {
        self.writes
            .iter()
            .filter(|(address, _)| *address == register.address())
            .map(|(_, value)| *value)
            .collect()
    }

    pub(crate) fn mode_writes(&self) -> Vec<u32> {
        self.writes_to(Register::Mode)
    }

    fn next_value(&mut self, address: u8) -> u32 {
        if let Some(value) = self.scripts.get_mut(&address).and_then(VecDeque::pop_front) {
            return value;
        }

        if address == Register::Status.address() {
            self.polls_since_clear += 1;
            if self.raise_flags != 0 && self.polls_since_clear >= self.raise_after {
                self.regs[address as usize] |= u32::from(self.raise_flags);
            }
        }

        match Register::from_address(address).and_then(Register::clears) {
            Some(partner) => {
                if partner == Register::Status {
                    self.polls_since_clear = 0;
                }
                core::mem::take(&mut self.regs[partner.address() as usize])
            }
            None => self.regs[address as usize],
        }
    }
}

impl Ade7753Interface for MockInterface {
    type Error = MockBusError;

    fn read_register(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.reads.push(address);
        if self.failing_read == Some(address) {
            return Err(MockBusError);
        }

        let bytes = self.next_value(address & 0x3F).to_be_bytes();
        let len = buf.len().min(bytes.len());
        buf[..len].copy_from_slice(&bytes[bytes.len() - len..]);
        Ok(())
    }

    fn write_register(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        if let Some((failing, accepted)) = self.failing_write {
            let done = self.writes.iter().filter(|(written, _)| *written == failing).count();
            if failing == address && done >= accepted {
                return Err(MockBusError);
            }
        }

        let value = data
            .iter()
            .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte));
        self.regs[(address & 0x3F) as usize] = value;
        self.writes.push((address, value));
        Ok(())
    }

    fn transfer_overhead_ns(&self, _payload_len: usize) -> u32 {
        self.overhead_ns
    }
}

#[derive(Default, Debug)]
pub(crate) struct MockDelay {
    pub(crate) calls: u32,
    pub(crate) total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ns);
    }
}

#[derive(Default, Debug)]
pub(crate) struct CountingWatchdog {
    pub(crate) feeds: u32,
}

impl Watchdog for CountingWatchdog {
    fn feed(&mut self) {
        self.feeds += 1;
    }
}
