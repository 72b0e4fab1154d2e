//! Testing infrastructure (register-file device model, delays, watchdog).

pub(crate) mod mock;

pub(crate) use mock::{CountingWatchdog, MockBusError, MockDelay, MockInterface};
