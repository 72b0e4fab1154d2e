//! Error handling primitives for the ADE7753 driver.

use crate::registers::Register;

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
///
/// A poll that runs out of time is not an error; it is reported through
/// [`WaitOutcome`](crate::acquisition::WaitOutcome) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The provided configuration parameters are invalid.
    InvalidConfig,
    /// The register cannot be written.
    ReadOnlyRegister(Register),
    /// The register held a bit pattern outside its documented encoding.
    UnexpectedValue(Register),
    /// A signed-magnitude offset does not fit its 5-bit magnitude field.
    OffsetOutOfRange,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
