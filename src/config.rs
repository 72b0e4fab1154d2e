//! Configuration primitives for the ADE7753 driver.

/// Default bound on a single event wait, in microseconds.
pub const DEFAULT_POLL_TIMEOUT_US: u32 = 100_000;
/// Default spacing between two status polls, in microseconds.
pub const DEFAULT_POLL_INTERVAL_US: u32 = 500;
/// Default number of RMS samples averaged by the averaging reads.
pub const DEFAULT_AVERAGE_SAMPLES: u16 = 100;
/// Default number of leading RMS samples thrown away before averaging.
pub const DEFAULT_DISCARD_SAMPLES: u16 = 1;

/// User-facing configuration for the ADE7753 driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Upper bound on one wait for an interrupt flag.
    pub poll_timeout_us: u32,
    /// Delay inserted between two reads of the status register.
    pub poll_interval_us: u32,
    /// Samples contributing to an averaged RMS reading.
    pub average_samples: u16,
    /// Leading samples of a burst that are read and discarded.
    pub discard_samples: u16,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is usable.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.poll_interval_us == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }

        if self.poll_timeout_us < self.poll_interval_us {
            return Err(ConfigError::TimeoutShorterThanInterval);
        }

        if self.average_samples == 0 {
            return Err(ConfigError::NoSamples);
        }

        Ok(())
    }

    /// Largest number of status reads one wait can issue.
    ///
    /// Zero when the poll interval is zero, since such a wait is refused.
    pub const fn max_polls(&self) -> u32 {
        match self.poll_timeout_us.checked_div(self.poll_interval_us) {
            Some(intervals) => intervals.saturating_add(1),
            None => 0,
        }
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the wait timeout.
    pub fn poll_timeout_us(mut self, timeout_us: u32) -> Self {
        self.config.poll_timeout_us = timeout_us;
        self
    }

    /// Overrides the spacing between status polls.
    pub fn poll_interval_us(mut self, interval_us: u32) -> Self {
        self.config.poll_interval_us = interval_us;
        self
    }

    /// Sets the number of averaged RMS samples.
    pub fn average_samples(mut self, samples: u16) -> Self {
        self.config.average_samples = samples;
        self
    }

    /// Sets the number of discarded leading RMS samples.
    pub fn discard_samples(mut self, samples: u16) -> Self {
        self.config.discard_samples = samples;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_timeout_us: DEFAULT_POLL_TIMEOUT_US,
            poll_interval_us: DEFAULT_POLL_INTERVAL_US,
            average_samples: DEFAULT_AVERAGE_SAMPLES,
            discard_samples: DEFAULT_DISCARD_SAMPLES,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The poll interval is zero.
    ZeroPollInterval,
    /// The timeout would not allow a single poll interval.
    TimeoutShorterThanInterval,
    /// Averaging over zero samples was requested.
    NoSamples,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_reference_timing() {
        let config = Config::default();
        assert_eq!(config.poll_timeout_us, 100_000);
        assert_eq!(config.average_samples, 100);
        assert_eq!(config.discard_samples, 1);
        assert_eq!(config.max_polls(), 201);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn builder_overrides_and_validation() {
        let config = Config::new().poll_timeout_us(10_000).poll_interval_us(1_000).build();
        assert_eq!(config.max_polls(), 11);
        assert_eq!(config.validate(), Ok(()));

        let zero = Config::new().poll_interval_us(0).build();
        assert_eq!(zero.validate(), Err(ConfigError::ZeroPollInterval));
        assert_eq!(zero.max_polls(), 0);

        let short = Config::new().poll_timeout_us(100).poll_interval_us(1_000).build();
        assert_eq!(short.validate(), Err(ConfigError::TimeoutShorterThanInterval));

        let empty = Config::new().average_samples(0).build();
        assert_eq!(empty.validate(), Err(ConfigError::NoSamples));
    }
}
