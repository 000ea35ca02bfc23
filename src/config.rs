//! # Runtime configuration for the task queue.
//!
//! [`QueueConfig`] defines the queue's behavior: how often the worker reports
//! progress on a long-running job ([`Frequency`]), how chatty the built-in
//! logging subscriber is ([`Verbosity`]), and the event bus capacity.
//!
//! Both presets parse from text and **fail fast** on unknown names: a typo in
//! a settings file surfaces as a [`ConfigError`] at startup instead of being
//! silently replaced with a default.
//!
//! # Example
//! ```
//! use appcrust::{Frequency, QueueConfig, Verbosity};
//!
//! let mut cfg = QueueConfig::default();
//! cfg.frequency = "aggressive".parse().unwrap();
//! cfg.verbosity = Verbosity::Debug;
//!
//! assert_eq!(cfg.frequency, Frequency::Aggressive);
//! assert!("warp-speed".parse::<Frequency>().is_err());
//! ```

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Global configuration for the queue and its worker.
#[derive(Clone, Debug)]
pub struct QueueConfig {
    /// Cadence of in-flight progress events while a job is running.
    pub frequency: Frequency,
    /// Verbosity of the built-in logging subscriber.
    pub verbosity: Verbosity,
    /// Capacity of the event bus channel.
    pub bus_capacity: usize,
}

impl Default for QueueConfig {
    /// Provides a default configuration:
    /// - `frequency = Frequency::Normal` (1s)
    /// - `verbosity = Verbosity::Info`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            frequency: Frequency::default(),
            verbosity: Verbosity::default(),
            bus_capacity: 1024,
        }
    }
}

/// How often the worker emits a progress event for the job currently running.
///
/// The worker waits on the running job with a real blocking join; the preset
/// only controls how often a `JobInFlight` heartbeat is published while that
/// wait is in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Frequency {
    /// Report every 2 seconds.
    Lazy,
    /// Report every second.
    #[default]
    Normal,
    /// Report every 370 milliseconds.
    Aggressive,
}

impl Frequency {
    /// Returns the reporting interval for this preset.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use appcrust::Frequency;
    ///
    /// assert_eq!(Frequency::Lazy.interval(), Duration::from_secs(2));
    /// assert_eq!(Frequency::Normal.interval(), Duration::from_secs(1));
    /// assert_eq!(Frequency::Aggressive.interval(), Duration::from_millis(370));
    /// ```
    pub fn interval(&self) -> Duration {
        match self {
            Frequency::Lazy => Duration::from_secs(2),
            Frequency::Normal => Duration::from_secs(1),
            Frequency::Aggressive => Duration::from_millis(370),
        }
    }
}

impl FromStr for Frequency {
    type Err = ConfigError;

    /// Parses a preset name. Accepts `lazy`, `normal`, `aggressive` and the
    /// short form `agro`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lazy" => Ok(Frequency::Lazy),
            "normal" => Ok(Frequency::Normal),
            "aggressive" | "agro" => Ok(Frequency::Aggressive),
            _ => Err(ConfigError::UnknownFrequency { value: s.to_string() }),
        }
    }
}

/// Verbosity of the diagnostic log output.
///
/// Maps onto `tracing` levels: `Off` suppresses queue logging entirely,
/// `Info` covers submissions and worker transitions, `Debug` adds in-flight
/// heartbeats and queue-depth detail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// No log output.
    Off,
    /// Lifecycle events at info level.
    #[default]
    Info,
    /// Everything, including per-heartbeat detail.
    Debug,
}

impl Verbosity {
    /// Returns the `tracing` filter directive for this level.
    pub fn filter_str(&self) -> &'static str {
        match self {
            Verbosity::Off => "off",
            Verbosity::Info => "info",
            Verbosity::Debug => "debug",
        }
    }
}

impl FromStr for Verbosity {
    type Err = ConfigError;

    /// Parses a verbosity name. Accepts `off`, `info`, `debug` and the
    /// numeric levels `0`, `1`, `2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "0" => Ok(Verbosity::Off),
            "info" | "1" => Ok(Verbosity::Info),
            "debug" | "2" => Ok(Verbosity::Debug),
            _ => Err(ConfigError::UnknownVerbosity { value: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_presets_map_to_documented_intervals() {
        assert_eq!(Frequency::Lazy.interval(), Duration::from_secs(2));
        assert_eq!(Frequency::Normal.interval(), Duration::from_secs(1));
        assert_eq!(Frequency::Aggressive.interval(), Duration::from_millis(370));
    }

    #[test]
    fn test_frequency_parses_known_presets() {
        assert_eq!("lazy".parse::<Frequency>().unwrap(), Frequency::Lazy);
        assert_eq!("Normal".parse::<Frequency>().unwrap(), Frequency::Normal);
        assert_eq!("aggressive".parse::<Frequency>().unwrap(), Frequency::Aggressive);
        assert_eq!("agro".parse::<Frequency>().unwrap(), Frequency::Aggressive);
    }

    #[test]
    fn test_frequency_rejects_unknown_preset() {
        let err = "sometimes".parse::<Frequency>().unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownFrequency { value: "sometimes".to_string() }
        );
    }

    #[test]
    fn test_verbosity_parses_names_and_numeric_levels() {
        assert_eq!("off".parse::<Verbosity>().unwrap(), Verbosity::Off);
        assert_eq!("1".parse::<Verbosity>().unwrap(), Verbosity::Info);
        assert_eq!("2".parse::<Verbosity>().unwrap(), Verbosity::Debug);
    }

    #[test]
    fn test_verbosity_rejects_unknown_level() {
        assert!("verbose".parse::<Verbosity>().is_err());
        assert!("3".parse::<Verbosity>().is_err());
    }
}
