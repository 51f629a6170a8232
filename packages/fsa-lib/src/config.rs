use fsa_macros::config;

use crate::logger::LogLevel;

pub trait IntoOr<T> {
    fn into_or(self, or: T) -> T;
}

impl<T> IntoOr<Option<T>> for Option<T> {
    fn into_or(self, or: Option<T>) -> Option<T> {
        match self {
            Some(t) => Some(t),
            None => or,
        }
    }
}

impl<T> IntoOr<T> for Option<T> {
    fn into_or(self, or: T) -> T {
        self.unwrap_or(or)
    }
}

pub trait GeneralConfig {
    fn logger(&self) -> &LoggerConfig;
}

config! {
    pub struct LoggerConfig {
        enabled: bool = false,
        /// Mirror every message into a timestamped file under `./logs`.
        log_file: bool = false,
        log_level: LogLevel = LogLevel::Warn,
    }
}

config! {
    /// Settings for turning an NFA into a DFA.
    pub struct DeterminizeConfig {
        /// Upper bound on the number of DFA states subset construction may
        /// discover before giving up.
        max_states: usize = 4096,
        logger: LoggerConfig (Option<PartialLoggerConfig> = LoggerConfig::default()),
    }
}

impl GeneralConfig for DeterminizeConfig {
    fn logger(&self) -> &LoggerConfig {
        &self.logger
    }
}

config! {
    /// Settings of the `fsa` command line harness.
    pub struct HarnessConfig {
        /// Determinize NFAs before running them.
        determinize: bool = false,
        determinize_config: DeterminizeConfig (Option<PartialDeterminizeConfig> = DeterminizeConfig::default()),
        logger: LoggerConfig (Option<PartialLoggerConfig> = LoggerConfig::default()),
    }
}

impl GeneralConfig for HarnessConfig {
    fn logger(&self) -> &LoggerConfig {
        &self.logger
    }
}
