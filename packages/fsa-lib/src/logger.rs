use std::{
    fmt::Display,
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
    sync::Mutex,
};

use chrono::Local;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

use crate::config::LoggerConfig;

/// Severity of a log message. Levels are ordered, a logger shows every
/// message at or above its own level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warn => "WAR",
            LogLevel::Error => "ERR",
        }
    }

    pub fn colored_tag(&self) -> ColoredString {
        match self {
            LogLevel::Debug => self.tag().bright_cyan(),
            LogLevel::Info => self.tag().bright_green(),
            LogLevel::Warn => self.tag().yellow(),
            LogLevel::Error => self.tag().bright_red(),
        }
    }

    pub fn tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "info" | "inf" => Ok(LogLevel::Info),
            "warn" | "warning" | "war" => Ok(LogLevel::Warn),
            "error" | "err" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "Debug"),
            LogLevel::Info => write!(f, "Info"),
            LogLevel::Warn => write!(f, "Warn"),
            LogLevel::Error => write!(f, "Error"),
        }
    }
}

/// A small leveled logger writing to stderr and, optionally, a log file.
///
/// Messages below the configured level are not printed, but still end up in
/// the log file so a file always holds the full trace of a run.
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
    name: String,
    file: Option<Mutex<BufWriter<File>>>,
}

impl Logger {
    pub fn new(level: LogLevel, name: impl Into<String>) -> Self {
        Logger {
            level,
            name: name.into(),
            file: None,
        }
    }

    /// Additionally writes every message to the file at `path`, truncating it.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        self.file = Some(Mutex::new(BufWriter::new(file)));

        Ok(self)
    }

    /// Builds a logger from its config. Returns [None] if logging is
    /// disabled.
    pub fn from_config(config: &LoggerConfig, name: &str) -> anyhow::Result<Option<Self>> {
        if !*config.get_enabled() {
            return Ok(None);
        }

        let logger = Logger::new(*config.get_log_level(), name);

        if *config.get_log_file() {
            let path = format!(
                "./logs/{}_{}.txt",
                name.to_lowercase().replace(' ', "_"),
                Local::now().format("%Y-%m-%d_%H-%M-%S")
            );
            return Ok(Some(logger.with_log_file(path)?));
        }

        Ok(Some(logger))
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn shows(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        self.writeln_to_file(&format!("[{}] {}: {}", level.tag(), self.name, message));

        if self.shows(level) {
            eprintln!(
                "[{}] {} {}",
                level.colored_tag(),
                format!("{}:", self.name).dimmed(),
                message
            );
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    fn writeln_to_file(&self, line: &str) {
        let Some(file) = &self.file else {
            return;
        };

        let result = match file.lock() {
            Ok(mut f) => writeln!(f, "{}", line),
            Err(poisoned) => writeln!(poisoned.into_inner(), "{}", line),
        };

        if let Err(e) = result {
            eprintln!("[{}] could not write to log file: {}", LogLevel::Error.tag(), e);
        }
    }

    pub fn object<'a>(&'a self, name: &'a str) -> ObjectBuilder<'a> {
        ObjectBuilder::new(name, self)
    }
}

/// Collects named fields and logs them as a single multi-line record.
#[derive(Debug, Clone)]
pub struct ObjectBuilder<'a> {
    logger: &'a Logger,
    name: &'a str,
    fields: Vec<(&'a str, String)>,
}

impl<'a> ObjectBuilder<'a> {
    fn new(name: &'a str, logger: &'a Logger) -> Self {
        ObjectBuilder {
            logger,
            name,
            fields: vec![],
        }
    }

    pub fn add_field(mut self, name: &'a str, value: impl Display) -> Self {
        self.fields.push((name, value.to_string()));

        self
    }

    fn build(&self) -> String {
        let mut result = format!("{} {{", self.name);
        for (name, value) in &self.fields {
            result.push_str(&format!("\n  {}: {}", name, value));
        }
        result.push_str("\n}");
        result
    }

    pub fn log(&self, level: LogLevel) {
        self.logger.log(level, &self.build());
    }
}
