//! Error definitions.
use std::error::Error;
use std::{fmt, result};

/// A specialized Result type for this library.
pub type Result<T, E = MineError> = result::Result<T, E>;

/// Errors in this library.
#[derive(Debug)]
pub enum MineError {
    /// Contains [`InputError`].
    Input(InputError),
    /// Contains [`OutOfRangeError`].
    OutOfRange(OutOfRangeError),
    /// Contains [`ConfigError`].
    Config(ConfigError),
    /// Contains [`PersistError`].
    Persist(PersistError),
}

impl fmt::Display for MineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Input(e) => e.fmt(f),
            Self::OutOfRange(e) => e.fmt(f),
            Self::Config(e) => e.fmt(f),
            Self::Persist(e) => e.fmt(f),
        }
    }
}

impl Error for MineError {}

impl MineError {
    pub(crate) fn input(msg: String) -> Self {
        Self::Input(InputError { msg })
    }

    pub(crate) const fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange(OutOfRangeError { index, len })
    }

    pub(crate) const fn config(msg: &'static str) -> Self {
        Self::Config(ConfigError { msg })
    }

    pub(crate) fn persist(msg: String) -> Self {
        Self::Persist(PersistError { msg })
    }
}

impl From<std::io::Error> for MineError {
    fn from(e: std::io::Error) -> Self {
        Self::persist(e.to_string())
    }
}

impl From<serde_json::Error> for MineError {
    fn from(e: serde_json::Error) -> Self {
        Self::persist(e.to_string())
    }
}

/// Error used when source text cannot be read.
#[derive(Debug)]
pub struct InputError {
    msg: String,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InputError: {}", self.msg)
    }
}

/// Error used when a sentence index is out of bounds.
#[derive(Debug)]
pub struct OutOfRangeError {
    index: usize,
    len: usize,
}

impl fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "OutOfRangeError: index {} out of range for store of length {}",
            self.index, self.len
        )
    }
}

/// Error used when mining parameters contradict each other.
#[derive(Debug)]
pub struct ConfigError {
    msg: &'static str,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ConfigError: {}", self.msg)
    }
}

/// Error used when saving or loading persisted state fails.
#[derive(Debug)]
pub struct PersistError {
    msg: String,
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PersistError: {}", self.msg)
    }
}
