#![forbid(unsafe_code)]

//! Error types.

use std::fmt;

/// Configuration rejected by an engine update operation.
///
/// Updates fail fast: when a new configuration is invalid, nothing is
/// applied and the previous configuration stays in effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The maximum buffer must be at least as large as the minimum.
    InvalidBuffer {
        /// Requested minimum buffer, in pixels.
        min_px: f64,
        /// Requested maximum buffer, in pixels.
        max_px: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBuffer { min_px, max_px } => write!(
                f,
                "max buffer ({max_px}px) must be greater than or equal to min buffer ({min_px}px)"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
