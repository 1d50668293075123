//! Crate-level error types.

use std::fmt;

/// Errors produced by the seabed-view crate.
#[derive(Debug)]
pub enum ViewerError {
    /// Constraint setup was invoked before the ground footprint existed.
    UninitializedFootprint,
    /// The ground footprint has zero (or non-finite) horizontal extent.
    DegenerateFootprint {
        /// Footprint width along X.
        size_x: f32,
        /// Footprint depth along Z.
        size_z: f32,
    },
    /// Camera parameters cannot produce a visible window.
    InvalidCamera(String),
    /// Option values violate their documented ranges.
    InvalidOptions(String),
    /// Ground description could not be turned into a model or footprint.
    GroundLoad(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UninitializedFootprint => {
                write!(f, "ground footprint is not loaded yet")
            }
            Self::DegenerateFootprint { size_x, size_z } => write!(
                f,
                "degenerate ground footprint (size x={size_x}, z={size_z})"
            ),
            Self::InvalidCamera(msg) => write!(f, "invalid camera: {msg}"),
            Self::InvalidOptions(msg) => {
                write!(f, "invalid options: {msg}")
            }
            Self::GroundLoad(msg) => write!(f, "ground load error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
