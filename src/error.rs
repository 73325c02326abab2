//! Error module
//!

use std::io;

use thiserror::Error;

/// Custom error type for the gpsd client, allow us to differentiate between errors.
///
#[derive(Debug, Error)]
pub enum GpsdError {
    #[error("Can not connect to {0}: {1}")]
    Connect(String, io::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Bad report: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Connection closed by gpsd")]
    Closed,
}
