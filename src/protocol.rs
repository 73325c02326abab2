//! The subset of the gpsd JSON protocol we use.
//!
//! Once a client has sent `?WATCH={"enable":true,"json":true};` the daemon pushes one JSON
//! object per line, each with a `class` member telling what it is.  We only look at a few of
//! them, everything else is decoded as `Report::Other` and ignored.
//!
//! See <https://gpsd.gitlab.io/gpsd/gpsd_json.html> for the full protocol.
//!

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{FixMode, FixStatus, GpsdError};

/// The `?WATCH` command.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Watch {
    /// Start (or stop) streaming
    pub enable: bool,
    /// Send JSON reports
    pub json: bool,
}

impl Default for Watch {
    fn default() -> Self {
        Self {
            enable: true,
            json: true,
        }
    }
}

impl Watch {
    /// Generate the command line to send.
    ///
    pub fn command(&self) -> Result<String, GpsdError> {
        Ok(format!("?WATCH={};\n", serde_json::to_string(self)?))
    }
}

/// Time-Position-Velocity report.
///
#[derive(Clone, Debug, Deserialize)]
pub struct Tpv {
    #[serde(default)]
    pub mode: FixMode,
    pub status: Option<FixStatus>,
    pub time: Option<DateTime<Utc>>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// One satellite in a `SKY` report, we only care whether it is used.
///
#[derive(Clone, Debug, Deserialize)]
pub struct Satellite {
    #[serde(default)]
    pub used: bool,
}

/// Sky view report.
///
#[derive(Clone, Debug, Deserialize)]
pub struct Sky {
    pub hdop: Option<f64>,
    pub vdop: Option<f64>,
    pub pdop: Option<f64>,
    #[serde(rename = "nSat")]
    pub n_sat: Option<u32>,
    #[serde(rename = "uSat")]
    pub u_sat: Option<u32>,
    #[serde(default)]
    pub satellites: Vec<Satellite>,
}

/// Sent by the daemon on connect.
///
#[derive(Clone, Debug, Deserialize)]
pub struct Version {
    pub release: String,
    #[serde(default)]
    pub proto_major: u32,
    #[serde(default)]
    pub proto_minor: u32,
}

/// Error from the daemon, usually a bad command.
///
#[derive(Clone, Debug, Deserialize)]
pub struct DaemonError {
    pub message: String,
}

/// Every report we can get.
///
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "class")]
pub enum Report {
    #[serde(rename = "TPV")]
    Tpv(Tpv),
    #[serde(rename = "SKY")]
    Sky(Sky),
    #[serde(rename = "VERSION")]
    Version(Version),
    #[serde(rename = "DEVICES")]
    Devices,
    #[serde(rename = "WATCH")]
    Watch,
    #[serde(rename = "ERROR")]
    Error(DaemonError),
    #[serde(other)]
    Other,
}

impl Report {
    /// Decode one line.
    ///
    pub fn parse(line: &str) -> Result<Self, GpsdError> {
        Ok(serde_json::from_str(line.trim())?)
    }
}
