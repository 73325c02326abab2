//! Timestamp rendering.
//!
//! gpsd reports time as an RFC 3339 string which we keep as a (seconds, nanoseconds) pair
//! since the Unix epoch.  It can be displayed in four different ways, none of them exposing
//! the sub-second part.
//!

use chrono::{DateTime, Local, TimeZone, Utc};
use clap::ValueEnum;
use strum::{Display, EnumString};

/// Civil time, day first.
const CIVIL_FMT: &str = "%d-%m-%Y %H:%M:%S";
/// ISO 8601, UTC only.
const ISO8601_FMT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Seconds and nanoseconds since the Unix epoch.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    pub secs: i64,
    pub nanos: u32,
}

impl Timestamp {
    pub fn new(secs: i64, nanos: u32) -> Self {
        Self { secs, nanos }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self {
            secs: value.timestamp(),
            nanos: value.timestamp_subsec_nanos(),
        }
    }
}

/// How to display a timestamp.
///
#[derive(Clone, Copy, Debug, Default, Display, EnumString, PartialEq, Eq, ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum TimeFormat {
    /// Local civil time, `DD-MM-YYYY HH:MM:SS`
    Local,
    /// UTC civil time, `DD-MM-YYYY HH:MM:SS`
    Utc,
    /// Seconds since the Epoch
    Unix,
    /// `YYYY-MM-DDTHH:MM:SSZ`
    #[default]
    Iso8601,
}

impl TimeFormat {
    /// Render `ts` in this format.
    ///
    pub fn render(self, ts: Timestamp) -> String {
        format_time(ts, self)
    }
}

/// Format a timestamp according to `fmt`.
///
/// Anything chrono can not represent is displayed as plain seconds.
///
pub fn format_time(ts: Timestamp, fmt: TimeFormat) -> String {
    match fmt {
        TimeFormat::Local => match Local.timestamp_opt(ts.secs, 0).earliest() {
            Some(t) => t.format(CIVIL_FMT).to_string(),
            None => ts.secs.to_string(),
        },
        TimeFormat::Utc => match Utc.timestamp_opt(ts.secs, 0).single() {
            Some(t) => t.format(CIVIL_FMT).to_string(),
            None => ts.secs.to_string(),
        },
        TimeFormat::Unix => ts.secs.to_string(),
        TimeFormat::Iso8601 => match Utc.timestamp_opt(ts.secs, 0).single() {
            Some(t) => t.format(ISO8601_FMT).to_string(),
            None => ts.secs.to_string(),
        },
    }
}
