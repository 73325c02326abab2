//! Fix data as accumulated from gpsd reports.
//!
//! gpsd splits what we need over two report classes: `TPV` carries time, position, mode and
//! status while `SKY` carries the dilution of precision and the satellites.  `GpsData` keeps
//! the latest of each and `Fix` is the flat snapshot we print.
//!

use serde_repr::{Deserialize_repr, Serialize_repr};
use strum::Display;
use tracing::trace;

use crate::{Sky, TimeFormat, Timestamp, Tpv};

/// Quality tier of a fix, ordered from worst to best.
///
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize_repr,
    Display,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize_repr,
)]
#[repr(u8)]
pub enum FixMode {
    /// No TPV seen yet
    #[default]
    NotSeen = 0,
    NoFix = 1,
    Fix2D = 2,
    Fix3D = 3,
}

impl FixMode {
    /// Do we have at least a 2D fix?
    ///
    #[inline]
    pub fn is_usable(self) -> bool {
        self >= FixMode::Fix2D
    }
}

/// What kind of solution the receiver has.
///
#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Display, Eq, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum FixStatus {
    #[default]
    Unknown = 0,
    Gps = 1,
    Dgps = 2,
    RtkFix = 3,
    RtkFloat = 4,
    DeadReckoning = 5,
    GnssDr = 6,
    TimeOnly = 7,
    Simulated = 8,
    PpsFix = 9,
}

/// Time, position, mode and status from the last `TPV`.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub status: FixStatus,
    pub mode: FixMode,
    pub time: Timestamp,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            status: FixStatus::Unknown,
            mode: FixMode::NotSeen,
            time: Timestamp::default(),
            latitude: f64::NAN,
            longitude: f64::NAN,
        }
    }
}

impl From<&Tpv> for Position {
    fn from(tpv: &Tpv) -> Self {
        // Older daemons do not send `status`, a real fix means plain GPS then.
        //
        let status = match tpv.status {
            Some(status) => status,
            None if tpv.mode.is_usable() => FixStatus::Gps,
            None => FixStatus::Unknown,
        };
        Self {
            status,
            mode: tpv.mode,
            time: tpv.time.map(Timestamp::from).unwrap_or_default(),
            latitude: tpv.lat.unwrap_or(f64::NAN),
            longitude: tpv.lon.unwrap_or(f64::NAN),
        }
    }
}

/// Dilution of precision, lower is better.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dop {
    pub hdop: f64,
    pub vdop: f64,
    pub pdop: f64,
}

impl Default for Dop {
    fn default() -> Self {
        Self {
            hdop: f64::NAN,
            vdop: f64::NAN,
            pdop: f64::NAN,
        }
    }
}

/// Everything we know so far from the daemon.
///
#[derive(Clone, Debug, Default)]
pub struct GpsData {
    pub position: Position,
    pub dop: Dop,
    pub satellites_visible: u32,
    pub satellites_used: u32,
}

impl GpsData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the position part.
    ///
    pub fn apply_tpv(&mut self, tpv: &Tpv) {
        trace!("tpv mode={}", tpv.mode);
        self.position = Position::from(tpv);
    }

    /// Replace the DOP and satellite part.
    ///
    pub fn apply_sky(&mut self, sky: &Sky) {
        self.dop = Dop {
            hdop: sky.hdop.unwrap_or(f64::NAN),
            vdop: sky.vdop.unwrap_or(f64::NAN),
            pdop: sky.pdop.unwrap_or(f64::NAN),
        };
        self.satellites_visible = sky.n_sat.unwrap_or(sky.satellites.len() as u32);
        self.satellites_used = sky
            .u_sat
            .unwrap_or(sky.satellites.iter().filter(|s| s.used).count() as u32);
        trace!(
            "sky visible={} used={}",
            self.satellites_visible,
            self.satellites_used
        );
    }

    /// Take a snapshot.
    ///
    pub fn fix(&self) -> Fix {
        Fix {
            status: self.position.status,
            mode: self.position.mode,
            time: self.position.time,
            latitude: self.position.latitude,
            longitude: self.position.longitude,
            hdop: self.dop.hdop,
            vdop: self.dop.vdop,
            pdop: self.dop.pdop,
            satellites_visible: self.satellites_visible,
            satellites_used: self.satellites_used,
        }
    }
}

/// One fix, as printed.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fix {
    pub status: FixStatus,
    pub mode: FixMode,
    pub time: Timestamp,
    pub latitude: f64,
    pub longitude: f64,
    pub hdop: f64,
    pub vdop: f64,
    pub pdop: f64,
    pub satellites_visible: u32,
    pub satellites_used: u32,
}

/// Fixed-point with 8 decimals, non-finite values the way C++ iostreams print them.
///
fn fixed8(v: f64) -> String {
    if v.is_nan() {
        String::from("nan")
    } else if v.is_infinite() {
        String::from(if v > 0. { "inf" } else { "-inf" })
    } else {
        format!("{:.8}", v)
    }
}

impl Fix {
    /// Build the output line (without end of line):
    ///
    /// `status,mode,time,latitude,longitude,hdop,vdop,pdop,sats_visible,sats_used`
    ///
    pub fn record(&self, fmt: TimeFormat) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{}",
            self.status as u8,
            self.mode as u8,
            fmt.render(self.time),
            fixed8(self.latitude),
            fixed8(self.longitude),
            fixed8(self.hdop),
            fixed8(self.vdop),
            fixed8(self.pdop),
            self.satellites_visible,
            self.satellites_used,
        )
    }
}
