//! Small gpsd client printing fixes as they come.
//!
//! The `Connector` opens a session to the daemon and asks for JSON watch mode.  The `Poller`
//! then reads reports from that session, ignores anything below a 2D fix and prints one
//! comma-separated line per accepted fix:
//!
//! ```text
//! status,mode,time,latitude,longitude,hdop,vdop,pdop,sats_visible,sats_used
//! ```
//!
//! Floating-point values have 8 decimals and the time is rendered with one of the
//! `TimeFormat` variants (ISO 8601 by default).
//!

mod cli;
mod connector;
mod error;
mod fix;
mod logging;
mod poller;
mod protocol;
mod session;
mod time;

use clap::{crate_name, crate_version};

pub use cli::*;
pub use connector::*;
pub use error::*;
pub use fix::*;
pub use logging::*;
pub use poller::*;
pub use protocol::*;
pub use session::*;
pub use time::*;

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}
