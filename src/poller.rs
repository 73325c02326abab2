//! The polling loop.
//!
//! After an initial wait for anything at all from the daemon, we loop forever: wait for
//! data, read one report, then keep reading (one second apart) until the snapshot has at
//! least a 2D fix and print it.  Only two things end the loop:
//!
//! - nothing within the initial wait,
//! - a failed read right after a successful wait.
//!
//! There is no bound on the retries for a usable fix.
//!

use std::io::Write;
use std::thread;
use std::time::Duration;

use tracing::{debug, trace};

use crate::{Fix, FixSource, GpsdError, TimeFormat};

/// How long to wait for data, both initially and in the loop
pub const WAIT_TIMEOUT: Duration = Duration::from_micros(1_000_000);
/// Delay between two reads while waiting for a usable fix
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// All the delays of the loop.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    pub initial_wait: Duration,
    pub wait: Duration,
    pub retry: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            initial_wait: WAIT_TIMEOUT,
            wait: WAIT_TIMEOUT,
            retry: RETRY_DELAY,
        }
    }
}

/// Why the loop ended.
///
#[derive(Debug)]
pub enum Stopped {
    /// Nothing during the initial wait
    NoData,
    /// Read failure after a successful wait
    ReadError(GpsdError),
}

#[derive(Clone, Debug, Default)]
pub struct Poller {
    format: TimeFormat,
    timings: Timings,
}

impl Poller {
    pub fn new(format: TimeFormat) -> Self {
        Self {
            format,
            timings: Timings::default(),
        }
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub fn format(&self) -> TimeFormat {
        self.format
    }

    /// Run the loop, printing accepted fixes into `out`.
    ///
    /// Diagnostics go to stderr.  Only failing to write into `out` is an error.
    ///
    #[tracing::instrument(skip(self, source, out))]
    pub fn poll<S, W>(&self, source: &mut S, out: &mut W) -> Result<Stopped, GpsdError>
    where
        S: FixSource,
        W: Write,
    {
        if !ready(source, self.timings.initial_wait) {
            eprintln!("After a second there is no data!");
            return Ok(Stopped::NoData);
        }

        loop {
            if !ready(source, self.timings.wait) {
                continue;
            }

            if let Err(e) = source.read() {
                debug!("read: {}", e);
                eprintln!("GPSD read error");
                return Ok(Stopped::ReadError(e));
            }

            let fix = self.next_fix(source);

            writeln!(out, "{}", fix.record(self.format))?;
            out.flush()?;
        }
    }

    /// Read until we get at least a 2D fix.
    ///
    fn next_fix<S: FixSource>(&self, source: &mut S) -> Fix {
        loop {
            match source.read() {
                Ok(fix) if fix.mode.is_usable() => return fix,
                Ok(fix) => trace!("mode {} too low", fix.mode),
                Err(e) => trace!("read: {}", e),
            }
            thread::sleep(self.timings.retry);
        }
    }
}

/// A failed wait counts as ready so that the next read reports the problem.
///
fn ready<S: FixSource>(source: &mut S, timeout: Duration) -> bool {
    match source.waiting(timeout) {
        Ok(ready) => ready,
        Err(e) => {
            debug!("waiting: {}", e);
            true
        }
    }
}
