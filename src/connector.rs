//! Connection to the daemon.
//!
//! The `Connector` creates the session on first use and keeps it for the rest of the run.
//! Connecting again only sends a new `?WATCH` on the same session.
//!

use tracing::{debug, trace};

use crate::{GpsdError, Session, Watch};

/// Where gpsd listens by default
pub const DEFAULT_HOST: &str = "localhost";
/// gpsd well-known port
pub const DEFAULT_PORT: u16 = 2947;

#[derive(Debug)]
pub struct Connector {
    host: String,
    port: u16,
    /// Streaming mode requested on connect
    watch: Watch,
    session: Option<Session>,
}

impl Default for Connector {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl Connector {
    #[tracing::instrument]
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_owned(),
            port,
            watch: Watch::default(),
            session: None,
        }
    }

    /// Open the session if needed and start watch mode.  No retry.
    ///
    /// Failures are reported on stderr and return `false`.
    ///
    #[tracing::instrument(skip(self))]
    pub fn connect(&mut self) -> bool {
        match self.try_connect() {
            Ok(()) => true,
            Err(e) => {
                debug!("connect: {}", e);
                eprintln!("No GPSD running.");
                false
            }
        }
    }

    fn try_connect(&mut self) -> Result<(), GpsdError> {
        if self.session.is_none() {
            self.session = Some(Session::open(&self.host, self.port)?);
        } else {
            trace!("reusing session");
        }

        match self.session.as_mut() {
            Some(session) => session.watch(&self.watch),
            None => Err(GpsdError::Closed),
        }
    }

    /// Lend the session, if any, to the poller.
    ///
    pub fn session(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }
}
