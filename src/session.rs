//! Live connection to gpsd.
//!
//! A `Session` owns the TCP stream, a buffered reader on top of it and everything learned
//! from the reports read so far.  It is created by the `Connector` and lent to the `Poller`
//! through the `FixSource` trait.
//!

use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::net::TcpStream;
use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::{Fix, GpsData, GpsdError, Report, Watch};

/// What the poller needs from a daemon connection.
///
pub trait FixSource {
    /// Block up to `timeout` for data.  `true` means a read will not wait for the first byte,
    /// this includes the peer having closed the connection.
    fn waiting(&mut self, timeout: Duration) -> Result<bool, GpsdError>;
    /// Read and apply one report, returning the updated snapshot.
    fn read(&mut self) -> Result<Fix, GpsdError>;
}

#[derive(Debug)]
pub struct Session {
    /// `host:port` we are connected to
    peer: String,
    reader: BufReader<TcpStream>,
    data: GpsData,
    /// gpsd release, from the `VERSION` report
    release: Option<String>,
    /// Last `ERROR` message from the daemon
    last_error: Option<String>,
    /// Reports read so far
    reports: u64,
}

impl Session {
    /// Connect to the daemon.
    ///
    #[tracing::instrument]
    pub fn open(host: &str, port: u16) -> Result<Self, GpsdError> {
        let peer = format!("{}:{}", host, port);
        trace!("tcp::connect({})", peer);

        let conn =
            TcpStream::connect((host, port)).map_err(|e| GpsdError::Connect(peer.clone(), e))?;
        conn.set_nodelay(true)?;
        debug!("connected to {}", peer);

        Ok(Self {
            peer,
            reader: BufReader::new(conn),
            data: GpsData::new(),
            release: None,
            last_error: None,
            reports: 0,
        })
    }

    /// Send a `?WATCH` command.
    ///
    #[tracing::instrument(skip(self))]
    pub fn watch(&mut self, watch: &Watch) -> Result<(), GpsdError> {
        let cmd = watch.command()?;
        trace!("cmd={}", cmd.trim_end());

        let conn = self.reader.get_mut();
        conn.write_all(cmd.as_bytes())?;
        conn.flush()?;
        Ok(())
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    pub fn data(&self) -> &GpsData {
        &self.data
    }

    pub fn release(&self) -> Option<&str> {
        self.release.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn reports(&self) -> u64 {
        self.reports
    }
}

impl FixSource for Session {
    fn waiting(&mut self, timeout: Duration) -> Result<bool, GpsdError> {
        if !self.reader.buffer().is_empty() {
            return Ok(true);
        }

        // A zero timeout is rejected by the socket layer.
        //
        let timeout = timeout.max(Duration::from_micros(1));
        self.reader.get_ref().set_read_timeout(Some(timeout))?;

        let ready = match self.reader.fill_buf() {
            Ok(_) => Ok(true),
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
                ) =>
            {
                Ok(false)
            }
            Err(e) => Err(GpsdError::Io(e)),
        };

        self.reader.get_ref().set_read_timeout(None)?;
        ready
    }

    fn read(&mut self) -> Result<Fix, GpsdError> {
        let mut line = String::new();

        if self.reader.read_line(&mut line)? == 0 {
            return Err(GpsdError::Closed);
        }
        self.reports += 1;
        trace!("line={}", line.trim_end());

        match Report::parse(&line)? {
            Report::Tpv(tpv) => self.data.apply_tpv(&tpv),
            Report::Sky(sky) => self.data.apply_sky(&sky),
            Report::Version(v) => {
                info!(
                    "gpsd {} (protocol {}.{})",
                    v.release, v.proto_major, v.proto_minor
                );
                self.release = Some(v.release);
            }
            // Still a report, the snapshot is unchanged.
            Report::Error(e) => {
                warn!("gpsd: {}", e.message);
                self.last_error = Some(e.message);
            }
            Report::Devices | Report::Watch | Report::Other => trace!("ignored"),
        }
        Ok(self.data.fix())
    }
}
