//! Connect to the local gpsd and print every fix with at least a 2D solution on stdout.
//!
//! Usage: `gpsd-watch [-H host] [-p port] [-t local|utc|unix|iso8601] [-D] [-v]`
//!

use std::io;

use clap::Parser;
use eyre::Result;
use tracing::{debug, info};

use gpsd_watch::{init_logging, version, Connector, Opts, Poller};

fn main() -> Result<()> {
    let opts = Opts::parse();

    if opts.version {
        println!("{}", version());
        return Ok(());
    }

    init_logging(opts.debug, opts.verbose)?;
    info!("{} starting", version());

    let mut gpsd = Connector::new(&opts.host, opts.port);
    if !gpsd.connect() {
        return Ok(());
    }

    if let Some(session) = gpsd.session() {
        info!("watching {}", session.peer());

        let poller = Poller::new(opts.time_format);
        let mut stdout = io::stdout().lock();

        let stopped = poller.poll(session, &mut stdout)?;
        debug!("stopped: {:?}", stopped);
    }
    Ok(())
}
