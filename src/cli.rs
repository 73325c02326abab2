//! Command-line options.
//!
//! Without any option we connect to `localhost:2947` and print ISO 8601 timestamps.
//!

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};

use crate::{TimeFormat, DEFAULT_HOST, DEFAULT_PORT};

/// CLI options
#[derive(Debug, Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// debug mode (hierarchical traces).
    #[clap(short = 'D', long = "debug")]
    pub debug: bool,
    /// gpsd host.
    #[clap(short = 'H', long, default_value = DEFAULT_HOST)]
    pub host: String,
    /// gpsd port.
    #[clap(short = 'p', long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// How to display the fix time.
    #[clap(short = 't', long = "time-format", value_enum, default_value_t = TimeFormat::Iso8601)]
    pub time_format: TimeFormat,
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Display utility full version.
    #[clap(short = 'V', long)]
    pub version: bool,
}
