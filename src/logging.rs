//! Logging initializer
//!
//! Everything goes to stderr, stdout is reserved for fixes.
//!

use std::io;

use eyre::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use tracing_tree::HierarchicalLayer;

/// Default filter when `RUST_LOG` is not set.
///
fn level(verbose: u8) -> &'static str {
    match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init_logging(use_tree: bool, verbose: u8) -> Result<()> {
    // Load filters from environment, fallback on `-v`
    //
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level(verbose)));

    // Do we want hierarchical output?
    //
    let (tree, compact) = if use_tree {
        let tree = HierarchicalLayer::new(2)
            .with_writer(io::stderr)
            .with_targets(true)
            .with_verbose_entry(true)
            .with_verbose_exit(true)
            .with_bracketed_fields(true);
        (Some(tree), None)
    } else {
        let compact = fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .compact();
        (None, Some(compact))
    };

    // Combine filter & specific format
    //
    tracing_subscriber::registry()
        .with(filter)
        .with(tree)
        .with(compact)
        .try_init()?;

    Ok(())
}
