//! rootbar: samples host metrics once per interval and pushes a compact
//! status line to the X root window name (the dwm status bar).
//!
//! A tick fans out to all samplers concurrently, differences the
//! cumulative counters against the previous tick, formats the result,
//! and pushes it before the next delay starts. Ticks never overlap. A
//! failed tick pushes the error text instead of a metrics line and the
//! loop carries on.

mod bar;
mod config;
mod error;
mod format;
mod sampler;
mod state;
mod status;
mod types;

use anyhow::Result;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{parse_args, Invocation};
use crate::state::CounterStore;

const USAGE: &str = "\
rootbar - push a host status line to the X root window

USAGE:
    rootbar [OPTIONS]

OPTIONS:
    -i, --interface <IFACE>   network interface to watch [default: wlp3s0]
    -b, --battery <NAME>      power supply device name [default: BAT0]
    -n, --interval <MS>       milliseconds between updates [default: 1000]
        --stdout              print lines instead of calling xsetroot
        --once                take a single sample, print it, and exit
    -h, --help                print this help
    -V, --version             print the version

ENVIRONMENT:
    ROOTBAR_INTERFACE, ROOTBAR_BATTERY, ROOTBAR_INTERVAL_MS
    RUST_LOG                  tracing filter (e.g. rootbar=debug)
";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rootbar=info")),
        )
        .init();

    let cfg = match parse_args(std::env::args()) {
        Invocation::Help => {
            print!("{USAGE}");
            return Ok(());
        }
        Invocation::Version => {
            println!("rootbar {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Invocation::Run(cfg) => cfg,
    };

    let mut store = CounterStore::new();

    loop {
        let line = match status::build_status(&cfg, &mut store).await {
            Ok(line) => line,
            Err(e) => {
                warn!("tick failed: {e}");
                e.to_string()
            }
        };
        debug!(%line, "pushing status");

        if let Err(e) = bar::push(cfg.sink, &line).await {
            warn!("push failed: {e}");
        }

        if cfg.once {
            return Ok(());
        }
        tokio::time::sleep(cfg.interval).await;
    }
}
