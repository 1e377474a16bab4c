//! Runtime configuration. Flags win over `ROOTBAR_*` environment
//! variables; both fall back to built-in defaults. Unknown flags are
//! ignored.

use std::time::Duration;

pub const DEFAULT_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_INTERFACE: &str = "wlp3s0";
pub const DEFAULT_BATTERY: &str = "BAT0";

/// Where finished status lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    /// `xsetroot -name`, the classic dwm status bar.
    RootWindow,
    Stdout,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub interval: Duration,
    pub interface: String,
    pub battery: String,
    pub sink: Sink,
    pub once: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            interface: DEFAULT_INTERFACE.to_string(),
            battery: DEFAULT_BATTERY.to_string(),
            sink: Sink::RootWindow,
            once: false,
        }
    }
}

impl Config {
    /// Defaults overlaid with `ROOTBAR_*` environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var("ROOTBAR_INTERFACE") {
            cfg.interface = v;
        }
        if let Ok(v) = std::env::var("ROOTBAR_BATTERY") {
            cfg.battery = v;
        }
        if let Ok(v) = std::env::var("ROOTBAR_INTERVAL_MS") {
            cfg.set_interval_ms(&v);
        }
        cfg
    }

    fn set_interval_ms(&mut self, value: &str) {
        if let Ok(ms) = value.parse::<u64>() {
            self.interval = Duration::from_millis(ms);
        }
    }
}

/// What the command line asked for.
#[derive(Debug)]
pub enum Invocation {
    Run(Config),
    Help,
    Version,
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Invocation {
    parse_args_over(args, Config::from_env())
}

fn parse_args_over<I: IntoIterator<Item = String>>(args: I, mut cfg: Config) -> Invocation {
    let mut it = args.into_iter();
    let _ = it.next(); // program name
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Invocation::Help,
            "--version" | "-V" => return Invocation::Version,
            "--stdout" => cfg.sink = Sink::Stdout,
            "--once" => {
                cfg.once = true;
                cfg.sink = Sink::Stdout;
            }
            "--interface" | "-i" => {
                if let Some(v) = it.next() {
                    cfg.interface = v;
                }
            }
            "--battery" | "-b" => {
                if let Some(v) = it.next() {
                    cfg.battery = v;
                }
            }
            "--interval" | "-n" => {
                if let Some(v) = it.next() {
                    cfg.set_interval_ms(&v);
                }
            }
            _ if a.starts_with("--interface=") => {
                if let Some((_, v)) = a.split_once('=') {
                    cfg.interface = v.to_string();
                }
            }
            _ if a.starts_with("--battery=") => {
                if let Some((_, v)) = a.split_once('=') {
                    cfg.battery = v.to_string();
                }
            }
            _ if a.starts_with("--interval=") => {
                if let Some((_, v)) = a.split_once('=') {
                    cfg.set_interval_ms(v);
                }
            }
            _ => {}
        }
    }
    Invocation::Run(cfg)
}
