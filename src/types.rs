//! Plain data passed between the samplers, the counter store and the
//! formatter.

use std::collections::HashMap;

/// Aggregate cpu tick counters from the "cpu" line of `/proc/stat`,
/// cumulative since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuSample {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

/// Field-wise difference between two successive [`CpuSample`]s.
///
/// Signed on purpose: a counter reset (reboot between samples) makes a
/// field negative and the differ does not clamp. Keeping displayed
/// usage non-negative is the formatter's job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuDelta {
    pub user: i64,
    pub nice: i64,
    pub system: i64,
    pub idle: i64,
    pub iowait: i64,
    pub irq: i64,
    pub softirq: i64,
    pub steal: i64,
    pub guest: i64,
    pub guest_nice: i64,
}

impl CpuDelta {
    /// All ticks spent this interval, idle included.
    pub fn total(&self) -> i64 {
        self.user
            + self.nice
            + self.system
            + self.idle
            + self.iowait
            + self.irq
            + self.softirq
            + self.steal
            + self.guest
            + self.guest_nice
    }

    /// Ticks spent idle or waiting on i/o.
    pub fn idle_time(&self) -> i64 {
        self.idle + self.iowait
    }

    /// Ticks spent doing work.
    pub fn active(&self) -> i64 {
        self.total() - self.idle_time()
    }
}

/// Parsed `/proc/meminfo`: field name to size in kilobytes. Only
/// `MemTotal` and `MemAvailable` are consumed downstream; the rest ride
/// along untouched.
#[derive(Debug, Clone, Default)]
pub struct MemInfo {
    fields: HashMap<String, u64>,
}

impl MemInfo {
    pub fn insert(&mut self, key: String, kb: u64) {
        self.fields.insert(key, kb);
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.fields.get(key).copied()
    }

    pub fn total_kb(&self) -> Option<u64> {
        self.get("MemTotal")
    }

    pub fn available_kb(&self) -> Option<u64> {
        self.get("MemAvailable")
    }
}

/// One power-supply device's state. `energy_full`/`energy_now` are
/// sampled alongside the rest but only `capacity` drives the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatteryInfo {
    pub status: String,
    pub capacity: u8,
    pub energy_full: u64,
    pub energy_now: u64,
}

/// Cumulative interface byte counters plus the rates derived from the
/// previous sample (0 until a previous sample exists).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkSample {
    pub tx_bytes: u64,
    pub rx_bytes: u64,
    pub tx_rate: u64,
    pub rx_rate: u64,
}

/// Mixer level in `[0, 1]`; negative is the muted sentinel, regardless
/// of whatever level the mixer reported alongside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(pub f64);

impl Volume {
    pub const MUTED: Volume = Volume(-1.0);

    pub fn is_audible(&self) -> bool {
        self.0 > 0.0
    }
}
