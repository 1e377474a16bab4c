//! Previous-sample state and the differencing rules that turn
//! cumulative counters into per-tick deltas and rates.

use std::time::Instant;

use crate::types::{CpuDelta, CpuSample};

/// Rates over intervals shorter than this are meaningless; report 0
/// instead of dividing by a near-zero elapsed.
const MIN_RATE_ELAPSED_SECS: f64 = 0.001;

/// Last-seen cumulative counters. Owned by the driver loop and handed
/// `&mut` into each tick; empty at startup, overwritten unconditionally
/// by every successful sample.
#[derive(Debug, Default)]
pub struct CounterStore {
    last_cpu: Option<CpuSample>,
    last_net: Option<NetCounters>,
}

#[derive(Debug, Clone, Copy)]
struct NetCounters {
    tx_bytes: u64,
    rx_bytes: u64,
    at: Instant,
}

impl CounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Difference the new cpu sample against the stored one.
    ///
    /// On the very first call the sample itself is the delta, which
    /// shows a one-time usage-since-boot figure; it is overwritten one
    /// tick later. Never clamps: a counter reset shows up as negative
    /// fields and the formatter floors the displayed value.
    pub fn cpu_delta(&mut self, current: CpuSample) -> CpuDelta {
        let previous = self.last_cpu.replace(current).unwrap_or_default();
        CpuDelta {
            user: current.user as i64 - previous.user as i64,
            nice: current.nice as i64 - previous.nice as i64,
            system: current.system as i64 - previous.system as i64,
            idle: current.idle as i64 - previous.idle as i64,
            iowait: current.iowait as i64 - previous.iowait as i64,
            irq: current.irq as i64 - previous.irq as i64,
            softirq: current.softirq as i64 - previous.softirq as i64,
            steal: current.steal as i64 - previous.steal as i64,
            guest: current.guest as i64 - previous.guest as i64,
            guest_nice: current.guest_nice as i64 - previous.guest_nice as i64,
        }
    }

    /// Turn cumulative interface byte counters into `(tx, rx)` rates in
    /// bytes/sec, flooring each direction independently.
    ///
    /// The first call reports 0 for both directions; so do a
    /// sub-millisecond elapsed and a counter that went backwards.
    pub fn net_rates(&mut self, tx_bytes: u64, rx_bytes: u64, now: Instant) -> (u64, u64) {
        let previous = self.last_net.replace(NetCounters {
            tx_bytes,
            rx_bytes,
            at: now,
        });
        let Some(prev) = previous else {
            return (0, 0);
        };

        let elapsed = now.duration_since(prev.at).as_secs_f64();
        if elapsed < MIN_RATE_ELAPSED_SECS {
            return (0, 0);
        }

        let rate = |current: u64, previous: u64| {
            current
                .checked_sub(previous)
                .map(|delta| (delta as f64 / elapsed).floor() as u64)
                .unwrap_or(0)
        };
        (rate(tx_bytes, prev.tx_bytes), rate(rx_bytes, prev.rx_bytes))
    }
}
