//! One tick: fan out to every sampler concurrently, difference the
//! cumulative counters against the store, and assemble the status line
//! from whichever metrics are available.

use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format;
use crate::sampler;
use crate::state::CounterStore;
use crate::types::{BatteryInfo, CpuSample, MemInfo, NetworkSample, Volume};

const SEPARATOR: &str = " | ";

/// Sample everything and build the line for this tick.
///
/// Cpu, memory and volume are mandatory: any failure there (or a read
/// failure on a device whose presence was confirmed) fails the whole
/// tick. The store is only touched once every read has succeeded, so a
/// failed tick caches nothing.
pub async fn build_status(cfg: &Config, store: &mut CounterStore) -> Result<String> {
    let (cpu, mem, battery, network, volume) = tokio::join!(
        sampler::read_cpu(Path::new(sampler::PROC_STAT)),
        sampler::read_meminfo(Path::new(sampler::PROC_MEMINFO)),
        sampler::read_battery(Path::new(sampler::POWER_SUPPLY_DIR), &cfg.battery),
        sampler::read_network(Path::new(sampler::NET_DIR), &cfg.interface),
        sampler::read_volume(),
    );

    assemble(cpu?, &mem?, battery?, network?, volume?, store, Instant::now())
}

/// Join the available segments in fixed order:
/// network, battery, cpu, memory, volume, clock.
fn assemble(
    cpu: CpuSample,
    mem: &MemInfo,
    battery: Option<BatteryInfo>,
    network: Option<(u64, u64)>,
    volume: Volume,
    store: &mut CounterStore,
    now: Instant,
) -> Result<String> {
    // validate the mandatory meminfo fields before the store is touched,
    // so a failed tick caches nothing
    let total = mem
        .total_kb()
        .ok_or_else(|| Error::Parse("meminfo is missing MemTotal".into()))?;
    let available = mem
        .available_kb()
        .ok_or_else(|| Error::Parse("meminfo is missing MemAvailable".into()))?;

    let mut segments: Vec<String> = Vec::with_capacity(6);

    if let Some((tx_bytes, rx_bytes)) = network {
        let (tx_rate, rx_rate) = store.net_rates(tx_bytes, rx_bytes, now);
        segments.push(format::network(&NetworkSample {
            tx_bytes,
            rx_bytes,
            tx_rate,
            rx_rate,
        }));
    }

    if let Some(info) = battery {
        segments.push(format::battery(&info));
    }

    segments.push(format::cpu(&store.cpu_delta(cpu)));
    segments.push(format::memory(total.saturating_sub(available), total));

    segments.push(format::volume(volume));
    segments.push(format::clock());

    Ok(segments.join(SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::parse_meminfo;

    fn cpu_sample() -> CpuSample {
        CpuSample {
            user: 50,
            idle: 50,
            ..Default::default()
        }
    }

    fn mem_info() -> MemInfo {
        parse_meminfo("MemTotal: 1000 kB\nMemAvailable: 250 kB\n").unwrap()
    }

    #[test]
    fn absent_devices_leave_no_empty_segments() {
        let mut store = CounterStore::new();
        let line = assemble(
            cpu_sample(),
            &mem_info(),
            None,
            None,
            Volume(0.55),
            &mut store,
            Instant::now(),
        )
        .unwrap();

        let segments: Vec<&str> = line.split(SEPARATOR).collect();
        assert_eq!(segments.len(), 4, "line was {line:?}");
        assert!(segments[0].ends_with(" 50%")); // first-tick cpu: active/total
        assert!(segments[1].ends_with(" 75%"));
        assert!(segments[2].ends_with(" 55%"));
        // clock, HH:MM:SS
        assert_eq!(segments[3].len(), 8);
        assert!(!line.contains("  "), "no empty separators: {line:?}");
    }

    #[test]
    fn present_devices_prepend_their_segments_in_order() {
        let mut store = CounterStore::new();
        let battery = BatteryInfo {
            status: "Discharging".into(),
            capacity: 80,
            energy_full: 50_000_000,
            energy_now: 40_000_000,
        };
        let line = assemble(
            cpu_sample(),
            &mem_info(),
            Some(battery),
            Some((2048, 4096)),
            Volume::MUTED,
            &mut store,
            Instant::now(),
        )
        .unwrap();

        let segments: Vec<&str> = line.split(SEPARATOR).collect();
        assert_eq!(segments.len(), 6, "line was {line:?}");
        // first network sample: totals shown, rates are 0
        assert!(segments[0].contains("0B/s (2K)"), "net was {:?}", segments[0]);
        assert!(segments[0].contains("0B/s (4K)"));
        assert!(segments[1].ends_with(" 80%"));
        assert!(segments[4].ends_with("MUTED"));
    }

    #[test]
    fn meminfo_without_required_fields_fails_the_tick() {
        let mut store = CounterStore::new();
        let mem = parse_meminfo("MemFree: 10 kB\n").unwrap();
        let err = assemble(
            cpu_sample(),
            &mem,
            None,
            None,
            Volume(0.5),
            &mut store,
            Instant::now(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
