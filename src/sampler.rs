//! Per-metric readers. Each one reads a single kernel source (or runs
//! the mixer query) and returns a structured value, `Ok(None)` when the
//! backing device does not exist, or an error. Parsing is split from
//! the `tokio::fs` reads so it can be exercised without a live /proc.

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use tokio::fs;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::types::{BatteryInfo, CpuSample, MemInfo, Volume};

pub const PROC_STAT: &str = "/proc/stat";
pub const PROC_MEMINFO: &str = "/proc/meminfo";
pub const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";
pub const NET_DIR: &str = "/sys/class/net";

const VOLUME_CMD: &str = "wpctl";
const VOLUME_ARGS: [&str; 2] = ["get-volume", "@DEFAULT_AUDIO_SINK@"];

pub async fn read_cpu(stat_path: &Path) -> Result<CpuSample> {
    let text = fs::read_to_string(stat_path).await?;
    parse_cpu(&text)
}

/// Parse the aggregate "cpu" line of /proc/stat: ten whitespace-
/// separated tick counters after the label.
pub fn parse_cpu(stat: &str) -> Result<CpuSample> {
    let line = stat
        .lines()
        .find(|l| l.starts_with("cpu"))
        .ok_or_else(|| Error::Parse("no aggregate cpu line in stat".into()))?;

    let mut fields = line.split_whitespace();
    let _ = fields.next(); // "cpu"

    let mut ticks = [0u64; 10];
    for slot in ticks.iter_mut() {
        *slot = fields
            .next()
            .ok_or_else(|| Error::Parse("cpu line has too few fields".into()))?
            .parse()
            .map_err(|e| Error::Parse(format!("bad cpu tick value: {e}")))?;
    }

    let [user, nice, system, idle, iowait, irq, softirq, steal, guest, guest_nice] = ticks;
    Ok(CpuSample {
        user,
        nice,
        system,
        idle,
        iowait,
        irq,
        softirq,
        steal,
        guest,
        guest_nice,
    })
}

pub async fn read_meminfo(path: &Path) -> Result<MemInfo> {
    let text = fs::read_to_string(path).await?;
    parse_meminfo(&text)
}

/// Parse /proc/meminfo "Key:   value" lines into kilobyte counts. The
/// trailing colon is stripped from each key; empty keys are skipped.
pub fn parse_meminfo(text: &str) -> Result<MemInfo> {
    let mut info = MemInfo::default();
    for line in text.lines() {
        let mut parts = line.split_whitespace();
        let Some(raw_key) = parts.next() else {
            continue;
        };
        let key = raw_key.trim_end_matches(':');
        if key.is_empty() {
            continue;
        }
        let value = parts
            .next()
            .ok_or_else(|| Error::Parse(format!("meminfo line for {key} has no value")))?;
        let kb = value
            .parse::<u64>()
            .map_err(|e| Error::Parse(format!("bad meminfo value for {key}: {e}")))?;
        info.insert(key.to_string(), kb);
    }
    Ok(info)
}

/// Read one power-supply device. The device directory is probed first;
/// a host without that battery yields `Ok(None)`, while a read failure
/// after presence is confirmed is an error.
pub async fn read_battery(base: &Path, name: &str) -> Result<Option<BatteryInfo>> {
    let dir = base.join(name);
    if fs::metadata(&dir).await.is_err() {
        return Ok(None);
    }

    let (status, capacity, energy_full, energy_now) = tokio::try_join!(
        fs::read_to_string(dir.join("status")),
        fs::read_to_string(dir.join("capacity")),
        fs::read_to_string(dir.join("energy_full")),
        fs::read_to_string(dir.join("energy_now")),
    )?;

    Ok(Some(BatteryInfo {
        status: status.trim().to_string(),
        capacity: parse_int(&capacity, "battery capacity")?,
        energy_full: parse_int(&energy_full, "battery energy_full")?,
        energy_now: parse_int(&energy_now, "battery energy_now")?,
    }))
}

/// Read an interface's cumulative `(tx, rx)` byte counters, or `None`
/// when the interface does not exist.
pub async fn read_network(base: &Path, iface: &str) -> Result<Option<(u64, u64)>> {
    let dir = base.join(iface);
    if fs::metadata(&dir).await.is_err() {
        return Ok(None);
    }

    let stats = dir.join("statistics");
    let (tx, rx) = tokio::try_join!(
        fs::read_to_string(stats.join("tx_bytes")),
        fs::read_to_string(stats.join("rx_bytes")),
    )?;

    Ok(Some((
        parse_int(&tx, "tx_bytes")?,
        parse_int(&rx, "rx_bytes")?,
    )))
}

/// Query the default sink volume. `wpctl get-volume` prints a line like
/// "Volume: 0.55", with "[MUTED]" appended while the sink is muted.
pub async fn read_volume() -> Result<Volume> {
    let output = Command::new(VOLUME_CMD)
        .args(VOLUME_ARGS)
        .output()
        .await
        .map_err(|e| Error::ExternalTool(format!("{VOLUME_CMD}: {e}")))?;
    if !output.status.success() {
        return Err(Error::ExternalTool(format!(
            "{VOLUME_CMD} exited with {}",
            output.status
        )));
    }
    parse_volume(&String::from_utf8_lossy(&output.stdout))
}

/// A muted report wins over whatever level was printed next to it.
pub fn parse_volume(output: &str) -> Result<Volume> {
    if output.contains("MUTED") {
        return Ok(Volume::MUTED);
    }
    let level = output
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| Error::ExternalTool("mixer output has no level field".into()))?
        .parse::<f64>()
        .map_err(|e| Error::ExternalTool(format!("bad mixer level: {e}")))?;
    Ok(Volume(level))
}

fn parse_int<T>(text: &str, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    text.trim()
        .parse()
        .map_err(|e| Error::Parse(format!("bad {what}: {e}")))
}
