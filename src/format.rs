//! Display formatting: byte scaling, integer percentages, icon buckets
//! and the per-metric segments of the status line. Everything here is
//! pure; the glyphs are nerd-font codepoints.

use time::macros::format_description;
use time::OffsetDateTime;

use crate::types::{BatteryInfo, CpuDelta, NetworkSample, Volume};

const UNITS: [&str; 5] = ["B", "K", "M", "G", "T"];

// discharge icons by tenth of capacity, empty to full
const BATTERY_ICONS: [&str; 11] = [
    "󰂎", "󰁺", "󰁻", "󰁼", "󰁽", "󰁾", "󰁿", "󰂀", "󰂁", "󰂂", "󰁹",
];
const CHARGING_ICONS: [&str; 11] = [
    "󰢟", "󰢜", "󰂆", "󰂇", "󰂈", "󰢝", "󰂉", "󰢞", "󰂊", "󰂋", "󰂅",
];
const FULL_ICON: &str = "󰚥";

const UPLOAD_ICON: &str = "󰕒";
const DOWNLOAD_ICON: &str = "󰇚";
const CPU_ICON: &str = "\u{f4bc}";
const MEM_ICON: &str = "\u{efc5}";
const VOLUME_ICON: &str = "\u{f028}";
const MUTED_ICON: &str = "\u{eee8}";

/// Scale a byte count into a compact unit string. Precision narrows as
/// the scaled magnitude grows so wide values stay short on screen, and
/// trailing zeros are dropped.
pub fn bytes(value: u64) -> String {
    let mut scaled = value as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let precision = if scaled >= 100.0 {
        0
    } else if scaled >= 10.0 {
        1
    } else {
        2
    };

    let mut text = format!("{scaled:.precision$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    format!("{text}{}", UNITS[unit])
}

/// Integer percentage, rounded half-up. A zero total yields 0 rather
/// than a division error, and a negative part (counter reset) is
/// floored so the display never goes negative.
pub fn percentage(part: i64, total: i64) -> u8 {
    if total <= 0 {
        return 0;
    }
    let pct = (part.max(0) as f64 / total as f64 * 100.0).round();
    pct.min(100.0) as u8
}

pub fn network(sample: &NetworkSample) -> String {
    format!(
        "{UPLOAD_ICON} {}/s ({}) {DOWNLOAD_ICON} {}/s ({})",
        bytes(sample.tx_rate),
        bytes(sample.tx_bytes),
        bytes(sample.rx_rate),
        bytes(sample.rx_bytes),
    )
}

pub fn battery(info: &BatteryInfo) -> String {
    format!("{} {}%", battery_icon(info), info.capacity)
}

/// Capacity maps to one of 11 buckets; a charging status swaps in the
/// charging set and a status of exactly "Full" wins over both.
fn battery_icon(info: &BatteryInfo) -> &'static str {
    if info.status == "Full" {
        return FULL_ICON;
    }
    let bucket = usize::min((f64::from(info.capacity) / 10.0).round() as usize, 10);
    if info.status.starts_with("Charging") {
        CHARGING_ICONS[bucket]
    } else {
        BATTERY_ICONS[bucket]
    }
}

pub fn cpu(delta: &CpuDelta) -> String {
    format!("{CPU_ICON} {}%", percentage(delta.active(), delta.total()))
}

pub fn memory(used_kb: u64, total_kb: u64) -> String {
    format!(
        "{MEM_ICON} {}%",
        percentage(used_kb as i64, total_kb as i64)
    )
}

/// An audible level shows its floored percentage; anything else (the
/// muted sentinel, but also a genuinely zero level) shows the muted
/// indicator.
pub fn volume(v: Volume) -> String {
    if v.is_audible() {
        format!("{VOLUME_ICON} {}%", (v.0 * 100.0).floor() as u32)
    } else {
        format!("{MUTED_ICON} MUTED")
    }
}

/// Local wall-clock time; falls back to UTC when the local offset
/// cannot be determined (e.g. multi-threaded environment restrictions).
pub fn clock() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let fmt = format_description!("[hour]:[minute]:[second]");
    now.format(&fmt).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_scales_through_units() {
        assert_eq!(bytes(0), "0B");
        assert_eq!(bytes(500), "500B");
        assert_eq!(bytes(1024), "1K");
        assert_eq!(bytes(1536), "1.5K");
        assert_eq!(bytes(15_000), "14.6K");
        assert_eq!(bytes(1_048_576), "1M");
        assert_eq!(bytes(1_073_741_824), "1G");
    }

    #[test]
    fn bytes_stops_at_the_largest_unit() {
        // 5 PiB still renders in T rather than inventing a unit
        assert_eq!(bytes(5 * 1024u64.pow(5)), "5120T");
    }

    #[test]
    fn percentage_rounds_half_up_and_guards_zero_total() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(5, 8), 63);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(50, 0), 0);
        // counter reset: negative activity displays as 0
        assert_eq!(percentage(-10, 100), 0);
    }

    #[test]
    fn net_rate_of_one_mib_per_second_formats_as_1m() {
        let sample = NetworkSample {
            tx_bytes: 10_485_760,
            rx_bytes: 20_971_520,
            tx_rate: 1_048_576,
            rx_rate: 512,
        };
        let segment = network(&sample);
        assert!(segment.contains("1M/s"), "segment was {segment:?}");
        assert!(segment.contains("512B/s"));
        assert!(segment.contains("(10M)"));
        assert!(segment.contains("(20M)"));
    }

    fn bat(status: &str, capacity: u8) -> BatteryInfo {
        BatteryInfo {
            status: status.to_string(),
            capacity,
            energy_full: 50_000_000,
            energy_now: 25_000_000,
        }
    }

    #[test]
    fn full_status_wins_over_capacity_bucket() {
        assert_eq!(battery(&bat("Full", 95)), format!("{FULL_ICON} 95%"));
    }

    #[test]
    fn battery_buckets_round_to_nearest_tenth() {
        assert_eq!(battery_icon(&bat("Discharging", 0)), BATTERY_ICONS[0]);
        assert_eq!(battery_icon(&bat("Discharging", 95)), BATTERY_ICONS[10]);
        assert_eq!(battery_icon(&bat("Discharging", 54)), BATTERY_ICONS[5]);
        assert_eq!(battery_icon(&bat("Charging", 54)), CHARGING_ICONS[5]);
        assert_eq!(battery_icon(&bat("Charging", 100)), CHARGING_ICONS[10]);
    }

    #[test]
    fn volume_renders_floored_percent_or_muted() {
        assert_eq!(volume(Volume(0.55)), format!("{VOLUME_ICON} 55%"));
        assert_eq!(volume(Volume::MUTED), format!("{MUTED_ICON} MUTED"));
        // a genuinely zero level is indistinguishable from muted here
        assert_eq!(volume(Volume(0.0)), format!("{MUTED_ICON} MUTED"));
    }

    #[test]
    fn cpu_segment_uses_active_over_total() {
        let delta = CpuDelta {
            user: 30,
            system: 20,
            idle: 40,
            iowait: 10,
            ..Default::default()
        };
        assert_eq!(cpu(&delta), format!("{CPU_ICON} 50%"));
    }

    #[test]
    fn memory_segment_is_used_over_total() {
        assert_eq!(memory(750, 1000), format!("{MEM_ICON} 75%"));
    }

    #[test]
    fn clock_is_hh_mm_ss() {
        let t = clock();
        assert_eq!(t.len(), 8);
        assert_eq!(&t[2..3], ":");
        assert_eq!(&t[5..6], ":");
    }
}
