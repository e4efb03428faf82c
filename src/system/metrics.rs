//! Derivation of utilization figures from cumulative kernel counters.
//!
//! Everything here is a pure function of raw text or parsed samples. Input
//! that cannot be parsed comes back as `None` so callers can tell
//! "unavailable" apart from a legitimate zero.

use serde::Serialize;

use super::fields::{self, Tabs};

/// Aggregate CPU jiffies from the first line of the global stat file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CpuSample {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuSample {
    /// Parses `cpu u n s i w q sq st ...`. All eight counters must be present.
    pub fn parse(stat: &str) -> Option<CpuSample> {
        let line = stat.lines().next()?;
        let tokens = fields::tokenize(line, Tabs::AsSpace);
        if tokens.first() != Some(&"cpu") {
            return None;
        }
        Some(CpuSample {
            user: fields::field(&tokens, 2)?,
            nice: fields::field(&tokens, 3)?,
            system: fields::field(&tokens, 4)?,
            idle: fields::field(&tokens, 5)?,
            iowait: fields::field(&tokens, 6)?,
            irq: fields::field(&tokens, 7)?,
            softirq: fields::field(&tokens, 8)?,
            steal: fields::field(&tokens, 9)?,
        })
    }

    /// Counters saturate at `u64::MAX` rather than wrapping.
    pub fn active(&self) -> u64 {
        [self.nice, self.system, self.irq, self.softirq, self.steal]
            .into_iter()
            .fold(self.user, u64::saturating_add)
    }

    pub fn idle_total(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }

    pub fn total(&self) -> u64 {
        self.active().saturating_add(self.idle_total())
    }
}

/// Fraction of CPU time spent active.
///
/// With a previous sample the result covers the interval between the two;
/// without one, or when no jiffies elapsed in between, it falls back to the
/// since-boot ratio of `curr`.
pub fn global_cpu_utilization(prev: Option<&CpuSample>, curr: &CpuSample) -> f64 {
    if let Some(prev) = prev {
        let active = curr.active().saturating_sub(prev.active());
        let idle = curr.idle_total().saturating_sub(prev.idle_total());
        if let Some(ratio) = ratio(active, active.saturating_add(idle)) {
            return ratio;
        }
    }
    ratio(curr.active(), curr.total()).unwrap_or(0.0)
}

fn ratio(part: u64, whole: u64) -> Option<f64> {
    (whole > 0).then(|| (part as f64 / whole as f64).clamp(0.0, 1.0))
}

/// `MemTotal` and `MemAvailable` in kB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemorySample {
    pub total_kb: u64,
    pub available_kb: u64,
}

pub fn parse_meminfo(meminfo: &str) -> Option<MemorySample> {
    Some(MemorySample {
        total_kb: fields::key_value_u64(meminfo, "MemTotal")?,
        available_kb: fields::key_value_u64(meminfo, "MemAvailable")?,
    })
}

/// `(total - available) / total`, or 0 when total is 0.
pub fn memory_utilization(sample: &MemorySample) -> f64 {
    if sample.total_kb == 0 {
        return 0.0;
    }
    sample.total_kb.saturating_sub(sample.available_kb) as f64 / sample.total_kb as f64
}

/// Whole seconds since boot from the first token of the uptime file.
pub fn parse_uptime(uptime: &str) -> Option<u64> {
    let token = fields::tokenize(uptime, Tabs::AsSpace).into_iter().next()?;
    let whole = token.split('.').next()?;
    whole.parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProcessCounts {
    pub total: Option<u64>,
    pub running: Option<u64>,
}

pub fn parse_process_counts(stat: &str) -> ProcessCounts {
    ProcessCounts {
        total: fields::labelled_u64(stat, "processes"),
        running: fields::labelled_u64(stat, "procs_running"),
    }
}

/// Lifetime-average CPU fraction of one process.
///
/// The denominator is the process's own wall-clock age, so the figure is an
/// average over its whole life rather than over the sampling interval. May
/// exceed 1 for multi-threaded processes.
pub fn process_cpu_utilization(
    active_ticks: u64,
    start_ticks: u64,
    uptime_secs: u64,
    ticks_per_second: u64,
) -> f64 {
    if ticks_per_second == 0 {
        return 0.0;
    }
    let hz = ticks_per_second as f64;
    let elapsed = uptime_secs as f64 - start_ticks as f64 / hz;
    if elapsed <= 0.0 {
        return 0.0;
    }
    (active_ticks as f64 / hz) / elapsed
}

/// Seconds a process has been alive.
pub fn process_uptime(start_ticks: u64, uptime_secs: u64, ticks_per_second: u64) -> u64 {
    if ticks_per_second == 0 {
        return 0;
    }
    uptime_secs.saturating_sub(start_ticks / ticks_per_second)
}

/// `PRETTY_NAME` from an os-release file, single or double quotes removed.
pub fn parse_os_pretty_name(os_release: &str) -> Option<String> {
    os_release.lines().find_map(|line| {
        let (key, value) = line.trim().split_once('=')?;
        (key.trim() == "PRETTY_NAME").then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

/// Kernel release: the third token of `Linux version 6.8.0-45-generic ...`.
pub fn parse_kernel_version(version: &str) -> Option<String> {
    fields::tokenize(version, Tabs::AsSpace)
        .get(2)
        .map(|token| token.to_string())
}

/// Looks `uid` up in passwd-format text (`name:passwd:uid:...`).
pub fn lookup_user<'a>(uid: &str, passwd: &'a str) -> Option<&'a str> {
    passwd.lines().find_map(|line| {
        let mut parts = line.split(':');
        let name = parts.next()?;
        let _password = parts.next()?;
        (parts.next()? == uid).then_some(name)
    })
}

/// Username for `uid`, or an empty string when there is no record.
pub fn resolve_username(uid: &str, passwd: &str) -> String {
    lookup_user(uid, passwd).unwrap_or_default().to_string()
}
