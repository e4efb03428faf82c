use std::cmp::Ordering;

use serde::Serialize;

use super::fields::{self, StatField};
use super::metrics;
use super::reader::Pid;

/// Raw per-process counters, rebuilt from text on every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessStat {
    pub pid: Pid,
    /// utime + stime, in clock ticks.
    pub active_ticks: u64,
    /// Start time in clock ticks since boot.
    pub start_ticks: u64,
    pub vm_size_kb: u64,
    pub uid: Option<String>,
    pub command: String,
}

impl ProcessStat {
    /// Builds a stat from the `stat`, `status` and `cmdline` files of `pid`.
    pub fn parse(pid: Pid, stat: &str, status: &str, cmdline: &str) -> ProcessStat {
        let tokens = fields::stat_tokens(stat);
        let active_ticks = fields::stat_field(&tokens, StatField::Utime)
            .saturating_add(fields::stat_field(&tokens, StatField::Stime));

        let mut command = cmdline_to_string(cmdline);
        if command.is_empty()
            && let Some(comm) = fields::stat_comm(&tokens)
        {
            command = format!("[{comm}]");
        }

        ProcessStat {
            pid,
            active_ticks,
            start_ticks: fields::stat_field(&tokens, StatField::StartTime),
            vm_size_kb: fields::key_value_u64(status, "VmSize").unwrap_or(0),
            uid: fields::key_value(status, "Uid").map(str::to_string),
            command,
        }
    }
}

fn cmdline_to_string(cmdline: &str) -> String {
    cmdline
        .trim_end_matches('\0')
        .split('\0')
        .collect::<Vec<_>>()
        .join(" ")
}

/// One process at a sampling instant. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSnapshot {
    pub pid: Pid,
    /// Lifetime-average fraction of one CPU; may exceed 1.
    pub cpu_utilization: f64,
    pub ram_mb: u64,
    pub user: String,
    pub uptime_secs: u64,
    pub command: String,
}

impl ProcessSnapshot {
    pub fn derive(
        stat: &ProcessStat,
        passwd: &str,
        uptime_secs: u64,
        ticks_per_second: u64,
    ) -> ProcessSnapshot {
        let user = stat
            .uid
            .as_deref()
            .map(|uid| metrics::resolve_username(uid, passwd))
            .unwrap_or_default();

        ProcessSnapshot {
            pid: stat.pid,
            cpu_utilization: metrics::process_cpu_utilization(
                stat.active_ticks,
                stat.start_ticks,
                uptime_secs,
                ticks_per_second,
            ),
            ram_mb: stat.vm_size_kb / 1024,
            user,
            uptime_secs: metrics::process_uptime(stat.start_ticks, uptime_secs, ticks_per_second),
            command: stat.command.clone(),
        }
    }

    /// Memory as displayed, in whole megabytes.
    pub fn ram(&self) -> String {
        self.ram_mb.to_string()
    }

    /// Orders by CPU utilization, ascending.
    pub fn cmp_cpu(&self, other: &ProcessSnapshot) -> Ordering {
        self.cpu_utilization.total_cmp(&other.cpu_utilization)
    }
}
