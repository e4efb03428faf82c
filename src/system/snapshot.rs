use serde::Serialize;

use super::process::ProcessSnapshot;

/// Everything shown for one refresh. Rebuilt from scratch each cycle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemSnapshot {
    pub cpu_utilization: Option<f64>,
    pub memory_utilization: Option<f64>,
    pub uptime_secs: Option<u64>,
    pub total_processes: Option<u64>,
    pub running_processes: Option<u64>,
    pub operating_system: Option<String>,
    pub kernel: Option<String>,
    /// Highest CPU users, descending.
    pub top_processes: Vec<ProcessSnapshot>,
}

/// Keeps the `n` highest CPU users, highest first. Ties go to the lower pid.
pub fn select_top(mut processes: Vec<ProcessSnapshot>, n: usize) -> Vec<ProcessSnapshot> {
    processes.sort_by(|a, b| b.cmp_cpu(a).then(a.pid.cmp(&b.pid)));
    processes.truncate(n);
    processes
}
