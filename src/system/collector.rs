use super::metrics::{self, CpuSample};
use super::platform;
use super::process::{ProcessSnapshot, ProcessStat};
use super::reader::{Pid, Resource, SourcePaths, StatReader};
use super::snapshot::{SystemSnapshot, select_top};
use super::source::{ProcSource, RealFs};

/// Number of processes kept in a snapshot unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 10;

/// Pull-based sampler over the proc filesystem.
///
/// Every accessor performs its own read, parse and derive cycle, so two
/// calls may observe different OS state. The only thing carried between
/// calls is the last aggregate [`CpuSample`], which turns the cumulative
/// jiffy counters into an interval figure.
pub struct Collector<F: ProcSource = RealFs> {
    reader: StatReader<F>,
    ticks_per_second: u64,
    top_n: usize,
    last_cpu: Option<CpuSample>,
}

impl Default for Collector<RealFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector<RealFs> {
    pub fn new() -> Self {
        Self::with_paths(SourcePaths::default())
    }

    pub fn with_paths(paths: SourcePaths) -> Self {
        Self::with_source(RealFs, paths, platform::clock_ticks_per_second())
    }
}

impl<F: ProcSource> Collector<F> {
    pub fn with_source(fs: F, paths: SourcePaths, ticks_per_second: u64) -> Self {
        Collector {
            reader: StatReader::new(fs, paths),
            ticks_per_second,
            top_n: DEFAULT_TOP_N,
            last_cpu: None,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }

    pub fn reader(&self) -> &StatReader<F> {
        &self.reader
    }

    /// Aggregate CPU utilization since the previous call, or since boot on
    /// the first call.
    pub fn cpu_utilization(&mut self) -> Option<f64> {
        let stat = self.reader.read(Resource::GlobalStat)?;
        self.cpu_utilization_from(&stat)
    }

    fn cpu_utilization_from(&mut self, stat: &str) -> Option<f64> {
        let curr = CpuSample::parse(stat)?;
        let utilization = metrics::global_cpu_utilization(self.last_cpu.as_ref(), &curr);
        self.last_cpu = Some(curr);
        Some(utilization)
    }

    pub fn memory_utilization(&self) -> Option<f64> {
        let meminfo = self.reader.read(Resource::MemInfo)?;
        metrics::parse_meminfo(&meminfo).map(|sample| metrics::memory_utilization(&sample))
    }

    pub fn uptime(&self) -> Option<u64> {
        metrics::parse_uptime(&self.reader.read(Resource::Uptime)?)
    }

    pub fn total_processes(&self) -> Option<u64> {
        metrics::parse_process_counts(&self.reader.read(Resource::GlobalStat)?).total
    }

    pub fn running_processes(&self) -> Option<u64> {
        metrics::parse_process_counts(&self.reader.read(Resource::GlobalStat)?).running
    }

    pub fn operating_system(&self) -> Option<String> {
        metrics::parse_os_pretty_name(&self.reader.read(Resource::OsRelease)?)
    }

    pub fn kernel(&self) -> Option<String> {
        metrics::parse_kernel_version(&self.reader.read(Resource::Version)?)
    }

    pub fn pids(&self) -> Vec<Pid> {
        self.reader.pids()
    }

    /// Raw counters of one process, or `None` if it is gone.
    pub fn process_stat(&self, pid: Pid) -> Option<ProcessStat> {
        let stat = self.reader.read(Resource::ProcessStat(pid))?;
        let status = self.reader.read(Resource::ProcessStatus(pid))?;
        let cmdline = self
            .reader
            .read(Resource::ProcessCmdline(pid))
            .unwrap_or_default();
        Some(ProcessStat::parse(pid, &stat, &status, &cmdline))
    }

    /// Derived metrics of one process, or `None` if it is gone or the system
    /// uptime is unreadable.
    pub fn process(&self, pid: Pid) -> Option<ProcessSnapshot> {
        let uptime = self.uptime()?;
        let passwd = self.reader.read(Resource::UserDatabase).unwrap_or_default();
        self.derive_process(pid, &passwd, uptime)
    }

    fn derive_process(&self, pid: Pid, passwd: &str, uptime: u64) -> Option<ProcessSnapshot> {
        let Some(stat) = self.process_stat(pid) else {
            tracing::debug!(pid, "process vanished during scan");
            return None;
        };
        Some(ProcessSnapshot::derive(
            &stat,
            passwd,
            uptime,
            self.ticks_per_second,
        ))
    }

    /// Every visible process, in pid order. Processes that exit mid-scan
    /// are dropped.
    pub fn all_processes(&self) -> Vec<ProcessSnapshot> {
        let Some(uptime) = self.uptime() else {
            tracing::warn!("uptime unavailable; skipping process scan");
            return Vec::new();
        };
        self.scan(uptime)
    }

    fn scan(&self, uptime: u64) -> Vec<ProcessSnapshot> {
        let passwd = self.reader.read(Resource::UserDatabase).unwrap_or_default();
        self.pids()
            .into_iter()
            .filter_map(|pid| self.derive_process(pid, &passwd, uptime))
            .collect()
    }

    /// The top-N processes by CPU utilization, highest first.
    pub fn processes(&self) -> Vec<ProcessSnapshot> {
        select_top(self.all_processes(), self.top_n)
    }

    /// One refresh cycle. Each resource is read once and the uptime is
    /// shared by every per-process derivation, so the figures belong to
    /// the same instant.
    pub fn refresh(&mut self) -> SystemSnapshot {
        let _span = tracing::debug_span!("collector.refresh").entered();

        let stat = self.reader.read(Resource::GlobalStat);
        if stat.is_none() {
            tracing::warn!("global stat unavailable");
        }
        let cpu_utilization = stat
            .as_deref()
            .and_then(|stat| self.cpu_utilization_from(stat));
        let counts = stat
            .as_deref()
            .map(metrics::parse_process_counts)
            .unwrap_or_default();

        let uptime_secs = self.uptime();
        let top_processes = match uptime_secs {
            Some(uptime) => select_top(self.scan(uptime), self.top_n),
            None => {
                tracing::warn!("uptime unavailable; skipping process scan");
                Vec::new()
            }
        };

        let snapshot = SystemSnapshot {
            cpu_utilization,
            memory_utilization: self.memory_utilization(),
            uptime_secs,
            total_processes: counts.total,
            running_processes: counts.running,
            operating_system: self.operating_system(),
            kernel: self.kernel(),
            top_processes,
        };
        tracing::debug!(
            cpu = ?snapshot.cpu_utilization,
            memory = ?snapshot.memory_utilization,
            shown = snapshot.top_processes.len(),
            "refreshed"
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::source::MockFs;

    fn collector(fs: MockFs) -> Collector<MockFs> {
        Collector::with_source(fs, SourcePaths::default(), 100)
    }

    #[test]
    fn cpu_utilization_uses_delta_after_first_call() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/stat", "cpu 10 0 5 85 0 0 0 0\n");
        let mut first = collector(fs.clone());
        assert!((first.cpu_utilization().unwrap() - 0.15).abs() < 1e-9);

        fs.add_file("/proc/stat", "cpu 40 0 15 145 0 0 0 0\n");
        first.reader = StatReader::new(fs, SourcePaths::default());
        assert!((first.cpu_utilization().unwrap() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn missing_global_resources_are_unavailable() {
        let mut collector = collector(MockFs::new());
        assert_eq!(collector.cpu_utilization(), None);
        assert_eq!(collector.memory_utilization(), None);
        assert_eq!(collector.uptime(), None);
        assert_eq!(collector.total_processes(), None);
        assert_eq!(collector.operating_system(), None);
        assert_eq!(collector.kernel(), None);
        assert!(collector.processes().is_empty());

        let snapshot = collector.refresh();
        assert_eq!(snapshot.cpu_utilization, None);
        assert!(snapshot.top_processes.is_empty());
    }

    #[test]
    fn process_without_status_is_gone() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/uptime", "100.0 50.0\n");
        fs.add_process(5, "5 (sh) S 1 5 5 0 -1 0 0 0 0 0 10 10 0 0 20 0 1 0 0", "", "sh");
        fs.remove_file("/proc/5/status");
        let collector = collector(fs);

        assert_eq!(collector.pids(), vec![5]);
        assert_eq!(collector.process(5), None);
        assert!(collector.all_processes().is_empty());
    }
}
