use std::path::{Path, PathBuf};

use super::source::{ProcSource, RealFs};

pub type Pid = u32;

/// A logical OS status resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    GlobalStat,
    MemInfo,
    Uptime,
    OsRelease,
    Version,
    ProcessStat(Pid),
    ProcessStatus(Pid),
    ProcessCmdline(Pid),
    UserDatabase,
}

#[derive(Debug, Clone)]
pub struct SourcePaths {
    pub proc_root: PathBuf,
    pub os_release: PathBuf,
    pub passwd: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        SourcePaths {
            proc_root: PathBuf::from("/proc"),
            os_release: PathBuf::from("/etc/os-release"),
            passwd: PathBuf::from("/etc/passwd"),
        }
    }
}

/// Resolves [`Resource`]s to files and reads them as raw text.
///
/// A missing or unreadable file is an expected condition (a process may
/// exit between enumeration and read) and yields `None`. Nothing is retried.
pub struct StatReader<F: ProcSource = RealFs> {
    fs: F,
    paths: SourcePaths,
}

impl Default for StatReader<RealFs> {
    fn default() -> Self {
        Self::new(RealFs, SourcePaths::default())
    }
}

impl<F: ProcSource> StatReader<F> {
    pub fn new(fs: F, paths: SourcePaths) -> Self {
        StatReader { fs, paths }
    }

    pub fn paths(&self) -> &SourcePaths {
        &self.paths
    }

    pub fn path_of(&self, resource: Resource) -> PathBuf {
        let proc_root = &self.paths.proc_root;
        match resource {
            Resource::GlobalStat => proc_root.join("stat"),
            Resource::MemInfo => proc_root.join("meminfo"),
            Resource::Uptime => proc_root.join("uptime"),
            Resource::Version => proc_root.join("version"),
            Resource::OsRelease => self.paths.os_release.clone(),
            Resource::UserDatabase => self.paths.passwd.clone(),
            Resource::ProcessStat(pid) => proc_root.join(pid.to_string()).join("stat"),
            Resource::ProcessStatus(pid) => proc_root.join(pid.to_string()).join("status"),
            Resource::ProcessCmdline(pid) => proc_root.join(pid.to_string()).join("cmdline"),
        }
    }

    pub fn read(&self, resource: Resource) -> Option<String> {
        let path = self.path_of(resource);
        match self.fs.read_to_string(&path) {
            Ok(content) => Some(content),
            Err(err) => {
                tracing::trace!(path = %path.display(), error = %err, "resource unavailable");
                None
            }
        }
    }

    /// Numeric directory entries under the proc root, ascending.
    pub fn pids(&self) -> Vec<Pid> {
        let root = &self.paths.proc_root;
        let entries = match self.fs.read_dir(root) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path = %root.display(), error = %err, "cannot list process directory");
                return Vec::new();
            }
        };

        let mut pids: Vec<Pid> = entries
            .iter()
            .filter(|path| self.fs.is_dir(path))
            .filter_map(|path| pid_from_path(path))
            .collect();
        pids.sort_unstable();
        pids
    }
}

fn pid_from_path(path: &Path) -> Option<Pid> {
    let name = path.file_name()?.to_str()?;
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}
