use crate::error::{ProbeError, ProbeResult};
use crate::parsers::{
    count_jobs_cygwin, count_jobs_macos, count_jobs_posix, parse_parent_pid, JobCount, PidMatchMode,
    DEFAULT_DENYLIST,
};
use crate::platform::{OsFamily, ProcessIds};
use crate::powerline::Powerline;
use crate::runner::{CommandRunner, CommandSpec};
use crate::segments::background::{BackgroundHandle, DEFAULT_JOIN_TIMEOUT};
use crate::segments::Segment;
use crate::style::{jobs_triple, JobsStyle, RenderTriple};
use crate::utils::debug_with_context;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use std::time::Duration;

/// Counts the shell's background jobs the way one platform family allows.
pub trait JobsProbe: Send + Sync {
    fn family(&self) -> OsFamily;

    fn probe_jobs(&self, ids: ProcessIds) -> BoxFuture<'_, ProbeResult<JobCount>>;
}

fn parent_pid(ids: ProcessIds) -> ProbeResult<u32> {
    ids.parent
        .ok_or_else(|| ProbeError::Unexpected("parent process id is not available".to_string()))
}

fn process_snapshot() -> CommandSpec {
    CommandSpec::new("ps").arg("-af")
}

/// `ps -af`, rows filtered by parent pid and a denylist.
pub struct MacOsJobs {
    runner: Arc<dyn CommandRunner>,
    denylist: Vec<String>,
}

impl MacOsJobs {
    pub fn new(runner: Arc<dyn CommandRunner>, extra_denylist: &[String]) -> Self {
        let mut denylist: Vec<String> = DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect();
        denylist.extend(extra_denylist.iter().cloned());
        Self { runner, denylist }
    }
}

impl JobsProbe for MacOsJobs {
    fn family(&self) -> OsFamily {
        OsFamily::MacOs
    }

    fn probe_jobs(&self, ids: ProcessIds) -> BoxFuture<'_, ProbeResult<JobCount>> {
        async move {
            let ppid = parent_pid(ids)?;
            let snapshot = self.runner.run(&process_snapshot()).await?;
            Ok(count_jobs_macos(&snapshot, ppid, &self.denylist))
        }
        .boxed()
    }
}

/// Cygwin's `ps -af`, whose third column is the parent pid.
pub struct CygwinJobs {
    runner: Arc<dyn CommandRunner>,
}

impl CygwinJobs {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl JobsProbe for CygwinJobs {
    fn family(&self) -> OsFamily {
        OsFamily::CygwinLike
    }

    fn probe_jobs(&self, ids: ProcessIds) -> BoxFuture<'_, ProbeResult<JobCount>> {
        async move {
            let ppid = parent_pid(ids)?;
            let snapshot = self.runner.run(&process_snapshot()).await?;
            count_jobs_cygwin(&snapshot, ppid)
        }
        .boxed()
    }
}

/// Two probes: the shell's parent, then every process's ppid.
pub struct PosixJobs {
    runner: Arc<dyn CommandRunner>,
    match_mode: PidMatchMode,
}

impl PosixJobs {
    pub fn new(runner: Arc<dyn CommandRunner>, match_mode: PidMatchMode) -> Self {
        Self { runner, match_mode }
    }

    pub fn grandparent_query(ppid: u32) -> CommandSpec {
        CommandSpec::new("ps").args(["-p".to_string(), ppid.to_string(), "-oppid=".to_string()])
    }

    pub fn ppid_listing() -> CommandSpec {
        CommandSpec::new("ps").args(["-a", "-o", "ppid"])
    }
}

impl JobsProbe for PosixJobs {
    fn family(&self) -> OsFamily {
        OsFamily::GenericPosix
    }

    fn probe_jobs(&self, ids: ProcessIds) -> BoxFuture<'_, ProbeResult<JobCount>> {
        async move {
            let ppid = parent_pid(ids)?;
            let grandparent = parse_parent_pid(&self.runner.run(&Self::grandparent_query(ppid)).await?)?;
            let listing = self.runner.run(&Self::ppid_listing()).await?;
            Ok(count_jobs_posix(&listing, grandparent, self.match_mode))
        }
        .boxed()
    }
}

/// Pick the probe strategy once, at startup.
pub fn jobs_probe_for(
    family: OsFamily,
    runner: Arc<dyn CommandRunner>,
    extra_denylist: &[String],
    match_mode: PidMatchMode,
) -> Arc<dyn JobsProbe> {
    match family {
        OsFamily::MacOs => Arc::new(MacOsJobs::new(runner, extra_denylist)),
        OsFamily::CygwinLike => Arc::new(CygwinJobs::new(runner)),
        OsFamily::GenericPosix => Arc::new(PosixJobs::new(runner, match_mode)),
    }
}

/// Background job count.
///
/// Gathering happens in [`JobsSegment::start`] (or [`JobsSegment::run`]) and
/// may take a couple of `ps` invocations; [`JobsSegment::add_to_powerline`]
/// only formats what was stored. Every failure along the way leaves the count
/// at zero, which renders nothing.
pub struct JobsSegment {
    pub enabled: bool,
    probe: Arc<dyn JobsProbe>,
    ids: ProcessIds,
    style: JobsStyle,
    join_timeout: Duration,
    jobs: JobCount,
}

impl JobsSegment {
    pub fn new(probe: Arc<dyn JobsProbe>, ids: ProcessIds, style: JobsStyle) -> Self {
        Self {
            enabled: true,
            probe,
            ids,
            style,
            join_timeout: DEFAULT_JOIN_TIMEOUT,
            jobs: JobCount::zero(),
        }
    }

    pub fn with_join_timeout(mut self, join_timeout: Duration) -> Self {
        self.join_timeout = join_timeout;
        self
    }

    /// Kick off the probe on the current tokio runtime and return right away.
    /// Called outside a runtime, the returned handle joins to a zero count.
    pub fn start(&self) -> BackgroundHandle<JobCount> {
        if !self.enabled {
            return BackgroundHandle::spawn(self.name(), self.join_timeout, async { Ok(JobCount::zero()) });
        }

        let probe = Arc::clone(&self.probe);
        let ids = self.ids;
        debug_with_context("jobs", &format!("probing with {} strategy", probe.family().name()));
        BackgroundHandle::spawn(self.name(), self.join_timeout, async move { probe.probe_jobs(ids).await })
    }

    /// Store a count obtained from a joined [`BackgroundHandle`].
    pub fn finish(&mut self, jobs: JobCount) {
        self.jobs = jobs;
    }

    /// Probe and store in one go. Never fails; problems leave a zero count.
    pub async fn run(&mut self) {
        let jobs = self.start().join().await;
        self.finish(jobs);
    }

    pub fn job_count(&self) -> JobCount {
        self.jobs
    }

    pub fn render(&self) -> Option<RenderTriple> {
        if !self.enabled {
            return None;
        }
        jobs_triple(self.jobs, &self.style)
    }

    pub fn add_to_powerline(&self, powerline: &mut Powerline) {
        if let Some(triple) = self.render() {
            powerline.append(triple);
        }
    }
}

impl Segment for JobsSegment {
    fn name(&self) -> &'static str {
        "jobs"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
