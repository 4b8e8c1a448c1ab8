use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lanprobe_common::config::ScanConfig;
use lanprobe_common::error::ScanError;
use lanprobe_common::log::HOST_TARGET;
use lanprobe_common::network::{address::Address, host::HostRecord, range::HostRange};
use lanprobe_common::{info, warn};
use tracing::{debug, trace};

use super::{CancelToken, HostnameLookup, LivenessProbe, NameResolver, ScanReporter};
use crate::network::dns::{NoLookup, ReverseDnsLookup};
use crate::network::tcp::TcpConnectProbe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Completed,
    Cancelled,
}

impl From<ScanOutcome> for ScanState {
    fn from(outcome: ScanOutcome) -> Self {
        match outcome {
            ScanOutcome::Completed => ScanState::Completed,
            ScanOutcome::Cancelled => ScanState::Cancelled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub outcome: ScanOutcome,
    /// Addresses for which a progress event was emitted.
    pub probed: usize,
    pub found: usize,
    /// Reporter calls that returned an error.
    pub reporter_failures: usize,
}

struct Session {
    state: ScanState,
    cancel: Option<CancelToken>,
}

/// Runs discovery scans, one at a time.
///
/// `start` walks the range in ascending order. Per address it checks the
/// cancel token, emits progress, probes, and for live hosts resolves a name
/// and emits the record before moving on. A second `start` while one is
/// running is rejected with [`ScanError::AlreadyRunning`].
pub struct ScanController {
    probe: Arc<dyn LivenessProbe>,
    lookup: Arc<dyn HostnameLookup>,
    cfg: ScanConfig,
    session: Mutex<Session>,
}

impl ScanController {
    pub fn new(
        probe: Arc<dyn LivenessProbe>,
        lookup: Arc<dyn HostnameLookup>,
        cfg: ScanConfig,
    ) -> Self {
        Self {
            probe,
            lookup,
            cfg,
            session: Mutex::new(Session {
                state: ScanState::Idle,
                cancel: None,
            }),
        }
    }

    /// TCP connect probe plus system reverse lookups (or none, with `resolve_names` off).
    pub fn from_config(cfg: ScanConfig, resolve_names: bool) -> Self {
        let probe: Arc<dyn LivenessProbe> = Arc::new(TcpConnectProbe::from_config(&cfg));
        let lookup: Arc<dyn HostnameLookup> = if resolve_names {
            Arc::new(ReverseDnsLookup::from_config(&cfg))
        } else {
            Arc::new(NoLookup)
        };
        Self::new(probe, lookup, cfg)
    }

    pub fn config(&self) -> &ScanConfig {
        &self.cfg
    }

    pub fn state(&self) -> ScanState {
        self.lock_session().state
    }

    /// Cancels the running scan, if any. Returns whether one was running.
    pub fn stop(&self) -> bool {
        let session = self.lock_session();
        match (&session.state, &session.cancel) {
            (ScanState::Running, Some(token)) => {
                token.cancel();
                info!("Stop requested");
                true
            }
            _ => false,
        }
    }

    pub async fn start(
        &self,
        range: &HostRange,
        reporter: &dyn ScanReporter,
        cancel: &CancelToken,
    ) -> Result<ScanSummary, ScanError> {
        let mut run: RunGuard<'_> = self.begin(cancel)?;
        let resolver = NameResolver::new(self.lookup.clone(), &self.cfg.fallback_prefix);

        info!(
            "Scanning {} addresses ({}.{} to {}.{}) on port {}",
            range.len(),
            range.prefix(),
            range.lo(),
            range.prefix(),
            range.hi(),
            self.cfg.port
        );

        for (idx, address) in range.iter().enumerate() {
            if cancel.is_cancelled() {
                debug!(%address, "cancelled before probing");
                run.summary.outcome = ScanOutcome::Cancelled;
                break;
            }

            let index: usize = idx + 1;
            run.summary.probed = index;
            if let Err(e) = reporter.on_progress(index) {
                warn!(index, error = %e, "progress notification failed");
                run.summary.reporter_failures += 1;
            }

            if let Some(host) = self.inspect(&address, &resolver).await {
                run.summary.found += 1;
                if let Err(e) = reporter.on_host_found(host) {
                    warn!(%address, error = %e, "host notification failed");
                    run.summary.reporter_failures += 1;
                }
            }
        }

        Ok(run.finish())
    }

    /// Probes one address and, when live, builds its record.
    async fn inspect(&self, address: &Address, resolver: &NameResolver) -> Option<HostRecord> {
        if !self.probe.probe(address).await {
            trace!(%address, "not live");
            return None;
        }

        let name: String = resolver.resolve(address).await;
        info!(target: HOST_TARGET, %address, %name, "live host");
        Some(HostRecord::new(address.clone(), name, self.cfg.service.clone()))
    }

    fn begin(&self, cancel: &CancelToken) -> Result<RunGuard<'_>, ScanError> {
        let mut session = self.lock_session();
        if session.state == ScanState::Running {
            warn!("Scan rejected: another scan is still running");
            return Err(ScanError::AlreadyRunning);
        }
        session.state = ScanState::Running;
        session.cancel = Some(cancel.clone());

        Ok(RunGuard {
            controller: self,
            summary: ScanSummary {
                outcome: ScanOutcome::Completed,
                probed: 0,
                found: 0,
                reporter_failures: 0,
            },
            finished: false,
        })
    }

    fn lock_session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Leaves the controller in a terminal state however the scan ends,
/// including when the `start` future is dropped mid-scan.
struct RunGuard<'a> {
    controller: &'a ScanController,
    summary: ScanSummary,
    finished: bool,
}

impl RunGuard<'_> {
    fn finish(mut self) -> ScanSummary {
        self.finished = true;
        let s: &ScanSummary = &self.summary;
        match s.outcome {
            ScanOutcome::Completed => info!(
                "Scan complete: {} of {} addresses live",
                s.found, s.probed
            ),
            ScanOutcome::Cancelled => info!(
                "Scan cancelled after {} addresses, {} live",
                s.probed, s.found
            ),
        }
        self.summary.clone()
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let state: ScanState = if self.finished {
            self.summary.outcome.into()
        } else {
            ScanState::Cancelled
        };
        let mut session = self.controller.lock_session();
        session.state = state;
        session.cancel = None;
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
