//! Scan orchestration.
//!
//! Targets are normalized and deduplicated, expanded into zone candidates,
//! and every candidate not already covered by an earlier target is resolved
//! and probed. Zone candidates are handled one at a time; with a
//! concurrency above one, the nameservers of a single candidate are probed
//! together and their results folded back in nameserver order.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use axfrscan_core::{Domain, ManagedFilter, Nameserver, ScanState, ZoneCandidate};
use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use tracing::{debug, info_span, Instrument};

use crate::dns::DnsQuery;
use crate::error::{ResolveError, TransferFailure};
use crate::nameservers::resolve_ns;
use crate::report::{Finding, ScanReport};
use crate::transfer::{TransferEngine, TransferResult};

/// Something that happened during a scan
#[derive(Debug, Clone, Copy)]
pub enum ScanEvent<'a> {
    /// Targets were normalized and deduplicated
    TargetsLoaded {
        /// Number of distinct targets
        count: usize,
    },
    /// Work on a target begins
    TargetStarted {
        /// Normalized target
        domain: &'a Domain,
    },
    /// A zone candidate was already covered by an earlier target
    ZoneAlreadyTested {
        /// Skipped candidate
        zone: &'a ZoneCandidate,
    },
    /// A zone candidate is about to be resolved
    ZoneStarted {
        /// Candidate under test
        zone: &'a ZoneCandidate,
    },
    /// Nameservers were found for a zone
    NameserversFound {
        /// Candidate under test
        zone: &'a ZoneCandidate,
        /// Resolved hostnames
        nameservers: &'a BTreeSet<Nameserver>,
    },
    /// No nameservers for a zone
    ResolveFailed {
        /// Candidate under test
        zone: &'a ZoneCandidate,
        /// Why nothing came back
        error: &'a ResolveError,
    },
    /// A managed nameserver was skipped without a query
    ManagedSkipped {
        /// Candidate under test
        zone: &'a ZoneCandidate,
        /// Skipped nameserver
        nameserver: &'a Nameserver,
        /// Signature that matched
        signature: &'a str,
    },
    /// An AXFR request is about to be sent
    TransferStarted {
        /// Candidate under test
        zone: &'a ZoneCandidate,
        /// Queried nameserver
        nameserver: &'a Nameserver,
    },
    /// The nameserver did not hand out the zone
    TransferFailed {
        /// Candidate under test
        zone: &'a ZoneCandidate,
        /// Queried nameserver
        nameserver: &'a Nameserver,
        /// Failure reason
        failure: &'a TransferFailure,
    },
    /// The nameserver handed out the zone
    TransferSucceeded {
        /// Vulnerable zone
        zone: &'a ZoneCandidate,
        /// Misconfigured nameserver
        nameserver: &'a Nameserver,
        /// Reported record count
        records: Option<u64>,
    },
    /// The transfer payload was written to disk
    Saved {
        /// Vulnerable zone
        zone: &'a ZoneCandidate,
        /// Misconfigured nameserver
        nameserver: &'a Nameserver,
        /// Written file
        path: &'a Path,
    },
    /// The transfer payload could not be written
    SaveFailed {
        /// Vulnerable zone
        zone: &'a ZoneCandidate,
        /// Misconfigured nameserver
        nameserver: &'a Nameserver,
        /// Intended file
        path: &'a Path,
        /// Write error
        error: &'a std::io::Error,
    },
}

/// Receives scan progress.
///
/// The unit type ignores everything.
pub trait ScanObserver: Send + Sync {
    /// Called for every event, in the order the scan produces them
    fn on_event(&self, event: ScanEvent<'_>);
}

impl ScanObserver for () {
    fn on_event(&self, _event: ScanEvent<'_>) {}
}

/// Scan settings
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Bound on every NS lookup and every AXFR request
    pub timeout: Duration,
    /// Directory for successful transfers
    pub output_dir: Option<PathBuf>,
    /// Nameservers of one zone probed at a time
    pub concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            output_dir: None,
            concurrency: 1,
        }
    }
}

/// Normalize raw targets into a sorted set of distinct domains.
///
/// Entries that normalize to nothing are dropped.
pub fn collect_targets<I, S>(targets: I) -> BTreeSet<Domain>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    targets
        .into_iter()
        .map(|raw| Domain::parse(raw.as_ref()))
        .filter(|domain| !domain.is_empty())
        .collect()
}

/// Drives the zone-transfer audit
pub struct Scanner<D> {
    dns: D,
    filter: ManagedFilter,
    config: ScanConfig,
}

impl<D: DnsQuery> Scanner<D> {
    /// Scanner with default settings and the built-in managed filter
    pub fn new(dns: D) -> Self {
        Self::with_config(dns, ScanConfig::default())
    }

    /// Scanner with custom settings
    pub fn with_config(dns: D, config: ScanConfig) -> Self {
        Self {
            dns,
            filter: ManagedFilter::new(),
            config,
        }
    }

    /// Replace the managed-provider filter
    #[must_use]
    pub fn filter(mut self, filter: ManagedFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the per-query timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Save successful transfers under `dir`
    #[must_use]
    pub fn output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.config.output_dir = dir;
        self
    }

    /// Probe up to `n` nameservers of one zone at a time
    #[must_use]
    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    /// The DNS backend
    pub const fn dns(&self) -> &D {
        &self.dns
    }

    /// Current settings
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every target and produce the final report.
    ///
    /// Individual lookup or transfer failures never abort the run.
    pub async fn run<I, S>(&self, targets: I, observer: &dyn ScanObserver) -> ScanReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let started_at = Utc::now();
        let domains = collect_targets(targets);
        observer.on_event(ScanEvent::TargetsLoaded {
            count: domains.len(),
        });

        let mut state = ScanState::new();
        let mut findings = Vec::new();

        for domain in &domains {
            let (next, found) = self.scan_target(state, domain, observer).await;
            state = next;
            findings.extend(found);
        }

        ScanReport::new(started_at, domains.len(), &state, findings)
    }

    /// Scan one target's zone candidates, skipping those already in `state`.
    pub async fn scan_target(
        &self,
        mut state: ScanState,
        domain: &Domain,
        observer: &dyn ScanObserver,
    ) -> (ScanState, Vec<Finding>) {
        observer.on_event(ScanEvent::TargetStarted { domain });
        let mut findings = Vec::new();

        for zone in domain.zone_candidates() {
            if !state.mark_tested(&zone) {
                debug!(%zone, "zone already tested");
                observer.on_event(ScanEvent::ZoneAlreadyTested { zone: &zone });
                continue;
            }

            let found = self
                .probe_zone(&zone, observer)
                .instrument(info_span!("zone", %zone))
                .await;

            if !found.is_empty() {
                state.mark_vulnerable(&zone);
            }
            findings.extend(found);
        }

        (state, findings)
    }

    async fn probe_zone(&self, zone: &ZoneCandidate, observer: &dyn ScanObserver) -> Vec<Finding> {
        observer.on_event(ScanEvent::ZoneStarted { zone });

        let nameservers = match resolve_ns(&self.dns, zone, self.config.timeout).await {
            Ok(nameservers) => nameservers,
            Err(error) => {
                debug!(%zone, %error, "no nameservers");
                observer.on_event(ScanEvent::ResolveFailed { zone, error: &error });
                return Vec::new();
            }
        };
        observer.on_event(ScanEvent::NameserversFound {
            zone,
            nameservers: &nameservers,
        });

        let engine = TransferEngine::new(&self.dns, &self.filter, self.config.timeout)
            .output_dir(self.config.output_dir.as_deref())
            .observer(observer);
        let engine = &engine;

        let results: Vec<(Nameserver, TransferResult)> = stream::iter(nameservers)
            .map(move |ns| async move {
                let result = engine.attempt(zone, &ns).await;
                (ns, result)
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        results
            .into_iter()
            .filter_map(|(nameserver, result)| match result {
                TransferResult::Vulnerable(transfer) => Some(Finding {
                    zone: zone.clone(),
                    nameserver,
                    records: transfer.records,
                    saved_to: transfer.persisted.path().map(Path::to_path_buf),
                }),
                TransferResult::SkippedManaged { .. } | TransferResult::Failed(_) => None,
            })
            .collect()
    }
}
