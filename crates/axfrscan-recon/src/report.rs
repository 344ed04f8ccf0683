//! Final scan report.

use std::path::PathBuf;

use axfrscan_core::{Nameserver, ScanState, ZoneCandidate};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One nameserver that handed out a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Transferred zone
    pub zone: ZoneCandidate,
    /// Nameserver that allowed the transfer
    pub nameserver: Nameserver,
    /// Record count reported by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<u64>,
    /// File the payload was written to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<PathBuf>,
}

/// Summary of a finished scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// When the scan started
    pub started_at: DateTime<Utc>,
    /// When the scan finished
    pub finished_at: DateTime<Utc>,
    /// Distinct targets after normalization
    pub targets: usize,
    /// Distinct zone candidates probed
    pub zones_tested: usize,
    /// Zones with at least one successful transfer, sorted
    pub vulnerable: Vec<ZoneCandidate>,
    /// Every successful (zone, nameserver) pair
    pub findings: Vec<Finding>,
}

impl ScanReport {
    /// Render the end-of-scan state into a report
    #[must_use]
    pub fn new(
        started_at: DateTime<Utc>,
        targets: usize,
        state: &ScanState,
        findings: Vec<Finding>,
    ) -> Self {
        Self {
            started_at,
            finished_at: Utc::now(),
            targets,
            zones_tested: state.tested_zones().len(),
            vulnerable: state.vulnerable_zones().iter().cloned().collect(),
            findings,
        }
    }

    /// True if no zone could be transferred
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.vulnerable.is_empty()
    }
}
