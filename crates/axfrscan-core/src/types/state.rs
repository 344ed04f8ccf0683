use std::collections::BTreeSet;

use super::ZoneCandidate;

/// Zone bookkeeping for a single scan run.
///
/// Both sets only grow: a candidate is tested at most once and a zone,
/// once vulnerable, stays vulnerable. The state is owned by whoever drives
/// the scan and handed from one target to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    tested: BTreeSet<ZoneCandidate>,
    vulnerable: BTreeSet<ZoneCandidate>,
}

impl ScanState {
    /// Create an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `zone` as tested.
    ///
    /// Returns `true` if the zone had not been tested before and should be
    /// probed now; `false` means another target already covered it.
    pub fn mark_tested(&mut self, zone: &ZoneCandidate) -> bool {
        if self.tested.contains(zone) {
            return false;
        }
        self.tested.insert(zone.clone())
    }

    /// Record a successful transfer for `zone`
    pub fn mark_vulnerable(&mut self, zone: &ZoneCandidate) {
        if !self.vulnerable.contains(zone) {
            self.vulnerable.insert(zone.clone());
        }
    }

    /// Every zone candidate probed so far, sorted
    #[must_use]
    pub const fn tested_zones(&self) -> &BTreeSet<ZoneCandidate> {
        &self.tested
    }

    /// Zones with at least one successful transfer, sorted
    #[must_use]
    pub const fn vulnerable_zones(&self) -> &BTreeSet<ZoneCandidate> {
        &self.vulnerable
    }

    /// True if no transfer has succeeded
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.vulnerable.is_empty()
    }
}
