//! AXFR attempts and response classification.

use std::path::{Path, PathBuf};
use std::time::Duration;

use axfrscan_core::{ManagedFilter, Nameserver, ZoneCandidate};
use tracing::{debug, warn};

use crate::dns::DnsQuery;
use crate::error::TransferFailure;
use crate::scanner::{ScanEvent, ScanObserver};

const FAILED_MARKER: &str = "Transfer failed";
const SIZE_MARKER: &str = "XFR size";
const TIMEOUT_MARKER: &str = "connection timed out";

/// Verdict on a raw AXFR response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Records were streamed and nothing reported failure
    Vulnerable {
        /// Count from the `XFR size: N records` line, if parseable
        records: Option<u64>,
    },
    /// Anything else
    Failed(TransferFailure),
}

/// Classify a raw AXFR response.
///
/// Only a response carrying a transfer size and no failure marker counts as
/// a successful transfer; missing evidence is a failure.
#[must_use]
pub fn classify_response(text: &str) -> Classification {
    if text.contains(FAILED_MARKER) {
        return Classification::Failed(TransferFailure::Refused);
    }
    if text.to_ascii_lowercase().contains(TIMEOUT_MARKER) {
        return Classification::Failed(TransferFailure::Timeout);
    }
    if !text.contains(SIZE_MARKER) {
        return Classification::Failed(TransferFailure::MalformedResponse);
    }

    Classification::Vulnerable {
        records: transfer_size(text),
    }
}

/// Parse `N` out of `;; XFR size: N records (messages 1, bytes 2048)`.
fn transfer_size(text: &str) -> Option<u64> {
    let (_, rest) = text.split_once(SIZE_MARKER)?;
    rest.trim_start_matches(':')
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}

/// Where the payload of a successful transfer ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted {
    /// No output directory configured
    NotRequested,
    /// Written to this file
    Saved(PathBuf),
    /// Writing failed; the zone is still vulnerable
    Failed {
        /// Intended file
        path: PathBuf,
        /// Error message
        error: String,
    },
}

impl Persisted {
    /// Path of the written file, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Saved(path) => Some(path),
            _ => None,
        }
    }
}

/// A successful zone transfer
#[derive(Debug, Clone)]
pub struct Transfer {
    /// Raw response text
    pub payload: String,
    /// Record count reported by the server
    pub records: Option<u64>,
    /// Outcome of writing the payload to disk
    pub persisted: Persisted,
}

/// Outcome of probing one (zone, nameserver) pair
#[derive(Debug, Clone)]
pub enum TransferResult {
    /// Nameserver belongs to a managed provider; nothing was sent
    SkippedManaged {
        /// Signature that matched
        signature: String,
    },
    /// No zone data obtained
    Failed(TransferFailure),
    /// The server handed out the zone
    Vulnerable(Transfer),
}

impl TransferResult {
    /// Returns true for a successful transfer
    #[must_use]
    pub const fn is_vulnerable(&self) -> bool {
        matches!(self, Self::Vulnerable(_))
    }
}

/// File name for a saved transfer, safe to join onto the output directory.
#[must_use]
pub fn transfer_file_name(zone: &ZoneCandidate, nameserver: &Nameserver) -> String {
    format!("{zone}_{nameserver}.txt").replace(['/', '\\'], "_")
}

/// Issues AXFR requests and classifies what comes back.
pub struct TransferEngine<'a, D: ?Sized> {
    dns: &'a D,
    filter: &'a ManagedFilter,
    timeout: Duration,
    output_dir: Option<&'a Path>,
    observer: &'a dyn ScanObserver,
}

impl<'a, D> TransferEngine<'a, D>
where
    D: DnsQuery + ?Sized,
{
    /// Engine that does not save payloads and reports to nobody
    pub fn new(dns: &'a D, filter: &'a ManagedFilter, timeout: Duration) -> Self {
        Self {
            dns,
            filter,
            timeout,
            output_dir: None,
            observer: &(),
        }
    }

    /// Save successful transfers under `dir`
    #[must_use]
    pub fn output_dir(mut self, dir: Option<&'a Path>) -> Self {
        self.output_dir = dir;
        self
    }

    /// Report progress to `observer`
    #[must_use]
    pub fn observer(mut self, observer: &'a dyn ScanObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Probe `nameserver` for a transfer of `zone`.
    ///
    /// Never fails: query errors become [`TransferResult::Failed`].
    pub async fn attempt(&self, zone: &ZoneCandidate, nameserver: &Nameserver) -> TransferResult {
        if let Some(signature) = self.filter.matching_signature(nameserver.as_str()) {
            self.observer.on_event(ScanEvent::ManagedSkipped {
                zone,
                nameserver,
                signature,
            });
            return TransferResult::SkippedManaged {
                signature: signature.to_string(),
            };
        }

        self.observer
            .on_event(ScanEvent::TransferStarted { zone, nameserver });

        let (payload, classification) = match self
            .dns
            .request_zone_transfer(zone.as_str(), nameserver.as_str(), self.timeout)
            .await
        {
            Ok(text) => {
                let classification = classify_response(&text);
                (text, classification)
            }
            Err(err) => (String::new(), Classification::Failed(err.into())),
        };

        match classification {
            Classification::Failed(failure) => {
                debug!(%zone, %nameserver, %failure, "AXFR failed");
                self.observer.on_event(ScanEvent::TransferFailed {
                    zone,
                    nameserver,
                    failure: &failure,
                });
                TransferResult::Failed(failure)
            }
            Classification::Vulnerable { records } => {
                self.observer.on_event(ScanEvent::TransferSucceeded {
                    zone,
                    nameserver,
                    records,
                });
                let persisted = self.persist(zone, nameserver, &payload).await;
                TransferResult::Vulnerable(Transfer {
                    payload,
                    records,
                    persisted,
                })
            }
        }
    }

    async fn persist(&self, zone: &ZoneCandidate, nameserver: &Nameserver, payload: &str) -> Persisted {
        let Some(dir) = self.output_dir else {
            return Persisted::NotRequested;
        };

        let path = dir.join(transfer_file_name(zone, nameserver));
        let written = async {
            tokio::fs::create_dir_all(dir).await?;
            tokio::fs::write(&path, payload).await
        }
        .await;

        match written {
            Ok(()) => {
                self.observer.on_event(ScanEvent::Saved {
                    zone,
                    nameserver,
                    path: &path,
                });
                Persisted::Saved(path)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not save zone transfer");
                self.observer.on_event(ScanEvent::SaveFailed {
                    zone,
                    nameserver,
                    path: &path,
                    error: &err,
                });
                Persisted::Failed {
                    path,
                    error: err.to_string(),
                }
            }
        }
    }
}
