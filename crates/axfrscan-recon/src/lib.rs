//! Nameserver resolution and AXFR probing for axfrscan.
//!
//! The DNS work itself is delegated to a [`DnsQuery`] implementation; the
//! shipped one, [`DigClient`], drives the `dig` tool. Everything above it
//! (response sanitizing, transfer classification, zone deduplication) is
//! plain Rust and can be exercised against scripted responses.

#![doc(html_root_url = "https://docs.rs/axfrscan-recon/0.3.0")]

pub mod dns;
mod error;
pub mod nameservers;
pub mod report;
pub mod scanner;
pub mod transfer;

pub use dns::{DigClient, DnsQuery};
pub use error::{QueryError, ResolveError, TransferFailure};
pub use nameservers::{parse_ns_response, resolve_ns};
pub use report::{Finding, ScanReport};
pub use scanner::{collect_targets, ScanConfig, ScanEvent, ScanObserver, Scanner};
pub use transfer::{classify_response, Classification, Persisted, Transfer, TransferEngine, TransferResult};
