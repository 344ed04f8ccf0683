//! DNS query capability.

mod dig;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::QueryError;

pub use dig::DigClient;

/// The two DNS operations a scan needs.
///
/// Both return the raw textual response. Implementations must bound every
/// call by `timeout` and report an unfinished call as
/// [`QueryError::Timeout`].
#[async_trait]
pub trait DnsQuery: Send + Sync {
    /// Short-form NS lookup for `zone`, one hostname per line.
    async fn resolve_authoritative_ns(
        &self,
        zone: &str,
        timeout: Duration,
    ) -> Result<String, QueryError>;

    /// Full zone transfer of `zone` from `nameserver`.
    async fn request_zone_transfer(
        &self,
        zone: &str,
        nameserver: &str,
        timeout: Duration,
    ) -> Result<String, QueryError>;
}
