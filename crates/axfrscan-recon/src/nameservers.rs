//! Authoritative nameserver resolution.

use std::collections::BTreeSet;
use std::time::Duration;

use axfrscan_core::{Nameserver, ZoneCandidate};
use tracing::debug;

use crate::dns::DnsQuery;
use crate::error::ResolveError;

/// Substrings marking a line as a diagnostic rather than a record
const DIAGNOSTIC_MARKERS: &[&str] = &[";", "timed out", "error", "connection", "communications"];

fn sanitize_line(line: &str) -> Option<Nameserver> {
    let line = line.trim().trim_end_matches('.');
    if line.is_empty() {
        return None;
    }

    let lower = line.to_ascii_lowercase();
    if DIAGNOSTIC_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return None;
    }

    if line.contains(char::is_whitespace) {
        return None;
    }

    Some(Nameserver::new(line))
}

/// Extract well-formed nameserver hostnames from a short-form NS answer.
///
/// Diagnostic lines, blank lines and lines with embedded whitespace are
/// dropped; the rest are lower-cased and deduplicated.
#[must_use]
pub fn parse_ns_response(raw: &str) -> BTreeSet<Nameserver> {
    raw.lines().filter_map(sanitize_line).collect()
}

/// Look up the authoritative nameservers of `zone`.
///
/// Never mutates scan state. Callers treat any error as "no nameservers".
pub async fn resolve_ns<D>(
    dns: &D,
    zone: &ZoneCandidate,
    timeout: Duration,
) -> Result<BTreeSet<Nameserver>, ResolveError>
where
    D: DnsQuery + ?Sized,
{
    let raw = dns.resolve_authoritative_ns(zone.as_str(), timeout).await?;
    let nameservers = parse_ns_response(&raw);

    if nameservers.is_empty() {
        let discarded = raw.lines().filter(|l| !l.trim().is_empty()).count();
        debug!(%zone, discarded, "NS lookup yielded no usable records");
        return Err(if discarded == 0 {
            ResolveError::NoNameservers
        } else {
            ResolveError::MalformedResponse { discarded }
        });
    }

    debug!(%zone, count = nameservers.len(), "resolved nameservers");
    Ok(nameservers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use async_trait::async_trait;

    struct Canned(Result<&'static str, ()>);

    #[async_trait]
    impl DnsQuery for Canned {
        async fn resolve_authoritative_ns(
            &self,
            _zone: &str,
            timeout: Duration,
        ) -> Result<String, QueryError> {
            self.0
                .map(str::to_string)
                .map_err(|()| QueryError::Timeout(timeout))
        }

        async fn request_zone_transfer(
            &self,
            _zone: &str,
            _nameserver: &str,
            timeout: Duration,
        ) -> Result<String, QueryError> {
            Err(QueryError::Timeout(timeout))
        }
    }

    fn names(set: &BTreeSet<Nameserver>) -> Vec<&str> {
        set.iter().map(Nameserver::as_str).collect()
    }

    #[test]
    fn parses_short_answer() {
        let raw = "ns2.example.com.\nNS1.Example.com.\n\nns1.example.com.\n";
        assert_eq!(names(&parse_ns_response(raw)), ["ns1.example.com", "ns2.example.com"]);
    }

    #[test]
    fn drops_diagnostics_and_malformed_lines() {
        let raw = ";; connection timed out; no servers could be reached\n\
                   ;; communications error to 10.0.0.1#53: timed out\n\
                   example.com. 300 IN NS ns1.example.com.\n\
                   Error: something\n\
                   ns.good.net.\n";
        assert_eq!(names(&parse_ns_response(raw)), ["ns.good.net"]);
    }

    #[test]
    fn empty_answer_is_empty_set() {
        assert!(parse_ns_response("").is_empty());
        assert!(parse_ns_response("\n  \n").is_empty());
    }

    #[tokio::test]
    async fn resolve_reports_no_nameservers() {
        let zone = ZoneCandidate::new("example.com");
        let err = resolve_ns(&Canned(Ok("\n")), &zone, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::NoNameservers));
    }

    #[tokio::test]
    async fn resolve_reports_malformed_response() {
        let zone = ZoneCandidate::new("example.com");
        let err = resolve_ns(&Canned(Ok(";; SERVFAIL\n")), &zone, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::MalformedResponse { discarded: 1 }));
    }

    #[tokio::test]
    async fn resolve_propagates_timeout() {
        let zone = ZoneCandidate::new("example.com");
        let err = resolve_ns(&Canned(Err(())), &zone, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Query(ref q) if q.is_timeout()));
    }

    #[tokio::test]
    async fn resolve_returns_hostnames() {
        let zone = ZoneCandidate::new("example.com");
        let set = resolve_ns(&Canned(Ok("b.ns.net.\na.ns.net.\n")), &zone, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(names(&set), ["a.ns.net", "b.ns.net"]);
    }
}
