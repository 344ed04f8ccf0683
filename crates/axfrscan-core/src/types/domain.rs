use serde::{Deserialize, Serialize};
use std::fmt;

/// Strip scheme, credentials, port and path from a raw target.
///
/// `https://Sub.Example.COM/path?x=1` becomes `Sub.Example.COM`,
/// `example.com/foo` becomes `example.com`. Case is preserved; see
/// [`Domain::parse`] for the canonical form. Malformed input degrades to a
/// best-effort substring, this never fails.
#[must_use]
pub fn normalize_target(raw: &str) -> &str {
    let target = raw.trim();

    if let Some(rest) = strip_scheme(target) {
        let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
        let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
        return strip_port(host).trim();
    }

    let head = target.split_once('/').map_or(target, |(head, _)| head);
    strip_port(head).trim()
}

fn strip_scheme(target: &str) -> Option<&str> {
    ["https://", "http://"].into_iter().find_map(|scheme| {
        target
            .get(..scheme.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
            .map(|_| &target[scheme.len()..])
    })
}

fn strip_port(host: &str) -> &str {
    // [v6]:port
    if let Some(inner) = host.strip_prefix('[') {
        return inner.split_once(']').map_or(inner, |(addr, _)| addr);
    }

    match host.rsplit_once(':') {
        Some((name, port)) if port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

/// A bare hostname derived from a user-supplied target.
///
/// Lower-cased, without scheme, path, port or trailing root dot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    /// Normalize a raw target (bare name, URL, or name with path).
    ///
    /// Empty labels are dropped, so `.example.com` and `www..example.com`
    /// never produce a candidate with a leading or doubled dot.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let host = normalize_target(raw)
            .split('.')
            .filter(|label| !label.is_empty())
            .collect::<Vec<_>>()
            .join(".");
        Self(host.to_ascii_lowercase())
    }

    /// The hostname as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if normalization left nothing to scan
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every suffix of at least two labels, most specific first.
    ///
    /// `a.b.example.com` yields `a.b.example.com`, `b.example.com` and
    /// `example.com`. The bare top-level label is never a candidate, so a
    /// single-label name yields nothing.
    #[must_use]
    pub fn zone_candidates(&self) -> Vec<ZoneCandidate> {
        let labels: Vec<&str> = self.0.split('.').collect();

        (0..labels.len().saturating_sub(1))
            .map(|start| ZoneCandidate(labels[start..].join(".")))
            .collect()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A name that may be the apex of a DNS zone
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneCandidate(String);

impl ZoneCandidate {
    /// Build a candidate directly from a zone name.
    #[must_use]
    pub fn new(zone: &str) -> Self {
        Self(zone.trim().trim_end_matches('.').to_ascii_lowercase())
    }

    /// The zone name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ZoneCandidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones(raw: &str) -> Vec<String> {
        Domain::parse(raw)
            .zone_candidates()
            .into_iter()
            .map(|z| z.to_string())
            .collect()
    }

    #[test]
    fn normalize_url_keeps_host_only() {
        assert_eq!(
            normalize_target("https://Sub.Example.COM/path?x=1"),
            "Sub.Example.COM"
        );
        assert_eq!(normalize_target("http://example.org"), "example.org");
        assert_eq!(normalize_target("HTTPS://example.org/"), "example.org");
    }

    #[test]
    fn normalize_strips_path_and_whitespace() {
        assert_eq!(normalize_target("example.com/foo"), "example.com");
        assert_eq!(normalize_target("  example.com  "), "example.com");
        assert_eq!(normalize_target("example.com"), "example.com");
    }

    #[test]
    fn normalize_drops_port_and_credentials() {
        assert_eq!(
            normalize_target("https://user:pw@mail.example.com:8443/inbox"),
            "mail.example.com"
        );
        assert_eq!(normalize_target("example.com:8080/x"), "example.com");
        assert_eq!(normalize_target("http://example.com?q=1"), "example.com");
    }

    #[test]
    fn normalize_degrades_on_garbage() {
        assert_eq!(normalize_target(""), "");
        assert_eq!(normalize_target("https://"), "");
        assert_eq!(normalize_target("/only/a/path"), "");
    }

    #[test]
    fn domain_is_lowercase_without_root_dot() {
        let domain = Domain::parse("https://Sub.Example.COM./path");
        assert_eq!(domain.as_str(), "sub.example.com");
    }

    #[test]
    fn empty_labels_are_dropped() {
        assert_eq!(Domain::parse(".example.com").as_str(), "example.com");
        assert_eq!(zones(".example.com"), ["example.com"]);
        assert_eq!(zones("a..com"), ["a.com"]);
        assert!(zones("..").is_empty());
    }

    #[test]
    fn expands_every_ancestor_except_tld() {
        assert_eq!(
            zones("a.b.c.example.com"),
            [
                "a.b.c.example.com",
                "b.c.example.com",
                "c.example.com",
                "example.com"
            ]
        );
    }

    #[test]
    fn two_label_name_is_its_own_only_candidate() {
        assert_eq!(zones("example.com"), ["example.com"]);
    }

    #[test]
    fn single_label_and_empty_yield_nothing() {
        assert!(zones("localhost").is_empty());
        assert!(zones("").is_empty());
        assert!(Domain::parse("   ").is_empty());
    }

    #[test]
    fn candidate_new_canonicalizes() {
        assert_eq!(ZoneCandidate::new(" Example.COM. ").as_str(), "example.com");
    }
}
