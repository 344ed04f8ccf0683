use serde::{Deserialize, Serialize};
use std::fmt;

/// An authoritative nameserver hostname.
///
/// Always lower-case with no trailing root dot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nameserver(String);

impl Nameserver {
    /// Canonicalize a hostname as it appears in an NS answer.
    #[must_use]
    pub fn new(host: &str) -> Self {
        Self(host.trim().trim_end_matches('.').to_ascii_lowercase())
    }

    /// The hostname as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nameserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Nameserver {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form() {
        assert_eq!(Nameserver::new("NS1.Example.NET.").as_str(), "ns1.example.net");
        assert_eq!(Nameserver::new("ns1.example.net"), Nameserver::new("ns1.example.net."));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Nameserver::new("ns1.example.net")).unwrap();
        assert_eq!(json, "\"ns1.example.net\"");
    }
}
