//! Managed DNS provider detection.
//!
//! Providers that provision nameservers per customer never answer AXFR, so
//! probing them only costs time. Matching is a plain case-insensitive
//! substring test: unlisted providers slip through, and a self-hosted server
//! whose name happens to contain a signature is skipped.

/// Built-in provider signatures
pub const DEFAULT_MANAGED_PATTERNS: &[&str] = &[
    "awsdns-",
    "cloudflare.com",
    "cloudfront.net",
    "azure-dns",
    "google",
    "googledomains",
    "akamai",
    "akamaitech",
    "edgekey.net",
    "fastly",
];

/// Substring filter for managed DNS nameservers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedFilter {
    patterns: Vec<String>,
}

impl Default for ManagedFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ManagedFilter {
    /// Filter with the built-in signatures
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: DEFAULT_MANAGED_PATTERNS
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
        }
    }

    /// Add extra signatures. Blank and duplicate entries are ignored.
    #[must_use]
    pub fn with_patterns<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in extra {
            let pattern = pattern.as_ref().trim().to_ascii_lowercase();
            if !pattern.is_empty() && !self.patterns.contains(&pattern) {
                self.patterns.push(pattern);
            }
        }
        self
    }

    /// The first signature contained in `nameserver`, if any
    #[must_use]
    pub fn matching_signature(&self, nameserver: &str) -> Option<&str> {
        let host = nameserver.to_ascii_lowercase();
        self.patterns
            .iter()
            .find(|pattern| host.contains(pattern.as_str()))
            .map(String::as_str)
    }

    /// Whether `nameserver` belongs to a managed provider
    #[must_use]
    pub fn is_managed(&self, nameserver: &str) -> bool {
        self.matching_signature(nameserver).is_some()
    }

    /// Active signatures, built-in first
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
