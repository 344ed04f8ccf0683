//! `dig` backed implementation of [`DnsQuery`].

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use axfrscan_core::AxfrError;
use tokio::process::Command;
use tracing::debug;

use super::DnsQuery;
use crate::error::QueryError;

const PREFLIGHT_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs queries through the `dig` command-line tool.
///
/// stdout and stderr are merged into the response text, so diagnostics such
/// as `;; connection timed out` reach the classifier.
#[derive(Debug, Clone)]
pub struct DigClient {
    program: PathBuf,
}

impl Default for DigClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DigClient {
    /// Use `dig` from `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("dig")
    }

    /// Use a specific `dig` binary
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Path of the binary that will be executed
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Check that the binary can be executed at all.
    pub async fn preflight(&self) -> Result<(), AxfrError> {
        self.run(["-v"], PREFLIGHT_TIMEOUT).await?;
        Ok(())
    }

    fn tool(&self) -> String {
        self.program.display().to_string()
    }

    async fn run<I, S>(&self, args: I, timeout: Duration) -> Result<String, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(timeout, cmd.output())
            .await
            .map_err(|_| QueryError::Timeout(timeout))?
            .map_err(|source| QueryError::Spawn {
                tool: self.tool(),
                source,
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(QueryError::Exit {
                tool: self.tool(),
                code: output.status.code(),
                output: text,
            });
        }

        Ok(text)
    }
}

/// dig reads a leading `-`, `+` or `@` as an option or server.
fn check_name(name: &str) -> Result<&str, QueryError> {
    if name.is_empty() || name.starts_with(['-', '+', '@']) {
        return Err(QueryError::InvalidName(name.to_string()));
    }
    Ok(name)
}

#[async_trait]
impl DnsQuery for DigClient {
    async fn resolve_authoritative_ns(
        &self,
        zone: &str,
        timeout: Duration,
    ) -> Result<String, QueryError> {
        let zone = check_name(zone)?;
        debug!(zone, "dig NS +short");
        self.run(["NS", zone, "+short"], timeout).await
    }

    async fn request_zone_transfer(
        &self,
        zone: &str,
        nameserver: &str,
        timeout: Duration,
    ) -> Result<String, QueryError> {
        let zone = check_name(zone)?;
        let server = format!("@{}", check_name(nameserver)?);
        debug!(zone, nameserver, "dig AXFR");
        self.run(["AXFR", server.as_str(), zone], timeout).await
    }
}
