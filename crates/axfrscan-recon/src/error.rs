use std::time::Duration;

use axfrscan_core::AxfrError;
use thiserror::Error;

/// A DNS query that could not be completed
#[derive(Error, Debug)]
pub enum QueryError {
    /// The query did not finish within its timeout
    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    /// The query tool could not be started
    #[error("failed to run {tool}: {source}")]
    Spawn {
        /// Program that was executed
        tool: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The query tool exited unsuccessfully
    #[error("{tool} exited with {}", exit_label(.code))]
    Exit {
        /// Program that was executed
        tool: String,
        /// Exit code, `None` if terminated by a signal
        code: Option<i32>,
        /// Whatever the tool printed before failing
        output: String,
    },

    /// The name would be read as an option by the query tool
    #[error("refusing to query suspicious name: {0}")]
    InvalidName(String),
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}"))
}

impl QueryError {
    /// Returns true if the query timed out
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Why a zone produced no nameservers
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The NS lookup itself failed
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The lookup succeeded but returned nothing
    #[error("no nameservers found")]
    NoNameservers,

    /// The lookup returned text, none of it usable
    #[error("malformed NS response ({discarded} lines discarded)")]
    MalformedResponse {
        /// Non-empty lines that were rejected
        discarded: usize,
    },
}

/// Why a transfer attempt did not yield a zone
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferFailure {
    /// The server explicitly refused the transfer
    #[error("transfer refused")]
    Refused,

    /// The server or the query timed out
    #[error("transfer timed out")]
    Timeout,

    /// No evidence that records were streamed
    #[error("no transfer size in response")]
    MalformedResponse,

    /// The query tool failed
    #[error("query error: {0}")]
    Query(String),
}

impl From<QueryError> for TransferFailure {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Timeout(_) => Self::Timeout,
            other => Self::Query(other.to_string()),
        }
    }
}

impl From<QueryError> for AxfrError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Spawn { tool, source } => Self::MissingTool {
                hint: format!("{source} (install dnsutils / bind-utils to get {tool})"),
                tool,
            },
            other => Self::Dns(other.to_string()),
        }
    }
}
