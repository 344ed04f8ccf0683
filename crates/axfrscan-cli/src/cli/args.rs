//! Command-line argument definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::output::OutputFormat;

/// Audit domains for DNS zone-transfer (AXFR) misconfiguration
///
/// Every parent zone of every target is resolved to its authoritative
/// nameservers, managed DNS providers are skipped, and each remaining
/// nameserver is asked for a full zone transfer.
#[derive(Parser, Debug)]
#[command(name = "axfrscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Single domain or URL to audit
    #[arg(short = 'u', long = "url", value_name = "TARGET")]
    pub url: Option<String>,

    /// File with one domain or URL per line ('#' starts a comment)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Save successful transfers in this directory
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Timeout for every DNS query, in seconds [default: 15]
    #[arg(short = 't', long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Print vulnerable zones only
    #[arg(short = 'v', long = "vuln-only", alias = "silent")]
    pub vuln_only: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Nameservers of one zone probed in parallel [default: 1]
    #[arg(short = 'c', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Treat nameservers containing this text as managed (repeatable)
    #[arg(long = "skip-pattern", value_name = "TEXT")]
    pub skip_patterns: Vec<String>,

    /// Configuration file
    #[arg(long, value_name = "PATH", env = "AXFRSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// dig binary to use [default: dig]
    #[arg(long, value_name = "PATH")]
    pub dig: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(long)]
    pub debug: bool,
}
