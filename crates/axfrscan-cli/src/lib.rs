//! # axfrscan-cli
//!
//! Command-line front end for the axfrscan zone-transfer auditor.
//!
//! ## Features
//!
//! - **Targets**: a single domain or URL (`-u`) and/or a list file (`-f`)
//! - **Zone ancestry**: every parent zone of every target is probed once
//! - **Managed DNS filter**: cloud and CDN nameservers are skipped
//! - **Evidence**: successful transfers saved to an output directory (`-o`)
//! - **Quiet mode**: `-v` prints vulnerable zones only, for pipelines
//! - **Report formats**: coloured text or JSON

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod targets;

pub use cli::run;
