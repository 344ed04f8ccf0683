//! axfrscan - DNS zone-transfer auditor
//!
//! Finds nameservers that hand out their zones to anyone who asks.

use std::process::ExitCode;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    axfrscan_cli::run().await
}
