//! Core types for the axfrscan zone-transfer auditor.
//!
//! This crate holds everything in the pipeline that needs no network access:
//!
//! - **Targets**: [`normalize_target`] and [`Domain`] turn raw user input into hostnames
//! - **Zones**: [`Domain::zone_candidates`] expands a hostname into its ancestor zones
//! - **Filtering**: [`ManagedFilter`] recognises managed DNS providers
//! - **State**: [`ScanState`] tracks tested and vulnerable zones for one run
//! - **Errors**: configuration-class failures via [`AxfrError`]
//!
//! # Example
//!
//! ```rust
//! use axfrscan_core::Domain;
//!
//! let domain = Domain::parse("https://www.example.com/login");
//! let zones: Vec<String> = domain
//!     .zone_candidates()
//!     .into_iter()
//!     .map(|z| z.to_string())
//!     .collect();
//! assert_eq!(zones, ["www.example.com", "example.com"]);
//! ```

#![doc(html_root_url = "https://docs.rs/axfrscan-core/0.3.0")]

mod error;
pub mod managed;
pub mod types;

pub use error::{AxfrError, Result};
pub use managed::{ManagedFilter, DEFAULT_MANAGED_PATTERNS};
pub use types::*;
