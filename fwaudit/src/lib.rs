//! Firewall configuration audits against vendor management APIs.
//!
//! This crate connects the vendor-independent analyzer in [`fwaudit_core`] to
//! real devices. A run is strictly sequential:
//!
//! 1. **Fetch**: a [`fetch::ConfigFetcher`] authenticates and pulls rules, NAT
//!    policies and VPN configuration for every scope (Meraki network or
//!    SonicWALL device).
//! 2. **Analyze**: [`audit::evaluate`] runs the core analyzer over the fetched
//!    scopes and counts the results.
//! 3. **Report**: [`report`] writes the HTML, CSV or JSON artifact and prints a
//!    colored console summary.
//!
//! # Modules
//!
//! - [`fetch`]: Meraki and SonicWALL clients behind one trait
//! - [`audit`]: run orchestration and per-scope fault isolation
//! - [`snapshot`]: saving and loading fetched configuration for offline audits
//! - [`report`]: report file naming, writing and terminal output
//!
//! # Example
//!
//! ```ignore
//! use fwaudit::audit::{collect_scopes, evaluate};
//! use fwaudit::fetch::{SonicWallClient, TransportConfig};
//! use fwaudit_core::AuditPolicy;
//!
//! let mut client = SonicWallClient::new(
//!     "https://192.0.2.1",
//!     "admin",
//!     "password",
//!     &TransportConfig::default(),
//! )?;
//! let scopes = collect_scopes(&mut client)?;
//! let outcome = evaluate(&scopes, &AuditPolicy::default());
//! println!("high-severity issues: {}", outcome.summary.high);
//! ```

pub mod audit;
pub mod fetch;
pub mod report;
pub mod snapshot;
