//! Kinto KYC Viewer
//!
//! Read-only identity and compliance status for Kinto wallet addresses. A
//! lookup first asks the wallet factory registry whether the address is a
//! managed wallet, then reads the KYC viewer registry attributes concurrently
//! and merges them into one [`KycProfile`].

pub mod address;
pub mod config;
pub mod error;
pub mod lookup;
pub mod registry;

// Re-export commonly used types for convenience
pub use address::{format_address, parse_address};
pub use config::{NetworkConfig, RegistryConfig};
pub use error::{Error, Result};
pub use lookup::{Attribute, KycProfile, KycViewerService, LookupFailure, LookupOutcome};
pub use registry::{ComplianceReader, RegistryClient, WalletFactoryReader};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
