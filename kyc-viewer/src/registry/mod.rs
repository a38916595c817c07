//! On-chain registry access
//!
//! Typed read capabilities for the wallet factory and KYC viewer contracts,
//! the `abigen!` bindings that implement them, and the client that binds both
//! contracts to one network transport.

mod bindings;
mod client;

use async_trait::async_trait;
use ethers::types::{Address, U256};

use crate::error::Result;

pub use bindings::*;
pub use client::*;

/// Reads against the wallet factory registry
#[async_trait]
pub trait WalletFactoryReader: Send + Sync {
    /// Wallet creation timestamp, `0` when the address is not a managed wallet
    async fn wallet_timestamp(&self, address: Address) -> Result<U256>;
}

/// Reads against the KYC viewer registry
#[async_trait]
pub trait ComplianceReader: Send + Sync {
    /// Whether the account is KYC'd as an individual
    async fn is_individual(&self, address: Address) -> Result<bool>;

    /// Whether the account is KYC'd as a company
    async fn is_company(&self, address: Address) -> Result<bool>;

    /// Overall KYC verification flag
    async fn is_kyc(&self, address: Address) -> Result<bool>;

    /// Whether the account is clear of sanctions matches
    async fn is_sanctions_safe(&self, address: Address) -> Result<bool>;

    /// Jurisdiction code of the account
    async fn country(&self, address: Address) -> Result<String>;

    /// Signer set controlling the wallet, in registry order
    async fn wallet_owners(&self, address: Address) -> Result<Vec<Address>>;
}
