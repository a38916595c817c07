//! Contract bindings for the Kinto registries

use ethers::contract::{abigen, ContractError};
use ethers::providers::Middleware;
use ethers::types::{Address, U256};
use async_trait::async_trait;

use crate::error::{Error, Result};
use super::{ComplianceReader, WalletFactoryReader};

// Generate type-safe bindings for the wallet factory
abigen!(
    KintoWalletFactory,
    r#"[
        function getWalletTimestamp(address wallet) external view returns (uint256)
    ]"#,
);

// Generate type-safe bindings for the KYC viewer
abigen!(
    KYCViewer,
    r#"[
        function isIndividual(address account) external view returns (bool)
        function isCompany(address account) external view returns (bool)
        function isKYC(address account) external view returns (bool)
        function isSanctionsSafe(address account) external view returns (bool)
        function getCountry(address account) external view returns (string)
        function getWalletOwners(address wallet) external view returns (address[])
    ]"#,
);

/// Functions a wallet factory ABI descriptor must declare
pub const WALLET_FACTORY_FUNCTIONS: &[&str] = &["getWalletTimestamp"];

/// Functions a KYC viewer ABI descriptor must declare
pub const KYC_VIEWER_FUNCTIONS: &[&str] = &[
    "isIndividual",
    "isCompany",
    "isKYC",
    "isSanctionsSafe",
    "getCountry",
    "getWalletOwners",
];

/// Map a contract call failure onto the library error
pub(crate) fn classify_contract_error<M: Middleware>(method: &str, err: ContractError<M>) -> Error {
    match err {
        ContractError::Revert(data) => Error::Reverted(format!("{}: {}", method, data)),
        ContractError::DecodingError(e) => Error::Decode(format!("{}: {}", method, e)),
        ContractError::AbiError(e) => Error::Decode(format!("{}: {}", method, e)),
        ContractError::DetokenizationError(e) => Error::Decode(format!("{}: {}", method, e)),
        other => Error::Transport(format!("{}: {}", method, other)),
    }
}

#[async_trait]
impl<M: Middleware + 'static> WalletFactoryReader for KintoWalletFactory<M> {
    async fn wallet_timestamp(&self, address: Address) -> Result<U256> {
        self.get_wallet_timestamp(address)
            .call()
            .await
            .map_err(|e| classify_contract_error("getWalletTimestamp", e))
    }
}

#[async_trait]
impl<M: Middleware + 'static> ComplianceReader for KYCViewer<M> {
    async fn is_individual(&self, address: Address) -> Result<bool> {
        KYCViewer::is_individual(self, address)
            .call()
            .await
            .map_err(|e| classify_contract_error("isIndividual", e))
    }

    async fn is_company(&self, address: Address) -> Result<bool> {
        KYCViewer::is_company(self, address)
            .call()
            .await
            .map_err(|e| classify_contract_error("isCompany", e))
    }

    async fn is_kyc(&self, address: Address) -> Result<bool> {
        KYCViewer::is_kyc(self, address)
            .call()
            .await
            .map_err(|e| classify_contract_error("isKYC", e))
    }

    async fn is_sanctions_safe(&self, address: Address) -> Result<bool> {
        KYCViewer::is_sanctions_safe(self, address)
            .call()
            .await
            .map_err(|e| classify_contract_error("isSanctionsSafe", e))
    }

    async fn country(&self, address: Address) -> Result<String> {
        self.get_country(address)
            .call()
            .await
            .map_err(|e| classify_contract_error("getCountry", e))
    }

    async fn wallet_owners(&self, address: Address) -> Result<Vec<Address>> {
        self.get_wallet_owners(address)
            .call()
            .await
            .map_err(|e| classify_contract_error("getWalletOwners", e))
    }
}
