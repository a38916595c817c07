//! Registry client configuration
//!
//! Network endpoint and contract addresses for the wallet factory and
//! KYC viewer registries. Values come from built-in Kinto mainnet defaults,
//! environment variables, or a deployment manifest in the
//! `{"contracts": {"<Name>": {"address": "0x..", "abi": [...]}}}` format.

use std::collections::HashMap;

use ethers::abi::Abi;
use ethers::types::Address;
use serde::Deserialize;
use tracing::debug;

use crate::address::parse_address;
use crate::error::{Error, Result};
use crate::registry::{KYC_VIEWER_FUNCTIONS, WALLET_FACTORY_FUNCTIONS};

/// Manifest entry name of the wallet factory registry
pub const WALLET_FACTORY_CONTRACT: &str = "KintoWalletFactory";
/// Manifest entry name of the compliance viewer registry
pub const KYC_VIEWER_CONTRACT: &str = "KYCViewer";

const DEFAULT_RPC_URL: &str = "https://rpc.kinto.xyz/http";
const DEFAULT_CHAIN_ID: u64 = 7887;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_WALLET_FACTORY: &str = "0x8a4720488CA32f1223ccFE5A087e250fE3BC5D75";
const DEFAULT_KYC_VIEWER: &str = "0x33F28C3a636B38683a38987100723f2e2d3d038e";

/// Network the registries are deployed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Human readable network name
    pub name: String,
    /// EIP-155 chain id
    pub chain_id: u64,
    /// JSON-RPC endpoint
    pub rpc_url: String,
    /// Request timeout in seconds, applied by the HTTP transport
    pub timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "kinto".to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            rpc_url: DEFAULT_RPC_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Registry client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Network endpoint
    pub network: NetworkConfig,
    /// Wallet factory registry address
    pub wallet_factory: Address,
    /// KYC viewer registry address
    pub kyc_viewer: Address,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            wallet_factory: DEFAULT_WALLET_FACTORY
                .parse()
                .expect("built-in wallet factory address is valid"),
            kyc_viewer: DEFAULT_KYC_VIEWER
                .parse()
                .expect("built-in KYC viewer address is valid"),
        }
    }
}

/// One contract entry of a deployment manifest
#[derive(Debug, Deserialize)]
struct ContractDescriptor {
    address: String,
    abi: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ContractsManifest {
    contracts: HashMap<String, ContractDescriptor>,
}

impl RegistryConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create configuration from a variable lookup, starting from the defaults
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("KINTO_RPC_URL") {
            config.network.rpc_url = url;
        }
        if let Some(chain_id) = lookup("KINTO_CHAIN_ID") {
            config.network.chain_id = chain_id
                .parse()
                .map_err(|e| Error::Config(format!("KINTO_CHAIN_ID: {}", e)))?;
        }
        if let Some(timeout) = lookup("KINTO_RPC_TIMEOUT_SECS") {
            config.network.timeout_secs = timeout
                .parse()
                .map_err(|e| Error::Config(format!("KINTO_RPC_TIMEOUT_SECS: {}", e)))?;
        }
        if let Some(factory) = lookup("KINTO_WALLET_FACTORY_ADDRESS") {
            config.wallet_factory = parse_address(&factory)
                .map_err(|e| Error::Config(format!("KINTO_WALLET_FACTORY_ADDRESS: {}", e)))?;
        }
        if let Some(viewer) = lookup("KINTO_KYC_VIEWER_ADDRESS") {
            config.kyc_viewer = parse_address(&viewer)
                .map_err(|e| Error::Config(format!("KINTO_KYC_VIEWER_ADDRESS: {}", e)))?;
        }

        Ok(config)
    }

    /// Replace the contract addresses with those of a deployment manifest
    ///
    /// Each ABI descriptor must declare every function the bindings call.
    pub fn with_contracts_json(mut self, manifest: &str) -> Result<Self> {
        let manifest: ContractsManifest = serde_json::from_str(manifest)
            .map_err(|e| Error::Config(format!("Invalid contracts manifest: {}", e)))?;

        self.wallet_factory =
            resolve_contract(&manifest, WALLET_FACTORY_CONTRACT, WALLET_FACTORY_FUNCTIONS)?;
        self.kyc_viewer = resolve_contract(&manifest, KYC_VIEWER_CONTRACT, KYC_VIEWER_FUNCTIONS)?;

        Ok(self)
    }

    /// Create configuration from the defaults and a deployment manifest
    pub fn from_contracts_json(manifest: &str) -> Result<Self> {
        Self::default().with_contracts_json(manifest)
    }
}

fn resolve_contract(
    manifest: &ContractsManifest,
    name: &str,
    required: &[&str],
) -> Result<Address> {
    let descriptor = manifest
        .contracts
        .get(name)
        .ok_or_else(|| Error::Config(format!("Contract {} missing from manifest", name)))?;

    let abi: Abi = serde_json::from_value(descriptor.abi.clone())
        .map_err(|e| Error::Config(format!("Invalid ABI for {}: {}", name, e)))?;

    if let Some(missing) = required.iter().find(|f| !abi.functions.contains_key(**f)) {
        return Err(Error::Config(format!("ABI for {} does not declare {}", name, missing)));
    }

    let address = parse_address(&descriptor.address)
        .map_err(|e| Error::Config(format!("Address of {}: {}", name, e)))?;

    debug!("Resolved {} at {:?}", name, address);
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn abi_for(functions: &[(&str, &str)]) -> serde_json::Value {
        let entries: Vec<_> = functions
            .iter()
            .map(|(name, output)| {
                json!({
                    "type": "function",
                    "name": name,
                    "stateMutability": "view",
                    "inputs": [{ "name": "account", "type": "address", "internalType": "address" }],
                    "outputs": [{ "name": "", "type": output, "internalType": output }],
                })
            })
            .collect();
        serde_json::Value::Array(entries)
    }

    fn manifest(viewer_functions: &[(&str, &str)]) -> String {
        json!({
            "contracts": {
                "KintoWalletFactory": {
                    "address": "0x1111111111111111111111111111111111111111",
                    "abi": abi_for(&[("getWalletTimestamp", "uint256")]),
                },
                "KYCViewer": {
                    "address": "0x2222222222222222222222222222222222222222",
                    "abi": abi_for(viewer_functions),
                },
            }
        })
        .to_string()
    }

    const VIEWER_FUNCTIONS: &[(&str, &str)] = &[
        ("isIndividual", "bool"),
        ("isCompany", "bool"),
        ("isKYC", "bool"),
        ("isSanctionsSafe", "bool"),
        ("getCountry", "string"),
        ("getWalletOwners", "address[]"),
    ];

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.network.chain_id, 7887);
        assert_eq!(config.network.rpc_url, "https://rpc.kinto.xyz/http");
        assert_ne!(config.wallet_factory, config.kyc_viewer);
    }

    #[test]
    fn test_config_from_vars() {
        let config = RegistryConfig::from_vars(|key| match key {
            "KINTO_RPC_URL" => Some("http://localhost:8545".to_string()),
            "KINTO_RPC_TIMEOUT_SECS" => Some("5".to_string()),
            "KINTO_KYC_VIEWER_ADDRESS" => {
                Some("0x2222222222222222222222222222222222222222".to_string())
            }
            _ => None,
        })
        .unwrap();

        assert_eq!(config.network.rpc_url, "http://localhost:8545");
        assert_eq!(config.network.timeout_secs, 5);
        assert_eq!(config.network.chain_id, 7887);
        assert_eq!(config.kyc_viewer, Address::repeat_byte(0x22));
        assert_eq!(config.wallet_factory, RegistryConfig::default().wallet_factory);
    }

    #[test]
    fn test_config_from_vars_rejects_bad_values() {
        let err = RegistryConfig::from_vars(|key| {
            (key == "KINTO_CHAIN_ID").then(|| "kinto".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = RegistryConfig::from_vars(|key| {
            (key == "KINTO_WALLET_FACTORY_ADDRESS").then(|| "0x1234".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_config_from_contracts_json() {
        let config = RegistryConfig::from_contracts_json(&manifest(VIEWER_FUNCTIONS)).unwrap();
        assert_eq!(config.wallet_factory, Address::repeat_byte(0x11));
        assert_eq!(config.kyc_viewer, Address::repeat_byte(0x22));
        assert_eq!(config.network, NetworkConfig::default());
    }

    #[test]
    fn test_contracts_json_requires_every_read() {
        let manifest = manifest(&VIEWER_FUNCTIONS[..5]);
        let err = RegistryConfig::from_contracts_json(&manifest).unwrap_err();
        match err {
            Error::Config(message) => assert!(message.contains("getWalletOwners")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_contracts_json_requires_both_contracts() {
        let manifest = json!({ "contracts": {} }).to_string();
        let err = RegistryConfig::from_contracts_json(&manifest).unwrap_err();
        match err {
            Error::Config(message) => assert!(message.contains("KintoWalletFactory")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
