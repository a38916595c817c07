//! Registry client
//!
//! One HTTP provider with the wallet factory and KYC viewer contracts bound
//! to it. Construction does no network I/O; transport failures surface on the
//! first read.

use std::sync::Arc;
use std::time::Duration;

use ethers::providers::{Http, Provider};
use reqwest::Url;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::RegistryConfig;
use crate::error::{Error, Result};
use super::bindings::{KYCViewer, KintoWalletFactory};

static SHARED_CLIENT: OnceCell<Arc<RegistryClient>> = OnceCell::const_new();

/// Registry client
#[derive(Debug)]
pub struct RegistryClient {
    /// Provider
    provider: Arc<Provider<Http>>,
    /// Wallet factory registry
    wallet_factory: Arc<KintoWalletFactory<Provider<Http>>>,
    /// KYC viewer registry
    kyc_viewer: Arc<KYCViewer<Provider<Http>>>,
}

impl RegistryClient {
    /// Create a new registry client
    pub fn connect(config: &RegistryConfig) -> Result<Self> {
        let rpc_url = &config.network.rpc_url;
        let url = Url::parse(rpc_url)
            .map_err(|e| Error::Provider(format!("Invalid RPC URL {}: {}", rpc_url, e)))?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.network.timeout_secs))
            .build()
            .map_err(|e| Error::Provider(format!("Failed to create HTTP client: {}", e)))?;

        let provider = Arc::new(Provider::new(Http::new_with_client(url, http_client)));

        info!(
            "Registry client bound to {} (chain {}): factory {:?}, viewer {:?}",
            config.network.name, config.network.chain_id, config.wallet_factory, config.kyc_viewer
        );

        let wallet_factory = KintoWalletFactory::new(config.wallet_factory, provider.clone());
        let kyc_viewer = KYCViewer::new(config.kyc_viewer, provider.clone());

        Ok(Self {
            wallet_factory: Arc::new(wallet_factory),
            kyc_viewer: Arc::new(kyc_viewer),
            provider,
        })
    }

    /// Process-wide client, built on the first successful call
    ///
    /// Concurrent first calls build at most one client. Later calls return the
    /// same instance and ignore `config`.
    pub async fn shared(config: &RegistryConfig) -> Result<Arc<Self>> {
        SHARED_CLIENT
            .get_or_try_init(|| async { Self::connect(config).map(Arc::new) })
            .await
            .cloned()
    }

    /// Get the network provider
    pub fn provider(&self) -> &Arc<Provider<Http>> {
        &self.provider
    }

    /// Get the wallet factory contract
    pub fn wallet_factory(&self) -> &Arc<KintoWalletFactory<Provider<Http>>> {
        &self.wallet_factory
    }

    /// Get the KYC viewer contract
    pub fn kyc_viewer(&self) -> &Arc<KYCViewer<Provider<Http>>> {
        &self.kyc_viewer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_binds_configured_addresses() {
        let config = RegistryConfig::default();
        let client = RegistryClient::connect(&config).unwrap();

        assert_eq!(client.wallet_factory().address(), config.wallet_factory);
        assert_eq!(client.kyc_viewer().address(), config.kyc_viewer);
    }

    #[test]
    fn test_connect_rejects_bad_url() {
        let mut config = RegistryConfig::default();
        config.network.rpc_url = "not a url".to_string();

        assert!(matches!(RegistryClient::connect(&config), Err(Error::Provider(_))));
    }

    #[tokio::test]
    async fn test_shared_client_is_built_once() {
        let config = RegistryConfig::default();
        let mut other = config.clone();
        other.network.rpc_url = "http://localhost:8545".to_string();

        let (first, second) = tokio::join!(
            RegistryClient::shared(&config),
            RegistryClient::shared(&other),
        );
        let first = first.unwrap();
        let second = second.unwrap();
        let third = RegistryClient::shared(&other).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &third));
        assert!(Arc::ptr_eq(first.wallet_factory(), third.wallet_factory()));
        assert!(Arc::ptr_eq(first.kyc_viewer(), third.kyc_viewer()));
    }
}
