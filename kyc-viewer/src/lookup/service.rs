//! KYC viewer service

use std::future::Future;
use std::sync::Arc;

use ethers::types::{Address, U256};
use tracing::{debug, warn};

use crate::error::Result;
use crate::registry::{ComplianceReader, RegistryClient, WalletFactoryReader};
use super::types::{Attribute, KycProfile, LookupFailure, LookupOutcome};

/// KYC viewer service
///
/// Checks wallet existence against the factory registry, then reads every
/// compliance attribute concurrently and merges them into one profile.
/// Nothing is cached between calls.
#[derive(Clone)]
pub struct KycViewerService {
    /// Wallet factory registry
    wallet_factory: Arc<dyn WalletFactoryReader>,
    /// KYC viewer registry
    kyc_viewer: Arc<dyn ComplianceReader>,
}

impl KycViewerService {
    /// Create a new KYC viewer service
    pub fn new(
        wallet_factory: Arc<dyn WalletFactoryReader>,
        kyc_viewer: Arc<dyn ComplianceReader>,
    ) -> Self {
        Self {
            wallet_factory,
            kyc_viewer,
        }
    }

    /// Create a service reading through the client's contract handles
    pub fn from_registry(client: &RegistryClient) -> Self {
        Self::new(client.wallet_factory().clone(), client.kyc_viewer().clone())
    }

    /// Wallet creation timestamp, or `None` if the factory has no record
    pub async fn wallet_timestamp(&self, address: Address) -> Result<Option<U256>> {
        let timestamp = self.wallet_factory.wallet_timestamp(address).await?;
        // Only the exact zero marker means absent
        if timestamp == U256::zero() {
            Ok(None)
        } else {
            Ok(Some(timestamp))
        }
    }

    /// Look up the KYC profile of an address
    pub async fn fetch(&self, address: Address) -> LookupOutcome {
        let created_at = match self.wallet_timestamp(address).await {
            Ok(Some(timestamp)) => timestamp,
            Ok(None) => {
                debug!("{:?} is not a wallet", address);
                return LookupOutcome::NotAWallet;
            }
            Err(source) => {
                warn!("Wallet check for {:?} failed: {}", address, source);
                return LookupOutcome::Failed(LookupFailure::WalletCheck { source });
            }
        };

        debug!("{:?} is a wallet created at {}, reading attributes", address, created_at);

        match self.read_profile(address).await {
            Ok(profile) => LookupOutcome::Profile(profile),
            Err(failure) => {
                warn!("KYC lookup for {:?} failed: {}: {}", address, failure, failure.cause());
                LookupOutcome::Failed(failure)
            }
        }
    }

    async fn read_profile(
        &self,
        address: Address,
    ) -> std::result::Result<KycProfile, LookupFailure> {
        let viewer = &self.kyc_viewer;

        // Fail fast: the first error drops the reads still in flight
        let (is_individual, is_corporate, is_kyc, is_sanctions_safe, country, wallet_owners) =
            tokio::try_join!(
                tagged(Attribute::IsIndividual, viewer.is_individual(address)),
                tagged(Attribute::IsCompany, viewer.is_company(address)),
                tagged(Attribute::IsKyc, viewer.is_kyc(address)),
                tagged(Attribute::IsSanctionsSafe, viewer.is_sanctions_safe(address)),
                tagged(Attribute::Country, viewer.country(address)),
                tagged(Attribute::WalletOwners, viewer.wallet_owners(address)),
            )?;

        Ok(KycProfile {
            is_individual,
            is_corporate,
            is_kyc,
            is_sanctions_safe,
            country,
            wallet_owners,
        })
    }
}

/// Attach the failing attribute to a read error
async fn tagged<T>(
    attribute: Attribute,
    read: impl Future<Output = Result<T>>,
) -> std::result::Result<T, LookupFailure> {
    read.await.map_err(|source| LookupFailure::Attribute { attribute, source })
}
