//! KYC lookup types

use std::fmt;

use ethers::types::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Error;

/// Identity and compliance snapshot of a wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycProfile {
    /// KYC'd as an individual
    pub is_individual: bool,
    /// KYC'd as a company
    pub is_corporate: bool,
    /// Overall KYC verification flag
    #[serde(rename = "isKYC")]
    pub is_kyc: bool,
    /// Clear of sanctions matches
    pub is_sanctions_safe: bool,
    /// Jurisdiction code
    pub country: String,
    /// Controlling signer set, in registry order
    pub wallet_owners: Vec<Address>,
}

/// Registry read feeding one profile field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    IsIndividual,
    IsCompany,
    IsKyc,
    IsSanctionsSafe,
    Country,
    WalletOwners,
}

impl Attribute {
    /// Contract function backing this attribute
    pub fn function_name(&self) -> &'static str {
        match self {
            Attribute::IsIndividual => "isIndividual",
            Attribute::IsCompany => "isCompany",
            Attribute::IsKyc => "isKYC",
            Attribute::IsSanctionsSafe => "isSanctionsSafe",
            Attribute::Country => "getCountry",
            Attribute::WalletOwners => "getWalletOwners",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}

/// Why a lookup could not produce a result
///
/// Both variants are the same failure to callers; the variant only records
/// which phase of the lookup broke.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    #[error("wallet existence check failed")]
    WalletCheck {
        #[source]
        source: Error,
    },

    #[error("{attribute} read failed")]
    Attribute {
        attribute: Attribute,
        #[source]
        source: Error,
    },
}

impl LookupFailure {
    /// Underlying registry error
    pub fn cause(&self) -> &Error {
        match self {
            LookupFailure::WalletCheck { source } => source,
            LookupFailure::Attribute { source, .. } => source,
        }
    }

    /// Attribute whose read failed, if the wallet check succeeded
    pub fn attribute(&self) -> Option<Attribute> {
        match self {
            LookupFailure::WalletCheck { .. } => None,
            LookupFailure::Attribute { attribute, .. } => Some(*attribute),
        }
    }
}

/// Result of looking up one address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The address is a wallet and every attribute read succeeded
    Profile(KycProfile),
    /// The factory has no record of the address
    NotAWallet,
    /// Wallet status or an attribute could not be read
    Failed(LookupFailure),
}

impl LookupOutcome {
    /// Whether the address was confirmed as a wallet
    pub fn is_wallet(&self) -> bool {
        matches!(self, LookupOutcome::Profile(_))
    }

    /// Get the profile, if any
    pub fn profile(&self) -> Option<&KycProfile> {
        match self {
            LookupOutcome::Profile(profile) => Some(profile),
            _ => None,
        }
    }

    /// Convert into a result, with `None` for a non-wallet address
    pub fn into_result(self) -> std::result::Result<Option<KycProfile>, LookupFailure> {
        match self {
            LookupOutcome::Profile(profile) => Ok(Some(profile)),
            LookupOutcome::NotAWallet => Ok(None),
            LookupOutcome::Failed(failure) => Err(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn profile() -> KycProfile {
        KycProfile {
            is_individual: true,
            is_corporate: false,
            is_kyc: true,
            is_sanctions_safe: true,
            country: "US".to_string(),
            wallet_owners: vec![Address::repeat_byte(0xaa)],
        }
    }

    #[test]
    fn test_outcome_helpers() {
        let found = LookupOutcome::Profile(profile());
        assert!(found.is_wallet());
        assert_eq!(found.profile(), Some(&profile()));
        assert_eq!(found.into_result(), Ok(Some(profile())));

        assert!(!LookupOutcome::NotAWallet.is_wallet());
        assert_eq!(LookupOutcome::NotAWallet.into_result(), Ok(None));

        let failure = LookupFailure::WalletCheck {
            source: Error::Transport("connection refused".to_string()),
        };
        let failed = LookupOutcome::Failed(failure.clone());
        assert!(!failed.is_wallet());
        assert!(failed.profile().is_none());
        assert_eq!(failed.into_result(), Err(failure));
    }

    #[test]
    fn test_failure_keeps_cause() {
        let failure = LookupFailure::Attribute {
            attribute: Attribute::Country,
            source: Error::Reverted("getCountry: 0x".to_string()),
        };

        assert_eq!(failure.to_string(), "getCountry read failed");
        assert_eq!(failure.attribute(), Some(Attribute::Country));
        assert_eq!(failure.cause(), &Error::Reverted("getCountry: 0x".to_string()));
        assert!(failure.source().unwrap().to_string().contains("getCountry: 0x"));
    }

    #[test]
    fn test_profile_serialization() {
        let value = serde_json::to_value(profile()).unwrap();

        assert_eq!(value["isIndividual"], true);
        assert_eq!(value["isCorporate"], false);
        assert_eq!(value["isKYC"], true);
        assert_eq!(value["isSanctionsSafe"], true);
        assert_eq!(value["country"], "US");
        assert_eq!(value["walletOwners"][0], "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    }
}
