//! Result rendering

use ethers::types::{Address, U256};
use serde_json::{json, Value};

use kyc_viewer::{format_address, KycProfile, LookupOutcome};

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn profile_text(address: &Address, profile: &KycProfile) -> String {
    let mut lines = vec![
        format!("Wallet:          {}", format_address(address)),
        format!("KYC verified:    {}", yes_no(profile.is_kyc)),
        format!("Individual:      {}", yes_no(profile.is_individual)),
        format!("Corporate:       {}", yes_no(profile.is_corporate)),
        format!("Sanctions safe:  {}", yes_no(profile.is_sanctions_safe)),
        format!("Country:         {}", profile.country),
        format!("Owners:          {}", profile.wallet_owners.len()),
    ];
    lines.extend(
        profile
            .wallet_owners
            .iter()
            .enumerate()
            .map(|(i, owner)| format!("  [{}] {}", i, format_address(owner))),
    );
    lines.join("\n")
}

/// Human readable lookup result
pub fn outcome_text(address: &Address, outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::Profile(profile) => profile_text(address, profile),
        LookupOutcome::NotAWallet => format!("{} is not a Kinto wallet", format_address(address)),
        LookupOutcome::Failed(failure) => format!(
            "Lookup for {} failed: {}: {}",
            format_address(address),
            failure,
            failure.cause()
        ),
    }
}

/// JSON lookup result, tagged by `status`
pub fn outcome_json(address: &Address, outcome: &LookupOutcome) -> Value {
    match outcome {
        LookupOutcome::Profile(profile) => json!({
            "address": address,
            "status": "profile",
            "profile": profile,
        }),
        LookupOutcome::NotAWallet => json!({
            "address": address,
            "status": "notAWallet",
        }),
        LookupOutcome::Failed(failure) => json!({
            "address": address,
            "status": "failed",
            "error": failure.to_string(),
            "cause": failure.cause().to_string(),
        }),
    }
}

/// Human readable wallet check result
pub fn wallet_text(address: &Address, timestamp: Option<U256>) -> String {
    match timestamp {
        Some(timestamp) => format!(
            "{} is a Kinto wallet created at {}",
            format_address(address),
            timestamp
        ),
        None => format!("{} is not a Kinto wallet", format_address(address)),
    }
}

/// JSON wallet check result
pub fn wallet_json(address: &Address, timestamp: Option<U256>) -> Value {
    json!({
        "address": address,
        "isWallet": timestamp.is_some(),
        "createdAt": timestamp.map(|t| t.to_string()),
    })
}
