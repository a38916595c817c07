//! KYC lookup
//!
//! Turns the wallet factory check and the KYC viewer attribute reads for one
//! address into a single [`LookupOutcome`].

mod types;
mod service;

pub use types::*;
pub use service::*;
