pub mod adapter;
pub mod auction;
mod error;
pub mod minter;

use cosmwasm_std::{Addr, Api};

pub use crate::error::{ErrorKind, PulseError};

/// Validates a counterparty address, rejecting the empty (null) target outright.
pub fn validate_target(api: &dyn Api, field: &str, address: &str) -> Result<Addr, PulseError> {
    if address.trim().is_empty() {
        return Err(PulseError::NullTarget {
            field: field.to_string(),
        });
    }
    Ok(api.addr_validate(address)?)
}
