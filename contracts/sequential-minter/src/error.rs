use cosmwasm_std::{StdError, Uint128};
use cw_utils::PaymentError;
use pulse_types::{ErrorKind, PulseError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Pulse(#[from] PulseError),

    #[error("Payment error")]
    PaymentError(#[from] PaymentError),

    #[error("Invalid creation fee")]
    InvalidCreationFee { expected: Uint128, sent: Uint128 },

    #[error("Denom creation fee is not available")]
    CreationFeeUnavailable {},
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::Std(_) | ContractError::CreationFeeUnavailable {} => ErrorKind::Host,
            ContractError::Pulse(err) => err.kind(),
            ContractError::PaymentError(_) | ContractError::InvalidCreationFee { .. } => {
                ErrorKind::Validation
            }
        }
    }
}

impl From<ContractError> for StdError {
    fn from(err: ContractError) -> StdError {
        StdError::generic_err(err.to_string())
    }
}
