use cosmwasm_std::StdError;
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

    #[error("Unknown reply id {id}")]
    UnknownReplyId { id: u64 },
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::Std(_) => ErrorKind::Host,
            ContractError::Pulse(err) => err.kind(),
            ContractError::PaymentError(_) => ErrorKind::Validation,
            ContractError::UnknownReplyId { .. } => ErrorKind::InvariantViolation,
        }
    }
}

impl From<ContractError> for StdError {
    fn from(err: ContractError) -> StdError {
        StdError::generic_err(err.to_string())
    }
}
