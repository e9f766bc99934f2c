use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdError, Timestamp, Uint128};
use thiserror::Error;

use crate::minter::Capability;

/// Coarse classification of a failure, shared by every contract of the system.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum ErrorKind {
    /// Bad configuration or bad call parameters.
    Validation,
    /// Caller lacks the capability, ownership or wiring required.
    Authorization,
    /// Auction not open yet or the block already settled.
    Timing,
    /// Cross-contract postcondition failed. Indicates a wiring fault.
    InvariantViolation,
    /// Value does not fit the integer width or would wrap.
    Arithmetic,
    /// A finite id domain has no ids left.
    Exhausted,
    /// Storage, serialization or querier failure from the host.
    Host,
}

#[derive(Error, Debug, PartialEq)]
pub enum PulseError {
    #[error("{0}")]
    Std(#[from] StdError),

    // validation
    #[error("Target address for {field} is empty")]
    NullTarget { field: String },

    #[error("Reserved cap cannot be zero")]
    ZeroReservedCap {},

    #[error("First public id {first_public_id} must be below reserved base {reserved_base}")]
    InvalidFirstPublicId {
        first_public_id: u64,
        reserved_base: u64,
    },

    #[error("Curve constant k cannot be zero")]
    ZeroCurveConstant {},

    #[error("Genesis price {genesis_price} must be above genesis floor {genesis_floor}")]
    InvalidGenesisPrice {
        genesis_price: Uint128,
        genesis_floor: Uint128,
    },

    #[error("Premium rate pts cannot be zero")]
    ZeroPremiumRate {},

    #[error("Ask {ask} exceeds max price {max_price}")]
    AskExceedsMax { ask: Uint128, max_price: Uint128 },

    #[error("Payment {paid} is below ask {ask}")]
    InsufficientPayment { ask: Uint128, paid: Uint128 },

    #[error("Native funds are not accepted for token payments")]
    NativeNotAccepted {},

    // authorization
    #[error("Unauthorized owner ({sender})")]
    NotOwner { sender: Addr },

    #[error("Caller {sender} is not the configured auction")]
    NotAuction { sender: Addr },

    #[error("{sender} does not hold capability {capability}")]
    MissingCapability { capability: Capability, sender: Addr },

    #[error("Capability {capability} is frozen")]
    CapabilityFrozen { capability: Capability },

    #[error("Sales caller is frozen to {frozen_caller}, got {caller}")]
    BadSalesCaller { caller: Addr, frozen_caller: Addr },

    #[error("Wiring is frozen")]
    WiringFrozen {},

    // timing
    #[error("Auction opens at {open_time}")]
    NotOpen {
        open_time: Timestamp,
        current_time: Timestamp,
    },

    #[error("A bid was already settled at height {height}")]
    OneBidPerUnit { height: u64 },

    // invariants
    #[error("Epoch {observed_epoch} is below epoch base {epoch_base}")]
    EpochBeforeBase { observed_epoch: u64, epoch_base: u64 },

    #[error("Epoch {observed_epoch} expected token {expected_id}, minter returned {actual_id}")]
    MintIdMismatch {
        observed_epoch: u64,
        expected_id: u64,
        actual_id: u64,
    },

    #[error("Mint result is missing from the reply")]
    MissingMintResult {},

    #[error("Settle result is missing from the reply")]
    MissingSettleResult {},

    #[error("Settled epoch {actual} differs from auction epoch {expected}")]
    SettledEpochMismatch { expected: u64, actual: u64 },

    // arithmetic
    #[error("Initial ask {initial_ask} is not above floor {floor}")]
    GapNonPositive { initial_ask: Uint128, floor: Uint128 },

    #[error("k / gap = {quotient} exceeds the time width")]
    GapOverflow { quotient: Uint128 },

    #[error("Anchor underflow: reference time {reference_time} offset {offset}")]
    AnchorUnderflow { reference_time: u64, offset: u64 },

    #[error("Clock moved backwards from {previous} to {now}")]
    ClockRegression { previous: u64, now: u64 },

    #[error("Premium overflow")]
    PremiumOverflow {},

    #[error("Price overflow")]
    PriceOverflow {},

    #[error("Counter overflow")]
    CounterOverflow {},

    // exhaustion
    #[error("Public id domain exhausted at {next_id}")]
    PublicIdDomainExhausted { next_id: u64 },

    #[error("No reserved ids left")]
    NoReservedLeft {},

    #[error("Token {token_id} not found")]
    TokenNotFound { token_id: u64 },
}

impl PulseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PulseError::Std(_) => ErrorKind::Host,
            PulseError::NullTarget { .. }
            | PulseError::ZeroReservedCap {}
            | PulseError::InvalidFirstPublicId { .. }
            | PulseError::ZeroCurveConstant {}
            | PulseError::InvalidGenesisPrice { .. }
            | PulseError::ZeroPremiumRate {}
            | PulseError::AskExceedsMax { .. }
            | PulseError::InsufficientPayment { .. }
            | PulseError::NativeNotAccepted {}
            | PulseError::TokenNotFound { .. } => ErrorKind::Validation,
            PulseError::NotOwner { .. }
            | PulseError::NotAuction { .. }
            | PulseError::MissingCapability { .. }
            | PulseError::CapabilityFrozen { .. }
            | PulseError::BadSalesCaller { .. }
            | PulseError::WiringFrozen {} => ErrorKind::Authorization,
            PulseError::NotOpen { .. } | PulseError::OneBidPerUnit { .. } => ErrorKind::Timing,
            PulseError::EpochBeforeBase { .. }
            | PulseError::MintIdMismatch { .. }
            | PulseError::MissingMintResult {}
            | PulseError::MissingSettleResult {}
            | PulseError::SettledEpochMismatch { .. } => ErrorKind::InvariantViolation,
            PulseError::GapNonPositive { .. }
            | PulseError::GapOverflow { .. }
            | PulseError::AnchorUnderflow { .. }
            | PulseError::ClockRegression { .. }
            | PulseError::PremiumOverflow {}
            | PulseError::PriceOverflow {}
            | PulseError::CounterOverflow {} => ErrorKind::Arithmetic,
            PulseError::PublicIdDomainExhausted { .. } | PulseError::NoReservedLeft {} => {
                ErrorKind::Exhausted
            }
        }
    }
}

impl From<PulseError> for StdError {
    fn from(err: PulseError) -> StdError {
        match err {
            PulseError::Std(std) => std,
            other => StdError::generic_err(other.to_string()),
        }
    }
}
