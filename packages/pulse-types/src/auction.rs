use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Timestamp, Uint128};

use crate::error::PulseError;

/// Parameters of the hyperbolic price curve. Fixed at instantiation.
#[cw_serde]
pub struct CurveParams {
    /// Steepness constant, price units times seconds.
    pub k: Uint128,
    /// Ask of the very first sale.
    pub genesis_price: Uint128,
    /// Floor of the first curve.
    pub genesis_floor: Uint128,
    /// Premium added per idle second between two sales.
    pub pts: Uint128,
}

impl CurveParams {
    pub fn check_integrity(&self) -> Result<(), PulseError> {
        if self.k.is_zero() {
            return Err(PulseError::ZeroCurveConstant {});
        }
        if self.genesis_price <= self.genesis_floor {
            return Err(PulseError::InvalidGenesisPrice {
                genesis_price: self.genesis_price,
                genesis_floor: self.genesis_floor,
            });
        }
        if self.pts.is_zero() {
            return Err(PulseError::ZeroPremiumRate {});
        }
        // the genesis anchor offset must fit the time width
        let quotient = self.k / (self.genesis_price - self.genesis_floor);
        if u64::try_from(quotient.u128()).is_err() {
            return Err(PulseError::GapOverflow { quotient });
        }
        Ok(())
    }
}

#[cw_serde]
pub enum PaymentMedium {
    /// Bank denom sent along with the bid.
    Native { denom: String },
    /// CW20 contract pulled through the bidder's allowance.
    Token { contract: Addr },
}

#[cw_serde]
pub struct AuctionConfig {
    pub open_time: Timestamp,
    pub curve: CurveParams,
    pub payment: PaymentMedium,
    pub treasury: Addr,
    pub settlement_target: Addr,
}

#[cw_serde]
#[derive(Default)]
pub struct CurveState {
    pub curve_active: bool,
    pub epoch_index: u64,
    /// Time of the last sale, in seconds.
    pub start_time: u64,
    pub anchor_time: u64,
    pub floor_price: Uint128,
}

#[cw_serde]
pub struct InstantiateMsg {
    /// Seconds between instantiation and the first accepted bid.
    pub open_delay: u64,
    pub curve: CurveParams,
    pub payment: PaymentMedium,
    pub treasury: String,
    pub settlement_target: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    Bid { max_price: Uint128 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(AuctionConfig)]
    Config {},
    #[returns(CurveState)]
    State {},
    #[returns(Uint128)]
    CurrentPrice {},
    #[returns(Uint128)]
    PriceAt { time: u64 },
    #[returns(Option<u64>)]
    LastSettledHeight {},
}
