use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

/// Wiring of the epoch to token coupling. Immutable once `wiring_frozen` is set.
#[cw_serde]
pub struct CouplingConfig {
    pub owner: Addr,
    pub auction: Option<Addr>,
    pub minter: Addr,
    pub token_base: u64,
    pub epoch_base: u64,
    pub wiring_frozen: bool,
}

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: Option<String>,
    pub auction: Option<String>,
    pub minter: String,
    pub token_base: u64,
    pub epoch_base: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    Settle { buyer: String },
    SetAuction { auction: String },
    SetMinter { minter: String },
    FreezeWiring {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(CouplingConfig)]
    Config {},
    #[returns(u64)]
    ExpectedTokenId { epoch: u64 },
}

/// Data returned by a successful `Settle`.
#[cw_serde]
pub struct SettleResponse {
    pub epoch: u64,
    pub token_id: u64,
}

/// Token id bound to `epoch`. `None` when the epoch is below the base or the id overflows.
pub fn coupled_token_id(token_base: u64, epoch_base: u64, epoch: u64) -> Option<u64> {
    epoch
        .checked_sub(epoch_base)
        .and_then(|offset| token_base.checked_add(offset))
}
