use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

use pulse_types::adapter::CouplingConfig;

pub const CONFIG: Item<CouplingConfig> = Item::new("coupling_config");
// Settlement waiting for the minter's reply
pub const PENDING_SETTLEMENT: Item<PendingSettlement> = Item::new("pending_settlement");

#[cw_serde]
pub struct PendingSettlement {
    pub epoch: u64,
    pub expected_id: u64,
    pub buyer: Addr,
}
