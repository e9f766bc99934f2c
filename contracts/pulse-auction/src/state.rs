use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::Item;

use pulse_types::auction::{AuctionConfig, CurveState};

pub const CONFIG: Item<AuctionConfig> = Item::new("auction_config");
pub const CURVE_STATE: Item<CurveState> = Item::new("curve_state");
// Height of the block that settled the latest sale
pub const LAST_SETTLED_HEIGHT: Item<u64> = Item::new("last_settled_height");
// Sale waiting for the adapter's reply
pub const PENDING_SALE: Item<PendingSale> = Item::new("pending_sale");

#[cw_serde]
pub struct PendingSale {
    pub buyer: Addr,
    pub price: Uint128,
    pub time: u64,
}
