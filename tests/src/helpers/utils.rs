use cosmwasm_std::{Addr, Coin, StdResult, Timestamp, Uint128};
use cw20::{BalanceResponse, Cw20QueryMsg};
use cw_multi_test::{error::AnyResult, AppResponse, BankSudo, Executor, SudoMsg};
use pulse_testing::app::PulseApp;
use pulse_types::auction::{CurveState, ExecuteMsg as AuctionExecuteMsg, QueryMsg as AuctionQueryMsg};
use pulse_types::minter::{
    Capability, ExecuteMsg as MinterExecuteMsg, MinterState, OwnerOfResponse,
    QueryMsg as MinterQueryMsg,
};
use pulse_types::PulseError;

use pulse_auction::error::ContractError as AuctionContractError;
use pulse_epoch_adapter::error::ContractError as AdapterContractError;
use pulse_sequential_minter::error::ContractError as MinterContractError;

use crate::helpers::mock_messages::auction_mock_messages::PAYMENT_DENOM;

pub fn mint_to_address(app: &mut PulseApp, to_address: String, amount: Vec<Coin>) {
    app.sudo(SudoMsg::Bank(BankSudo::Mint { to_address, amount }))
        .unwrap();
}

/// Moves to the next block at `seconds`.
pub fn advance_to(app: &mut PulseApp, seconds: u64) {
    app.update_block(|block| {
        block.height += 1;
        block.time = Timestamp::from_seconds(seconds);
    });
}

/// Domain error behind `err`, whichever contract of the chain raised it.
pub fn pulse_error(err: &anyhow::Error) -> Option<&PulseError> {
    let root = err.root_cause();
    if let Some(AuctionContractError::Pulse(pulse)) = root.downcast_ref::<AuctionContractError>() {
        return Some(pulse);
    }
    if let Some(AdapterContractError::Pulse(pulse)) = root.downcast_ref::<AdapterContractError>() {
        return Some(pulse);
    }
    if let Some(MinterContractError::Pulse(pulse)) = root.downcast_ref::<MinterContractError>() {
        return Some(pulse);
    }
    None
}

pub fn event_attribute(res: &AppResponse, event_type: &str, key: &str) -> Option<String> {
    let wasm_type = format!("wasm-{}", event_type);
    res.events
        .iter()
        .filter(|e| e.ty == wasm_type)
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}

pub fn bid(
    app: &mut PulseApp,
    bidder: &Addr,
    auction: &Addr,
    max_price: u128,
    funds: &[Coin],
) -> AnyResult<AppResponse> {
    app.execute_contract(
        bidder.clone(),
        auction.clone(),
        &AuctionExecuteMsg::Bid {
            max_price: Uint128::new(max_price),
        },
        funds,
    )
}

pub fn grant_capability(
    app: &mut PulseApp,
    admin: &Addr,
    minter: &Addr,
    capability: Capability,
    address: &Addr,
) {
    app.execute_contract(
        admin.clone(),
        minter.clone(),
        &MinterExecuteMsg::GrantCapability {
            capability,
            address: address.to_string(),
        },
        &[],
    )
    .unwrap();
}

/// Bids the current ask and pays exactly that in the native denom.
pub fn bid_at_ask(app: &mut PulseApp, bidder: &Addr, auction: &Addr) -> AnyResult<AppResponse> {
    let ask = query_current_price(app, auction);
    bid(
        app,
        bidder,
        auction,
        ask.u128(),
        &[Coin::new(ask.u128(), PAYMENT_DENOM)],
    )
}

pub fn query_curve_state(app: &PulseApp, auction: &Addr) -> CurveState {
    app.wrap()
        .query_wasm_smart(auction.to_string(), &AuctionQueryMsg::State {})
        .unwrap()
}

pub fn query_current_price(app: &PulseApp, auction: &Addr) -> Uint128 {
    app.wrap()
        .query_wasm_smart(auction.to_string(), &AuctionQueryMsg::CurrentPrice {})
        .unwrap()
}

pub fn query_price_at(app: &PulseApp, auction: &Addr, time: u64) -> Uint128 {
    app.wrap()
        .query_wasm_smart(auction.to_string(), &AuctionQueryMsg::PriceAt { time })
        .unwrap()
}

pub fn query_minter_state(app: &PulseApp, minter: &Addr) -> MinterState {
    app.wrap()
        .query_wasm_smart(minter.to_string(), &MinterQueryMsg::State {})
        .unwrap()
}

pub fn query_owner_of(app: &PulseApp, minter: &Addr, token_id: u64) -> StdResult<OwnerOfResponse> {
    app.wrap()
        .query_wasm_smart(minter.to_string(), &MinterQueryMsg::OwnerOf { token_id })
}

pub fn query_balance(app: &PulseApp, address: &Addr) -> Uint128 {
    app.wrap()
        .query_balance(address.to_string(), PAYMENT_DENOM)
        .unwrap()
        .amount
}

pub fn query_cw20_balance(app: &PulseApp, token: &Addr, address: &Addr) -> Uint128 {
    let res: BalanceResponse = app
        .wrap()
        .query_wasm_smart(
            token.to_string(),
            &Cw20QueryMsg::Balance {
                address: address.to_string(),
            },
        )
        .unwrap();
    res.balance
}
