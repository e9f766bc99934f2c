#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    coins, from_json, to_json_binary, BankMsg, Binary, CosmosMsg, Deps, DepsMut, Env, Event,
    MessageInfo, Reply, Response, StdResult, SubMsg, Timestamp, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw20::Cw20ExecuteMsg;
use cw_utils::{must_pay, nonpayable, parse_reply_execute_data};

use pulse_types::adapter::{ExecuteMsg as AdapterExecuteMsg, SettleResponse};
use pulse_types::auction::{
    AuctionConfig, CurveState, ExecuteMsg, InstantiateMsg, PaymentMedium, QueryMsg,
};
use pulse_types::{validate_target, PulseError};

use crate::curve;
use crate::error::ContractError;
use crate::state::{PendingSale, CONFIG, CURVE_STATE, LAST_SETTLED_HEIGHT, PENDING_SALE};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:pulse-auction";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const SETTLE_REPLY_ID: u64 = 1;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    nonpayable(&info)?;

    msg.curve.check_integrity()?;
    let treasury = validate_target(deps.api, "treasury", &msg.treasury)?;
    let settlement_target =
        validate_target(deps.api, "settlement_target", &msg.settlement_target)?;
    let payment = match msg.payment {
        PaymentMedium::Native { denom } => {
            if denom.trim().is_empty() {
                return Err(PulseError::NullTarget {
                    field: "denom".to_string(),
                }
                .into());
            }
            PaymentMedium::Native { denom }
        }
        PaymentMedium::Token { contract } => PaymentMedium::Token {
            contract: validate_target(deps.api, "payment_token", contract.as_str())?,
        },
    };

    let open_time = msg
        .open_delay
        .checked_mul(1_000_000_000)
        .and_then(|delay| env.block.time.nanos().checked_add(delay))
        .map(Timestamp::from_nanos)
        .ok_or(PulseError::CounterOverflow {})?;
    let config = AuctionConfig {
        open_time,
        curve: msg.curve,
        payment,
        treasury: treasury.clone(),
        settlement_target: settlement_target.clone(),
    };
    CONFIG.save(deps.storage, &config)?;
    CURVE_STATE.save(deps.storage, &CurveState::default())?;

    let res = Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("open_time", open_time.to_string())
        .add_attribute("treasury", treasury.to_string())
        .add_attribute("settlement_target", settlement_target.to_string());
    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Bid { max_price } => execute_bid(deps, env, info, max_price),
    }
}

pub fn execute_bid(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    max_price: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if env.block.time < config.open_time {
        return Err(PulseError::NotOpen {
            open_time: config.open_time,
            current_time: env.block.time,
        }
        .into());
    }
    // Price is constant within a block, so only one sale may settle per block
    if LAST_SETTLED_HEIGHT.may_load(deps.storage)? == Some(env.block.height) {
        return Err(PulseError::OneBidPerUnit {
            height: env.block.height,
        }
        .into());
    }

    let now = env.block.time.seconds();
    let state = CURVE_STATE.load(deps.storage)?;
    let ask = curve::current_ask(&config.curve, &state, now)?;
    if ask > max_price {
        return Err(PulseError::AskExceedsMax { ask, max_price }.into());
    }

    let payment_msgs = collect_payment(&config, &info, ask)?;

    PENDING_SALE.save(
        deps.storage,
        &PendingSale {
            buyer: info.sender.clone(),
            price: ask,
            time: now,
        },
    )?;

    let settle_msg = WasmMsg::Execute {
        contract_addr: config.settlement_target.to_string(),
        msg: to_json_binary(&AdapterExecuteMsg::Settle {
            buyer: info.sender.to_string(),
        })?,
        funds: vec![],
    };

    let res = Response::new()
        .add_messages(payment_msgs)
        .add_submessage(SubMsg::reply_on_success(settle_msg, SETTLE_REPLY_ID))
        .add_attribute("action", "bid")
        .add_attribute("bidder", info.sender.to_string())
        .add_attribute("ask", ask.to_string())
        .add_attribute("max_price", max_price.to_string());
    Ok(res)
}

/// Messages moving exactly `ask` from the bidder to the treasury.
fn collect_payment(
    config: &AuctionConfig,
    info: &MessageInfo,
    ask: Uint128,
) -> Result<Vec<CosmosMsg>, ContractError> {
    let mut msgs: Vec<CosmosMsg> = vec![];
    match &config.payment {
        PaymentMedium::Native { denom } => {
            let paid = must_pay(info, denom)?;
            if paid < ask {
                return Err(PulseError::InsufficientPayment { ask, paid }.into());
            }
            msgs.push(
                BankMsg::Send {
                    to_address: config.treasury.to_string(),
                    amount: coins(ask.u128(), denom),
                }
                .into(),
            );
            let surplus = paid - ask;
            if !surplus.is_zero() {
                msgs.push(
                    BankMsg::Send {
                        to_address: info.sender.to_string(),
                        amount: coins(surplus.u128(), denom),
                    }
                    .into(),
                );
            }
        }
        PaymentMedium::Token { contract } => {
            if !info.funds.is_empty() {
                return Err(PulseError::NativeNotAccepted {}.into());
            }
            msgs.push(
                WasmMsg::Execute {
                    contract_addr: contract.to_string(),
                    msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                        owner: info.sender.to_string(),
                        recipient: config.treasury.to_string(),
                        amount: ask,
                    })?,
                    funds: vec![],
                }
                .into(),
            );
        }
    }
    Ok(msgs)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        SETTLE_REPLY_ID => handle_settle_reply(deps, env, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

fn handle_settle_reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let sale = PENDING_SALE.load(deps.storage)?;
    PENDING_SALE.remove(deps.storage);

    let data = parse_reply_execute_data(msg)
        .ok()
        .and_then(|response| response.data)
        .ok_or(PulseError::MissingSettleResult {})?;
    let settled: SettleResponse =
        from_json(&data).map_err(|_| PulseError::MissingSettleResult {})?;

    let state = CURVE_STATE.load(deps.storage)?;
    let next = curve::advance(&config.curve, &state, sale.time, sale.price)?;
    if settled.epoch != next.epoch_index {
        return Err(PulseError::SettledEpochMismatch {
            expected: next.epoch_index,
            actual: settled.epoch,
        }
        .into());
    }

    CURVE_STATE.save(deps.storage, &next)?;
    LAST_SETTLED_HEIGHT.save(deps.storage, &env.block.height)?;

    let res = Response::new()
        .add_event(
            Event::new("sale")
                .add_attribute("epoch_index", next.epoch_index.to_string())
                .add_attribute("price", sale.price.to_string())
                .add_attribute("buyer", sale.buyer.to_string())
                .add_attribute("token_id", settled.token_id.to_string())
                .add_attribute("next_anchor_time", next.anchor_time.to_string())
                .add_attribute("next_floor_price", next.floor_price.to_string()),
        )
        .add_attribute("action", "sale");
    Ok(res)
}

// Implement Queries
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps, env)?),
        QueryMsg::State {} => to_json_binary(&query_state(deps, env)?),
        QueryMsg::CurrentPrice {} => {
            let now = env.block.time.seconds();
            to_json_binary(&query_price_at(deps, env, now)?)
        }
        QueryMsg::PriceAt { time } => to_json_binary(&query_price_at(deps, env, time)?),
        QueryMsg::LastSettledHeight {} => {
            to_json_binary(&query_last_settled_height(deps, env)?)
        }
    }
}

fn query_config(deps: Deps, _env: Env) -> Result<AuctionConfig, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(config)
}

fn query_state(deps: Deps, _env: Env) -> Result<CurveState, ContractError> {
    let state = CURVE_STATE.load(deps.storage)?;
    Ok(state)
}

fn query_price_at(deps: Deps, _env: Env, time: u64) -> Result<Uint128, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let state = CURVE_STATE.load(deps.storage)?;
    Ok(curve::current_ask(&config.curve, &state, time)?)
}

fn query_last_settled_height(deps: Deps, _env: Env) -> Result<Option<u64>, ContractError> {
    let height = LAST_SETTLED_HEIGHT.may_load(deps.storage)?;
    Ok(height)
}
