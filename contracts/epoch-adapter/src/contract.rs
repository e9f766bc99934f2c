#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, Deps, DepsMut, Env, Event, MessageInfo, Reply,
    Response, StdResult, SubMsg, WasmMsg,
};
use cw2::set_contract_version;
use cw_utils::{nonpayable, parse_reply_execute_data};

use pulse_types::adapter::{
    coupled_token_id, CouplingConfig, ExecuteMsg, InstantiateMsg, QueryMsg, SettleResponse,
};
use pulse_types::auction::{CurveState, QueryMsg as AuctionQueryMsg};
use pulse_types::minter::{ExecuteMsg as MinterExecuteMsg, MintResponse};
use pulse_types::{validate_target, PulseError};

use crate::error::ContractError;
use crate::state::{PendingSettlement, CONFIG, PENDING_SETTLEMENT};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:pulse-epoch-adapter";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const MINT_REPLY_ID: u64 = 1;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    nonpayable(&info)?;

    let owner = match msg.owner {
        Some(owner) => validate_target(deps.api, "owner", &owner)?,
        None => info.sender.clone(),
    };
    // The auction is usually deployed after the adapter and wired later
    let auction = msg
        .auction
        .map(|auction| validate_target(deps.api, "auction", &auction))
        .transpose()?;
    let minter = validate_target(deps.api, "minter", &msg.minter)?;

    let config = CouplingConfig {
        owner: owner.clone(),
        auction,
        minter: minter.clone(),
        token_base: msg.token_base,
        epoch_base: msg.epoch_base,
        wiring_frozen: false,
    };
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", owner.to_string())
        .add_attribute("minter", minter.to_string())
        .add_attribute("token_base", msg.token_base.to_string())
        .add_attribute("epoch_base", msg.epoch_base.to_string());
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
        ExecuteMsg::Settle { buyer } => execute_settle(deps, env, info, buyer),
        ExecuteMsg::SetAuction { auction } => execute_set_auction(deps, env, info, auction),
        ExecuteMsg::SetMinter { minter } => execute_set_minter(deps, env, info, minter),
        ExecuteMsg::FreezeWiring {} => execute_freeze_wiring(deps, env, info),
    }
}

fn expected_token_id(config: &CouplingConfig, epoch: u64) -> Result<u64, PulseError> {
    if epoch < config.epoch_base {
        return Err(PulseError::EpochBeforeBase {
            observed_epoch: epoch,
            epoch_base: config.epoch_base,
        });
    }
    coupled_token_id(config.token_base, config.epoch_base, epoch)
        .ok_or(PulseError::CounterOverflow {})
}

pub fn execute_settle(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    buyer: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let config = CONFIG.load(deps.storage)?;
    if config.auction.as_ref() != Some(&info.sender) {
        return Err(PulseError::NotAuction {
            sender: info.sender,
        }
        .into());
    }
    let buyer = validate_target(deps.api, "buyer", &buyer)?;

    // The auction records the sale only after we return, so its counter
    // still points at the previous epoch here
    let curve: CurveState = deps
        .querier
        .query_wasm_smart(info.sender.to_string(), &AuctionQueryMsg::State {})?;
    let observed_epoch = curve
        .epoch_index
        .checked_add(1)
        .ok_or(PulseError::CounterOverflow {})?;
    let expected_id = expected_token_id(&config, observed_epoch)?;

    PENDING_SETTLEMENT.save(
        deps.storage,
        &PendingSettlement {
            epoch: observed_epoch,
            expected_id,
            buyer: buyer.clone(),
        },
    )?;

    let mint_msg = WasmMsg::Execute {
        contract_addr: config.minter.to_string(),
        msg: to_json_binary(&MinterExecuteMsg::MintPublic {
            recipient: buyer.to_string(),
        })?,
        funds: vec![],
    };

    let res = Response::new()
        .add_submessage(SubMsg::reply_on_success(mint_msg, MINT_REPLY_ID))
        .add_attribute("action", "settle")
        .add_attribute("epoch", observed_epoch.to_string())
        .add_attribute("expected_token_id", expected_id.to_string())
        .add_attribute("buyer", buyer.to_string());
    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        MINT_REPLY_ID => handle_mint_reply(deps, env, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

fn handle_mint_reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    let pending = PENDING_SETTLEMENT.load(deps.storage)?;
    PENDING_SETTLEMENT.remove(deps.storage);

    let data = parse_reply_execute_data(msg)
        .ok()
        .and_then(|response| response.data)
        .ok_or(PulseError::MissingMintResult {})?;
    let minted: MintResponse =
        from_json(&data).map_err(|_| PulseError::MissingMintResult {})?;

    // Never trust the minter's allocation: the id must be the one the epoch dictates
    if minted.token_id != pending.expected_id {
        return Err(PulseError::MintIdMismatch {
            observed_epoch: pending.epoch,
            expected_id: pending.expected_id,
            actual_id: minted.token_id,
        }
        .into());
    }

    let res = Response::new()
        .add_event(
            Event::new("epoch_minted")
                .add_attribute("epoch", pending.epoch.to_string())
                .add_attribute("token_id", minted.token_id.to_string())
                .add_attribute("buyer", pending.buyer.to_string()),
        )
        .add_attribute("action", "epoch_minted")
        .set_data(to_json_binary(&SettleResponse {
            epoch: pending.epoch,
            token_id: minted.token_id,
        })?);
    Ok(res)
}

fn assert_wiring_mutable(config: &CouplingConfig, sender: &Addr) -> Result<(), PulseError> {
    if config.owner != *sender {
        return Err(PulseError::NotOwner {
            sender: sender.clone(),
        });
    }
    if config.wiring_frozen {
        return Err(PulseError::WiringFrozen {});
    }
    Ok(())
}

pub fn execute_set_auction(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    auction: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_wiring_mutable(&config, &info.sender)?;

    let auction = validate_target(deps.api, "auction", &auction)?;
    config.auction = Some(auction.clone());
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "set_auction")
        .add_attribute("auction", auction.to_string());
    Ok(res)
}

pub fn execute_set_minter(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    minter: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_wiring_mutable(&config, &info.sender)?;

    let minter = validate_target(deps.api, "minter", &minter)?;
    config.minter = minter.clone();
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "set_minter")
        .add_attribute("minter", minter.to_string());
    Ok(res)
}

pub fn execute_freeze_wiring(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_wiring_mutable(&config, &info.sender)?;
    if config.auction.is_none() {
        return Err(PulseError::NullTarget {
            field: "auction".to_string(),
        }
        .into());
    }

    config.wiring_frozen = true;
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_event(Event::new("wiring_frozen").add_attribute("owner", info.sender.to_string()))
        .add_attribute("action", "freeze_wiring");
    Ok(res)
}

// Implement Queries
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps, env)?),
        QueryMsg::ExpectedTokenId { epoch } => {
            to_json_binary(&query_expected_token_id(deps, env, epoch)?)
        }
    }
}

fn query_config(deps: Deps, _env: Env) -> Result<CouplingConfig, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(config)
}

fn query_expected_token_id(deps: Deps, _env: Env, epoch: u64) -> Result<u64, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(expected_token_id(&config, epoch)?)
}
