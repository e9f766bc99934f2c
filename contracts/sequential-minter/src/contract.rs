use std::str::FromStr;

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo, Response,
    StdResult, Uint128,
};
use cw2::set_contract_version;
use cw_utils::{must_pay, nonpayable};
use omniflix_std::types::omniflix::onft::v1beta1::OnftQuerier;

use capabilities::Capabilities;
use pulse_types::minter::{
    Capability, CollectionDetails, ExecuteMsg, InstantiateMsg, MintResponse, MinterState,
    OwnerOfResponse, QueryMsg, RESERVED_BASE,
};
use pulse_types::{validate_target, PulseError};

use crate::error::ContractError;
use crate::state::{COLLECTION, STATE};
use crate::utils::{generate_create_denom_msg, generate_mint_msg};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:pulse-sequential-minter";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // Query denom creation fee
    let onft_querier = OnftQuerier::new(&deps.querier);
    let creation_fee = onft_querier
        .params()?
        .params
        .and_then(|params| params.denom_creation_fee)
        .ok_or(ContractError::CreationFeeUnavailable {})?;
    let creation_fee_amount = Uint128::from_str(&creation_fee.amount)?;

    let amount = must_pay(&info, &creation_fee.denom)?;
    // Exact amount must be paid
    if amount != creation_fee_amount {
        return Err(ContractError::InvalidCreationFee {
            expected: creation_fee_amount,
            sent: amount,
        });
    }

    if msg.reserved_cap == 0 {
        return Err(PulseError::ZeroReservedCap {}.into());
    }
    if msg.first_public_id >= RESERVED_BASE {
        return Err(PulseError::InvalidFirstPublicId {
            first_public_id: msg.first_public_id,
            reserved_base: RESERVED_BASE,
        }
        .into());
    }
    // Highest reserved id must stay representable
    RESERVED_BASE
        .checked_add(msg.reserved_cap)
        .ok_or(PulseError::CounterOverflow {})?;

    let admin = match msg.admin {
        Some(admin) => validate_target(deps.api, "admin", &admin)?,
        None => info.sender.clone(),
    };

    Capabilities::new().initialize(deps.storage, &admin)?;
    STATE.save(
        deps.storage,
        &MinterState::new(msg.first_public_id, msg.reserved_cap),
    )?;
    COLLECTION.save(deps.storage, &msg.collection)?;

    let collection_creation_msg: CosmosMsg = generate_create_denom_msg(
        &msg.collection,
        env.contract.address,
        creation_fee,
        admin.clone(),
    )
    .into();

    let res = Response::new()
        .add_message(collection_creation_msg)
        .add_attribute("action", "instantiate")
        .add_attribute("admin", admin.to_string())
        .add_attribute("first_public_id", msg.first_public_id.to_string())
        .add_attribute("reserved_cap", msg.reserved_cap.to_string());
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
        ExecuteMsg::MintPublic { recipient } => execute_mint_public(deps, env, info, recipient),
        ExecuteMsg::MintSparker { recipient } => execute_mint_sparker(deps, env, info, recipient),
        ExecuteMsg::GrantCapability {
            capability,
            address,
        } => execute_grant_capability(deps, env, info, capability, address),
        ExecuteMsg::RevokeCapability {
            capability,
            address,
        } => execute_revoke_capability(deps, env, info, capability, address),
    }
}

pub fn execute_mint_public(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let capabilities = Capabilities::new();
    capabilities.assert_has(deps.storage, Capability::Sales, &info.sender)?;

    let mut state = STATE.load(deps.storage)?;
    if let (true, Some(frozen_caller)) = (state.sales_caller_frozen, &state.sales_caller) {
        if *frozen_caller != info.sender {
            return Err(PulseError::BadSalesCaller {
                caller: info.sender,
                frozen_caller: frozen_caller.clone(),
            }
            .into());
        }
    }
    let recipient = validate_target(deps.api, "recipient", &recipient)?;

    if state.next_public_id >= RESERVED_BASE {
        return Err(PulseError::PublicIdDomainExhausted {
            next_id: state.next_public_id,
        }
        .into());
    }
    let token_id = state.next_public_id;
    // Rolled back together with the mint if the ledger rejects delivery
    state.next_public_id += 1;

    let mut res = Response::new();
    if !state.sales_caller_frozen {
        state.sales_caller_frozen = true;
        state.sales_caller = Some(info.sender.clone());
        capabilities.seal(deps.storage, Capability::Sales, Capability::FrozenSalesAdmin)?;
        res = res.add_event(
            Event::new("sales_caller_frozen").add_attribute("caller", info.sender.to_string()),
        );
    }
    STATE.save(deps.storage, &state)?;

    let collection = COLLECTION.load(deps.storage)?;
    let mint_msg: CosmosMsg =
        generate_mint_msg(&collection, token_id, env.contract.address, recipient.clone()).into();

    let res = res
        .add_message(mint_msg)
        .add_event(
            Event::new("public_minted")
                .add_attribute("token_id", token_id.to_string())
                .add_attribute("recipient", recipient.to_string()),
        )
        .add_attribute("action", "mint_public")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("denom_id", collection.id)
        .set_data(to_json_binary(&MintResponse { token_id })?);
    Ok(res)
}

pub fn execute_mint_sparker(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    Capabilities::new().assert_has(deps.storage, Capability::Reserved, &info.sender)?;
    let recipient = validate_target(deps.api, "recipient", &recipient)?;

    let mut state = STATE.load(deps.storage)?;
    if state.reserved_remaining == 0 {
        return Err(PulseError::NoReservedLeft {}.into());
    }
    // Reserved ids count upwards from the base, never reused
    let token_id = RESERVED_BASE
        .checked_add(state.reserved_cap - state.reserved_remaining)
        .ok_or(PulseError::CounterOverflow {})?;
    state.reserved_remaining -= 1;
    STATE.save(deps.storage, &state)?;

    let collection = COLLECTION.load(deps.storage)?;
    let mint_msg: CosmosMsg =
        generate_mint_msg(&collection, token_id, env.contract.address, recipient.clone()).into();

    let res = Response::new()
        .add_message(mint_msg)
        .add_event(
            Event::new("sparker_minted")
                .add_attribute("token_id", token_id.to_string())
                .add_attribute("recipient", recipient.to_string())
                .add_attribute("reserved_remaining", state.reserved_remaining.to_string()),
        )
        .add_attribute("action", "mint_sparker")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("denom_id", collection.id)
        .set_data(to_json_binary(&MintResponse { token_id })?);
    Ok(res)
}

pub fn execute_grant_capability(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    capability: Capability,
    address: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let grantee = validate_target(deps.api, "address", &address)?;
    Capabilities::new().grant(deps.storage, &info.sender, capability, &grantee)?;

    let res = Response::new()
        .add_event(
            Event::new("capability_granted")
                .add_attribute("capability", capability.as_str())
                .add_attribute("address", grantee.to_string())
                .add_attribute("sender", info.sender.to_string()),
        )
        .add_attribute("action", "grant_capability");
    Ok(res)
}

pub fn execute_revoke_capability(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    capability: Capability,
    address: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let holder = validate_target(deps.api, "address", &address)?;
    Capabilities::new().revoke(deps.storage, &info.sender, capability, &holder)?;

    let res = Response::new()
        .add_event(
            Event::new("capability_revoked")
                .add_attribute("capability", capability.as_str())
                .add_attribute("address", holder.to_string())
                .add_attribute("sender", info.sender.to_string()),
        )
        .add_attribute("action", "revoke_capability");
    Ok(res)
}

// Implement Queries
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::State {} => to_json_binary(&query_state(deps, env)?),
        QueryMsg::Collection {} => to_json_binary(&query_collection(deps, env)?),
        QueryMsg::HasCapability {
            capability,
            address,
        } => to_json_binary(&query_has_capability(deps, env, capability, address)?),
        QueryMsg::CapabilityAdmin { capability } => {
            to_json_binary(&Capabilities::new().admin_of(deps.storage, capability)?)
        }
        QueryMsg::IsFrozen { capability } => {
            to_json_binary(&Capabilities::new().is_frozen(deps.storage, capability)?)
        }
        QueryMsg::OwnerOf { token_id } => to_json_binary(&query_owner_of(deps, env, token_id)?),
    }
}

fn query_state(deps: Deps, _env: Env) -> Result<MinterState, ContractError> {
    let state = STATE.load(deps.storage)?;
    Ok(state)
}

fn query_collection(deps: Deps, _env: Env) -> Result<CollectionDetails, ContractError> {
    let collection = COLLECTION.load(deps.storage)?;
    Ok(collection)
}

fn query_has_capability(
    deps: Deps,
    _env: Env,
    capability: Capability,
    address: String,
) -> Result<bool, ContractError> {
    let address = deps.api.addr_validate(&address)?;
    Ok(Capabilities::new().has(deps.storage, capability, &address))
}

fn query_owner_of(deps: Deps, _env: Env, token_id: u64) -> Result<OwnerOfResponse, ContractError> {
    let collection = COLLECTION.load(deps.storage)?;
    let onft_querier = OnftQuerier::new(&deps.querier);
    let response = onft_querier.onft(collection.id, token_id.to_string())?;
    match response.onft {
        Some(onft) => Ok(OwnerOfResponse { owner: onft.owner }),
        None => Err(PulseError::TokenNotFound { token_id }.into()),
    }
}
