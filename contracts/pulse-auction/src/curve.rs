//! Hyperbolic pulse curve.
//!
//! Between two sales the ask follows `floor + k / (now - anchor)`, capped at
//! `floor + k` up to the anchor. Every sale resets the curve: the price just
//! paid becomes the new floor and the anchor is re-derived so that the curve
//! starts from the paid price plus a premium for the idle time.

use cosmwasm_std::Uint128;
use pulse_types::auction::{CurveParams, CurveState};
use pulse_types::PulseError;

/// Ask at `now`. An inactive curve always asks the genesis price.
pub fn current_ask(
    params: &CurveParams,
    state: &CurveState,
    now: u64,
) -> Result<Uint128, PulseError> {
    if !state.curve_active {
        return Ok(params.genesis_price);
    }
    let decay = if now <= state.anchor_time {
        params.k
    } else {
        params.k / Uint128::from(now - state.anchor_time)
    };
    state
        .floor_price
        .checked_add(decay)
        .map_err(|_| PulseError::PriceOverflow {})
}

/// Anchor time at which the curve over `floor` passes through `initial_ask`
/// at `reference_time`.
pub fn derive_anchor(
    initial_ask: Uint128,
    floor: Uint128,
    k: Uint128,
    reference_time: u64,
) -> Result<u64, PulseError> {
    if initial_ask <= floor {
        return Err(PulseError::GapNonPositive { initial_ask, floor });
    }
    let quotient = k / (initial_ask - floor);
    let offset = u64::try_from(quotient.u128())
        .map_err(|_| PulseError::GapOverflow { quotient })?;
    if reference_time <= offset {
        return Err(PulseError::AnchorUnderflow {
            reference_time,
            offset,
        });
    }
    Ok(reference_time - offset)
}

/// State after the first ever sale, settled at `now`.
pub fn on_genesis_sale(params: &CurveParams, now: u64) -> Result<CurveState, PulseError> {
    let anchor_time = derive_anchor(params.genesis_price, params.genesis_floor, params.k, now)?;
    Ok(CurveState {
        curve_active: true,
        epoch_index: 1,
        start_time: now,
        anchor_time,
        floor_price: params.genesis_floor,
    })
}

/// State after a sale at `last_price` on an active curve.
pub fn on_subsequent_sale(
    params: &CurveParams,
    state: &CurveState,
    now: u64,
    last_price: Uint128,
) -> Result<CurveState, PulseError> {
    let elapsed = now
        .checked_sub(state.start_time)
        .ok_or(PulseError::ClockRegression {
            previous: state.start_time,
            now,
        })?;
    let premium = Uint128::from(elapsed)
        .checked_mul(params.pts)
        .map_err(|_| PulseError::PremiumOverflow {})?;
    let initial_ask = last_price
        .checked_add(premium)
        .map_err(|_| PulseError::PremiumOverflow {})?;
    let anchor_time = derive_anchor(initial_ask, last_price, params.k, now)?;
    let epoch_index = state
        .epoch_index
        .checked_add(1)
        .ok_or(PulseError::CounterOverflow {})?;

    Ok(CurveState {
        curve_active: true,
        epoch_index,
        start_time: now,
        anchor_time,
        floor_price: last_price,
    })
}

/// Applies a sale at `price` to the curve, whether it is the genesis sale or not.
pub fn advance(
    params: &CurveParams,
    state: &CurveState,
    now: u64,
    price: Uint128,
) -> Result<CurveState, PulseError> {
    if state.curve_active {
        on_subsequent_sale(params, state, now, price)
    } else {
        on_genesis_sale(params, now)
    }
}
