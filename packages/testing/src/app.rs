use cosmwasm_std::testing::{MockApi, MockStorage};
use cosmwasm_std::Empty;
use cw_multi_test::{
    App, AppBuilder, BankKeeper, DistributionKeeper, FailingModule, GovFailingModule,
    IbcFailingModule, StakeKeeper, WasmKeeper,
};

use crate::stargate::StargateKeeper;

pub type PulseApp = App<
    BankKeeper,
    MockApi,
    MockStorage,
    FailingModule<Empty, Empty, Empty>,
    WasmKeeper<Empty, Empty>,
    StakeKeeper,
    DistributionKeeper,
    IbcFailingModule,
    GovFailingModule,
    StargateKeeper,
>;

/// App whose stargate messages are served by `keeper`.
pub fn pulse_app(keeper: StargateKeeper) -> PulseApp {
    AppBuilder::new()
        .with_stargate(keeper)
        .build(|_router, _api, _storage| {})
}
