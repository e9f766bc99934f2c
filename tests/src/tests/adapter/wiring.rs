use cw_multi_test::Executor;

use pulse_types::adapter::{CouplingConfig, ExecuteMsg as AdapterExecuteMsg, QueryMsg};
use pulse_types::PulseError;

use crate::helpers::mock_messages::adapter_mock_messages::{EPOCH_BASE, TOKEN_BASE};
use crate::helpers::mock_messages::auction_mock_messages::native_payment;
use crate::helpers::setup::{deploy, setup, OPEN_TIME};
use crate::helpers::utils::{advance_to, bid_at_ask, event_attribute, pulse_error};

#[test]
fn owner_gated_wiring_until_frozen() {
    let res = setup();
    let accounts = res.test_accounts;
    let code_ids = res.code_ids;
    let mut app = res.app;
    let contracts = deploy(&mut app, &accounts, &code_ids, native_payment());

    let config: CouplingConfig = app
        .wrap()
        .query_wasm_smart(contracts.adapter.to_string(), &QueryMsg::Config {})
        .unwrap();
    assert_eq!(
        config,
        CouplingConfig {
            owner: accounts.admin.clone(),
            auction: Some(contracts.auction.clone()),
            minter: contracts.minter.clone(),
            token_base: TOKEN_BASE,
            epoch_base: EPOCH_BASE,
            wiring_frozen: false,
        }
    );

    // Non owner
    let error = app
        .execute_contract(
            accounts.bob.clone(),
            contracts.adapter.clone(),
            &AdapterExecuteMsg::SetMinter {
                minter: accounts.bob.to_string(),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        pulse_error(&error),
        Some(&PulseError::NotOwner {
            sender: accounts.bob.clone()
        })
    );

    // Null target
    let error = app
        .execute_contract(
            accounts.admin.clone(),
            contracts.adapter.clone(),
            &AdapterExecuteMsg::SetAuction {
                auction: "".to_string(),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        pulse_error(&error),
        Some(&PulseError::NullTarget {
            field: "auction".to_string()
        })
    );

    // Owner can rewire before freezing
    app.execute_contract(
        accounts.admin.clone(),
        contracts.adapter.clone(),
        &AdapterExecuteMsg::SetAuction {
            auction: accounts.bob.to_string(),
        },
        &[],
    )
    .unwrap();
    app.execute_contract(
        accounts.admin.clone(),
        contracts.adapter.clone(),
        &AdapterExecuteMsg::SetAuction {
            auction: contracts.auction.to_string(),
        },
        &[],
    )
    .unwrap();

    let res = app
        .execute_contract(
            accounts.admin.clone(),
            contracts.adapter.clone(),
            &AdapterExecuteMsg::FreezeWiring {},
            &[],
        )
        .unwrap();
    assert_eq!(
        event_attribute(&res, "wiring_frozen", "owner"),
        Some(accounts.admin.to_string())
    );

    for msg in [
        AdapterExecuteMsg::SetAuction {
            auction: accounts.bob.to_string(),
        },
        AdapterExecuteMsg::SetMinter {
            minter: accounts.bob.to_string(),
        },
        AdapterExecuteMsg::FreezeWiring {},
    ] {
        let error = app
            .execute_contract(accounts.admin.clone(), contracts.adapter.clone(), &msg, &[])
            .unwrap_err();
        assert_eq!(pulse_error(&error), Some(&PulseError::WiringFrozen {}));
    }

    let config: CouplingConfig = app
        .wrap()
        .query_wasm_smart(contracts.adapter.to_string(), &QueryMsg::Config {})
        .unwrap();
    assert!(config.wiring_frozen);
    assert_eq!(config.auction, Some(contracts.auction.clone()));

    // Frozen wiring still settles
    advance_to(&mut app, OPEN_TIME);
    bid_at_ask(&mut app, &accounts.alice, &contracts.auction).unwrap();
}

#[test]
fn expected_token_id_query() {
    let res = setup();
    let accounts = res.test_accounts;
    let code_ids = res.code_ids;
    let mut app = res.app;
    let contracts = deploy(&mut app, &accounts, &code_ids, native_payment());

    let expected: u64 = app
        .wrap()
        .query_wasm_smart(
            contracts.adapter.to_string(),
            &QueryMsg::ExpectedTokenId { epoch: 5 },
        )
        .unwrap();
    assert_eq!(expected, TOKEN_BASE + 5 - EPOCH_BASE);

    let below_base: Result<u64, _> = app.wrap().query_wasm_smart(
        contracts.adapter.to_string(),
        &QueryMsg::ExpectedTokenId { epoch: 0 },
    );
    assert!(below_base.is_err());
}
