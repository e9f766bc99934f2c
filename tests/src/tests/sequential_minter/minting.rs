use cosmwasm_std::{coins, from_json, Uint128};
use cw_multi_test::Executor;

use pulse_sequential_minter::error::ContractError as MinterContractError;
use pulse_testing::stargate::{query_onft_collection, DENOM_CREATION_FEE, DENOM_CREATION_FEE_DENOM};
use pulse_types::minter::{
    Capability, ExecuteMsg as MinterExecuteMsg, MintResponse, MinterState, RESERVED_BASE,
};
use pulse_types::PulseError;

use crate::helpers::mock_messages::minter_mock_messages::{
    return_minter_instantiate_msg, FIRST_PUBLIC_ID, RESERVED_CAP,
};
use crate::helpers::setup::{deploy_minter, setup};
use crate::helpers::utils::{
    event_attribute, grant_capability, pulse_error, query_minter_state, query_owner_of,
};

#[test]
fn creation_fee_must_be_exact() {
    let res = setup();
    let accounts = res.test_accounts;
    let code_ids = res.code_ids;
    let mut app = res.app;

    let error = app
        .instantiate_contract(
            code_ids.minter_code_id,
            accounts.admin.clone(),
            &return_minter_instantiate_msg(),
            &coins(DENOM_CREATION_FEE - 1, DENOM_CREATION_FEE_DENOM),
            "sequential-minter",
            None,
        )
        .unwrap_err();
    let error = error
        .root_cause()
        .downcast_ref::<MinterContractError>()
        .unwrap();
    assert_eq!(
        error,
        &MinterContractError::InvalidCreationFee {
            expected: Uint128::new(DENOM_CREATION_FEE),
            sent: Uint128::new(DENOM_CREATION_FEE - 1)
        }
    );

    let mut msg = return_minter_instantiate_msg();
    msg.reserved_cap = 0;
    let error = app
        .instantiate_contract(
            code_ids.minter_code_id,
            accounts.admin.clone(),
            &msg,
            &coins(DENOM_CREATION_FEE, DENOM_CREATION_FEE_DENOM),
            "sequential-minter",
            None,
        )
        .unwrap_err();
    assert_eq!(pulse_error(&error), Some(&PulseError::ZeroReservedCap {}));

    let mut msg = return_minter_instantiate_msg();
    msg.first_public_id = RESERVED_BASE;
    let error = app
        .instantiate_contract(
            code_ids.minter_code_id,
            accounts.admin.clone(),
            &msg,
            &coins(DENOM_CREATION_FEE, DENOM_CREATION_FEE_DENOM),
            "sequential-minter",
            None,
        )
        .unwrap_err();
    assert_eq!(
        pulse_error(&error),
        Some(&PulseError::InvalidFirstPublicId {
            first_public_id: RESERVED_BASE,
            reserved_base: RESERVED_BASE
        })
    );

    let minter = deploy_minter(&mut app, &accounts, &code_ids);
    let collection = query_onft_collection(app.storage(), "pulse").unwrap();
    let denom = collection.denom.unwrap();
    assert_eq!(denom.creator, minter.to_string());
    assert_eq!(denom.symbol, "PULSE");
    assert_eq!(denom.royalty_receivers[0].address, accounts.admin.to_string());
    assert!(collection.onfts.is_empty());

    assert_eq!(
        query_minter_state(&app, &minter),
        MinterState {
            next_public_id: FIRST_PUBLIC_ID,
            reserved_cap: RESERVED_CAP,
            reserved_remaining: RESERVED_CAP,
            sales_caller: None,
            sales_caller_frozen: false,
        }
    );
}

#[test]
fn public_mints_are_sequential() {
    let res = setup();
    let accounts = res.test_accounts;
    let code_ids = res.code_ids;
    let mut app = res.app;
    let minter = deploy_minter(&mut app, &accounts, &code_ids);

    let error = app
        .execute_contract(
            accounts.alice.clone(),
            minter.clone(),
            &MinterExecuteMsg::MintPublic {
                recipient: accounts.alice.to_string(),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        pulse_error(&error),
        Some(&PulseError::MissingCapability {
            capability: Capability::Sales,
            sender: accounts.alice.clone()
        })
    );

    grant_capability(
        &mut app,
        &accounts.admin,
        &minter,
        Capability::Sales,
        &accounts.alice,
    );
    for expected_id in 0..3u64 {
        let res = app
            .execute_contract(
                accounts.alice.clone(),
                minter.clone(),
                &MinterExecuteMsg::MintPublic {
                    recipient: accounts.bob.to_string(),
                },
                &[],
            )
            .unwrap();
        assert_eq!(
            event_attribute(&res, "public_minted", "token_id"),
            Some(expected_id.to_string())
        );
        let minted: MintResponse = from_json(res.data.unwrap()).unwrap();
        assert_eq!(minted.token_id, expected_id);
        assert_eq!(
            query_owner_of(&app, &minter, expected_id).unwrap().owner,
            accounts.bob.to_string()
        );
    }
    assert_eq!(query_minter_state(&app, &minter).next_public_id, 3);
}

#[test]
fn rejected_delivery_rolls_back_the_counter() {
    let res = setup();
    let accounts = res.test_accounts;
    let code_ids = res.code_ids;
    let mut app = res.app;
    let minter = deploy_minter(&mut app, &accounts, &code_ids);
    grant_capability(
        &mut app,
        &accounts.admin,
        &minter,
        Capability::Sales,
        &accounts.alice,
    );

    let error = app.execute_contract(
        accounts.alice.clone(),
        minter.clone(),
        &MinterExecuteMsg::MintPublic {
            recipient: accounts.rejector.to_string(),
        },
        &[],
    );
    assert!(error.is_err());

    // Counter and caller lock untouched
    let state = query_minter_state(&app, &minter);
    assert_eq!(state.next_public_id, 0);
    assert!(!state.sales_caller_frozen);
    assert_eq!(state.sales_caller, None);
    assert!(query_owner_of(&app, &minter, 0).is_err());

    app.execute_contract(
        accounts.alice.clone(),
        minter.clone(),
        &MinterExecuteMsg::MintPublic {
            recipient: accounts.alice.to_string(),
        },
        &[],
    )
    .unwrap();
    assert_eq!(
        query_owner_of(&app, &minter, 0).unwrap().owner,
        accounts.alice.to_string()
    );
}

#[test]
fn reserved_ids_sit_above_public_domain_and_exhaust() {
    let res = setup();
    let accounts = res.test_accounts;
    let code_ids = res.code_ids;
    let mut app = res.app;
    let minter = deploy_minter(&mut app, &accounts, &code_ids);

    let error = app
        .execute_contract(
            accounts.admin.clone(),
            minter.clone(),
            &MinterExecuteMsg::MintSparker {
                recipient: accounts.alice.to_string(),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        pulse_error(&error),
        Some(&PulseError::MissingCapability {
            capability: Capability::Reserved,
            sender: accounts.admin.clone()
        })
    );

    grant_capability(
        &mut app,
        &accounts.admin,
        &minter,
        Capability::Reserved,
        &accounts.admin,
    );
    grant_capability(
        &mut app,
        &accounts.admin,
        &minter,
        Capability::Sales,
        &accounts.alice,
    );

    app.execute_contract(
        accounts.alice.clone(),
        minter.clone(),
        &MinterExecuteMsg::MintPublic {
            recipient: accounts.alice.to_string(),
        },
        &[],
    )
    .unwrap();

    for offset in 0..RESERVED_CAP {
        let res = app
            .execute_contract(
                accounts.admin.clone(),
                minter.clone(),
                &MinterExecuteMsg::MintSparker {
                    recipient: accounts.bob.to_string(),
                },
                &[],
            )
            .unwrap();
        let token_id = RESERVED_BASE + offset;
        assert_eq!(
            event_attribute(&res, "sparker_minted", "token_id"),
            Some(token_id.to_string())
        );
        assert_eq!(
            event_attribute(&res, "sparker_minted", "reserved_remaining"),
            Some((RESERVED_CAP - offset - 1).to_string())
        );
        assert_eq!(
            query_owner_of(&app, &minter, token_id).unwrap().owner,
            accounts.bob.to_string()
        );
    }

    let error = app
        .execute_contract(
            accounts.admin.clone(),
            minter.clone(),
            &MinterExecuteMsg::MintSparker {
                recipient: accounts.bob.to_string(),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(pulse_error(&error), Some(&PulseError::NoReservedLeft {}));

    let state = query_minter_state(&app, &minter);
    assert_eq!(state.reserved_remaining, 0);
    // Reserved mints never touch the public counter
    assert_eq!(state.next_public_id, 1);
    assert_eq!(
        query_owner_of(&app, &minter, 0).unwrap().owner,
        accounts.alice.to_string()
    );
}

#[test]
fn owner_of_unknown_token() {
    let res = setup();
    let accounts = res.test_accounts;
    let code_ids = res.code_ids;
    let mut app = res.app;
    let minter = deploy_minter(&mut app, &accounts, &code_ids);

    let error = query_owner_of(&app, &minter, 42).unwrap_err();
    assert!(error.to_string().contains("Token 42 not found"));
}
