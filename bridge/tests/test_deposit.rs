//! Deposit engine integration tests.
//!
//! Covers coin, FT (allowance pull and cw20 `Send` hook) and NFT deposits,
//! and the distinction between a disallowed asset, a failing token contract
//! and a token contract that reports success without moving anything.

use common::nft::{NftExecuteMsg, NftQueryMsg, OwnerOfResponse};
use common::{AssetKind, CustodyMode};
use cosmwasm_std::{
    coins, to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response,
    StdError, StdResult, Uint128,
};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_multi_test::{App, ContractWrapper, Executor};

use subnet_bridge::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, ReceiveMsg, StatsResponse};

// ============================================================================
// Test Setup
// ============================================================================

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        subnet_bridge::contract::execute,
        subnet_bridge::contract::instantiate,
        subnet_bridge::contract::query,
    )
    .with_reply(subnet_bridge::contract::reply);
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

fn contract_nft() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        subnet_nft::contract::execute,
        subnet_nft::contract::instantiate,
        subnet_nft::contract::query,
    );
    Box::new(contract)
}

// A token that accepts every call and never moves a balance

fn lazy_instantiate(_: DepsMut, _: Env, _: MessageInfo, _: Empty) -> StdResult<Response> {
    Ok(Response::new())
}

fn lazy_execute(_: DepsMut, _: Env, _: MessageInfo, _: Cw20ExecuteMsg) -> StdResult<Response> {
    Ok(Response::new())
}

fn lazy_query(_: Deps, _: Env, msg: Cw20QueryMsg) -> StdResult<Binary> {
    match msg {
        Cw20QueryMsg::Balance { .. } => to_json_binary(&BalanceResponse {
            balance: Uint128::zero(),
        }),
        _ => Err(StdError::generic_err("unsupported query")),
    }
}

fn contract_lazy_token() -> Box<dyn cw_multi_test::Contract<Empty>> {
    Box::new(ContractWrapper::new(lazy_execute, lazy_instantiate, lazy_query))
}

struct TestEnv {
    app: App,
    bridge: Addr,
    miner: Addr,
    user: Addr,
    token: Addr,
    lazy_token: Addr,
    collection: Addr,
}

fn setup() -> TestEnv {
    let mut app = App::default();
    let admin = Addr::unchecked("stx1admin");
    let miner = Addr::unchecked("stx1miner");
    let user = Addr::unchecked("stx1user");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &user, coins(1_000_000, "ustx"))
            .unwrap();
    });

    let bridge_code = app.store_code(contract_bridge());
    let bridge = app
        .instantiate_contract(
            bridge_code,
            admin.clone(),
            &InstantiateMsg {
                admin: Some(admin.to_string()),
                committers: vec![miner.to_string()],
                native_denom: "ustx".to_string(),
                default_assets: vec![],
                withdrawal_policy: None,
            },
            &[],
            "subnet-bridge",
            None,
        )
        .unwrap();

    let cw20_code = app.store_code(contract_cw20());
    let token = app
        .instantiate_contract(
            cw20_code,
            admin.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: "Subnet Token".to_string(),
                symbol: "SUBT".to_string(),
                decimals: 6,
                initial_balances: vec![Cw20Coin {
                    address: user.to_string(),
                    amount: Uint128::new(1_000),
                }],
                mint: None,
                marketing: None,
            },
            &[],
            "subnet-token",
            None,
        )
        .unwrap();

    let lazy_code = app.store_code(contract_lazy_token());
    let lazy_token = app
        .instantiate_contract(lazy_code, admin.clone(), &Empty {}, &[], "lazy-token", None)
        .unwrap();

    let nft_code = app.store_code(contract_nft());
    let collection = app
        .instantiate_contract(
            nft_code,
            admin.clone(),
            &subnet_nft::msg::InstantiateMsg {
                name: "Subnet Punks".to_string(),
                symbol: "SPUNK".to_string(),
                minter: admin.to_string(),
            },
            &[],
            "subnet-punks",
            None,
        )
        .unwrap();
    app.execute_contract(
        admin.clone(),
        collection.clone(),
        &NftExecuteMsg::Mint {
            token_id: "7".to_string(),
            owner: user.to_string(),
            token_uri: None,
        },
        &[],
    )
    .unwrap();

    for (asset, kind) in [
        (&token, AssetKind::Ft),
        (&lazy_token, AssetKind::Ft),
        (&collection, AssetKind::Nft),
    ] {
        app.execute_contract(
            miner.clone(),
            bridge.clone(),
            &ExecuteMsg::RegisterAsset {
                asset: asset.to_string(),
                kind,
                custody: CustodyMode::Escrow,
                l2_contract: format!("ST000.{}", asset),
            },
            &[],
        )
        .unwrap();
    }

    TestEnv {
        app,
        bridge,
        miner,
        user,
        token,
        lazy_token,
        collection,
    }
}

fn cw20_balance(app: &App, token: &Addr, account: &Addr) -> Uint128 {
    let res: BalanceResponse = app
        .wrap()
        .query_wasm_smart(
            token,
            &Cw20QueryMsg::Balance {
                address: account.to_string(),
            },
        )
        .unwrap();
    res.balance
}

fn approve(env: &mut TestEnv, amount: u128) {
    env.app
        .execute_contract(
            env.user.clone(),
            env.token.clone(),
            &Cw20ExecuteMsg::IncreaseAllowance {
                spender: env.bridge.to_string(),
                amount: Uint128::new(amount),
                expires: None,
            },
            &[],
        )
        .unwrap();
}

// ============================================================================
// Coin Deposits
// ============================================================================

#[test]
fn test_deposit_coin() {
    let mut env = setup();

    let res = env
        .app
        .execute_contract(
            env.user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::DepositCoin {
                amount: Uint128::new(500),
            },
            &coins(500, "ustx"),
        )
        .unwrap();
    assert!(res.events.iter().any(|e| e.ty == "wasm-deposit-coin"));

    let custody = env.app.wrap().query_balance(&env.bridge, "ustx").unwrap();
    assert_eq!(custody.amount, Uint128::new(500));

    let stats: StatsResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.bridge, &QueryMsg::Stats {})
        .unwrap();
    assert_eq!(stats.total_deposits, 1);
}

#[test]
fn test_deposit_coin_rejects_mismatched_funds() {
    let mut env = setup();

    let err = env
        .app
        .execute_contract(
            env.user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::DepositCoin {
                amount: Uint128::new(500),
            },
            &coins(400, "ustx"),
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Validation failed"));

    let err = env
        .app
        .execute_contract(
            env.user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::DepositCoin {
                amount: Uint128::zero(),
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Amount cannot be zero"));
}

// ============================================================================
// FT Deposits
// ============================================================================

#[test]
fn test_deposit_ft_pulls_allowance() {
    let mut env = setup();
    approve(&mut env, 300);

    let res = env
        .app
        .execute_contract(
            env.user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::DepositFt {
                asset: env.token.to_string(),
                amount: Uint128::new(300),
                memo: Some(Binary::from(vec![b'm'; 34])),
            },
            &[],
        )
        .unwrap();

    let event = res
        .events
        .iter()
        .find(|e| e.ty == "wasm-deposit-ft")
        .unwrap();
    assert!(event
        .attributes
        .iter()
        .any(|a| a.key == "l2_contract" && a.value == format!("ST000.{}", env.token)));
    assert!(res
        .events
        .iter()
        .flat_map(|e| &e.attributes)
        .any(|a| a.key == "transfer_verified" && a.value == "true"));

    assert_eq!(cw20_balance(&env.app, &env.token, &env.bridge), Uint128::new(300));
    assert_eq!(cw20_balance(&env.app, &env.token, &env.user), Uint128::new(700));
}

#[test]
fn test_deposit_ft_rejects_unregistered_asset() {
    let mut env = setup();

    let err = env
        .app
        .execute_contract(
            env.user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::DepositFt {
                asset: "stx1unknown".to_string(),
                amount: Uint128::new(1),
                memo: None,
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Asset not allowed"));

    // An NFT collection is not allowed as an FT
    let err = env
        .app
        .execute_contract(
            env.user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::DepositFt {
                asset: env.collection.to_string(),
                amount: Uint128::new(1),
                memo: None,
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Asset not allowed"));
}

#[test]
fn test_deposit_ft_without_allowance_is_call_failure() {
    let mut env = setup();

    let err = env
        .app
        .execute_contract(
            env.user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::DepositFt {
                asset: env.token.to_string(),
                amount: Uint128::new(10),
                memo: None,
            },
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Asset contract call failed"));
    assert_eq!(cw20_balance(&env.app, &env.token, &env.bridge), Uint128::zero());
}

#[test]
fn test_deposit_ft_that_moves_nothing_is_transfer_failure() {
    let mut env = setup();

    let err = env
        .app
        .execute_contract(
            env.user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::DepositFt {
                asset: env.lazy_token.to_string(),
                amount: Uint128::new(10),
                memo: None,
            },
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("reported success but moved nothing"));

    let stats: StatsResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.bridge, &QueryMsg::Stats {})
        .unwrap();
    assert_eq!(stats.total_deposits, 0);
}

#[test]
fn test_deposit_ft_memo_limit() {
    let mut env = setup();
    approve(&mut env, 10);

    let err = env
        .app
        .execute_contract(
            env.user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::DepositFt {
                asset: env.token.to_string(),
                amount: Uint128::new(10),
                memo: Some(Binary::from(vec![b'm'; 35])),
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("memo is 35 bytes"));
}

#[test]
fn test_deposit_ft_via_send_hook() {
    let mut env = setup();

    let res = env
        .app
        .execute_contract(
            env.user.clone(),
            env.token.clone(),
            &Cw20ExecuteMsg::Send {
                contract: env.bridge.to_string(),
                amount: Uint128::new(250),
                msg: to_json_binary(&ReceiveMsg::DepositFt { memo: None }).unwrap(),
            },
            &[],
        )
        .unwrap();
    assert!(res.events.iter().any(|e| e.ty == "wasm-deposit-ft"));
    assert_eq!(cw20_balance(&env.app, &env.token, &env.bridge), Uint128::new(250));
}

// ============================================================================
// NFT Deposits
// ============================================================================

fn nft_owner(env: &TestEnv, token_id: &str) -> String {
    let res: OwnerOfResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.collection,
            &NftQueryMsg::OwnerOf {
                token_id: token_id.to_string(),
            },
        )
        .unwrap();
    res.owner
}

#[test]
fn test_deposit_nft_moves_token_into_custody() {
    let mut env = setup();

    env.app
        .execute_contract(
            env.user.clone(),
            env.collection.clone(),
            &NftExecuteMsg::ApproveAll {
                operator: env.bridge.to_string(),
            },
            &[],
        )
        .unwrap();

    let res = env
        .app
        .execute_contract(
            env.user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::DepositNft {
                asset: env.collection.to_string(),
                id: Uint128::new(7),
            },
            &[],
        )
        .unwrap();
    assert!(res.events.iter().any(|e| e.ty == "wasm-deposit-nft"));
    assert_eq!(nft_owner(&env, "7"), env.bridge.to_string());
}

#[test]
fn test_deposit_nft_requires_ownership() {
    let mut env = setup();

    // Token 7 belongs to the user, not the miner
    let err = env
        .app
        .execute_contract(
            env.miner.clone(),
            env.bridge.clone(),
            &ExecuteMsg::DepositNft {
                asset: env.collection.to_string(),
                id: Uint128::new(7),
            },
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("sender does not own"));

    // Unknown token: the owner lookup itself fails
    let err = env
        .app
        .execute_contract(
            env.user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::DepositNft {
                asset: env.collection.to_string(),
                id: Uint128::new(99),
            },
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Asset contract call failed"));
}

#[test]
fn test_deposit_nft_without_approval_is_call_failure() {
    let mut env = setup();

    let err = env
        .app
        .execute_contract(
            env.user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::DepositNft {
                asset: env.collection.to_string(),
                id: Uint128::new(7),
            },
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Asset contract call failed"));
    assert_eq!(nft_owner(&env, "7"), env.user.to_string());
}
