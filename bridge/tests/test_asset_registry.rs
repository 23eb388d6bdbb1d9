//! Asset allow-list integration tests.

use common::{AssetKind, CustodyMode};
use cosmwasm_std::Addr;
use cw_multi_test::{App, ContractWrapper, Executor};

use subnet_bridge::msg::{
    AllowedAssetResponse, AllowedAssetsResponse, ConfigResponse, ExecuteMsg, InstantiateMsg,
    IsAllowedResponse, QueryMsg,
};
use subnet_bridge::state::AssetRegistration;

// ============================================================================
// Test Setup
// ============================================================================

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        subnet_bridge::contract::execute,
        subnet_bridge::contract::instantiate,
        subnet_bridge::contract::query,
    )
    .with_reply(subnet_bridge::contract::reply);
    Box::new(contract)
}

fn registration(asset: &str, kind: AssetKind, custody: CustodyMode) -> AssetRegistration {
    AssetRegistration {
        asset: asset.to_string(),
        kind,
        custody,
        l2_contract: format!("ST000.{}", asset),
    }
}

fn default_assets() -> Vec<AssetRegistration> {
    vec![
        registration("stx1wrappedbtc", AssetKind::Ft, CustodyMode::Mint),
        registration("stx1punks", AssetKind::Nft, CustodyMode::Escrow),
    ]
}

fn setup() -> (App, Addr, Addr, Addr) {
    let mut app = App::default();
    let miner = Addr::unchecked("stx1miner");
    let user = Addr::unchecked("stx1user");

    let code_id = app.store_code(contract_bridge());
    let bridge = app
        .instantiate_contract(
            code_id,
            Addr::unchecked("stx1deployer"),
            &InstantiateMsg {
                admin: None,
                committers: vec![miner.to_string()],
                native_denom: "ustx".to_string(),
                default_assets: default_assets(),
                withdrawal_policy: None,
            },
            &[],
            "subnet-bridge",
            None,
        )
        .unwrap();

    (app, bridge, miner, user)
}

fn register_msg(asset: &str, kind: AssetKind, custody: CustodyMode) -> ExecuteMsg {
    ExecuteMsg::RegisterAsset {
        asset: asset.to_string(),
        kind,
        custody,
        l2_contract: format!("ST000.{}", asset),
    }
}

fn allowed(app: &App, bridge: &Addr, asset: &str) -> AllowedAssetResponse {
    app.wrap()
        .query_wasm_smart(
            bridge,
            &QueryMsg::AllowedAsset {
                asset: asset.to_string(),
            },
        )
        .unwrap()
}

// ============================================================================
// Register Asset Tests
// ============================================================================

/// Unauthorized registration leaves the registry untouched and the asset
/// can still be registered by a committer.
#[test]
fn test_scenario_unauthorized_register_then_authorized() {
    let (mut app, bridge, miner, user) = setup();

    let err = app
        .execute_contract(
            user,
            bridge.clone(),
            &register_msg("stx1gold", AssetKind::Ft, CustodyMode::Escrow),
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("caller is not a committer"));
    assert!(allowed(&app, &bridge, "stx1gold").entry.is_none());

    let res = app
        .execute_contract(
            miner,
            bridge.clone(),
            &register_msg("stx1gold", AssetKind::Ft, CustodyMode::Escrow),
            &[],
        )
        .unwrap();

    let event = res
        .events
        .iter()
        .find(|e| e.ty == "wasm-register-asset")
        .unwrap();
    assert!(event
        .attributes
        .iter()
        .any(|a| a.key == "l2_contract" && a.value == "ST000.stx1gold"));

    let entry = allowed(&app, &bridge, "stx1gold").entry.unwrap();
    assert_eq!(entry.kind, AssetKind::Ft);
    assert_eq!(entry.custody, CustodyMode::Escrow);

    let res: IsAllowedResponse = app
        .wrap()
        .query_wasm_smart(
            &bridge,
            &QueryMsg::IsAllowed {
                asset: "stx1gold".to_string(),
            },
        )
        .unwrap();
    assert_eq!(res.custody, Some(CustodyMode::Escrow));
}

#[test]
fn test_register_asset_is_write_once() {
    let (mut app, bridge, miner, _) = setup();

    app.execute_contract(
        miner.clone(),
        bridge.clone(),
        &register_msg("stx1gold", AssetKind::Ft, CustodyMode::Escrow),
        &[],
    )
    .unwrap();

    // Same asset with a different mode is still a re-registration
    let err = app
        .execute_contract(
            miner,
            bridge.clone(),
            &register_msg("stx1gold", AssetKind::Ft, CustodyMode::Mint),
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Asset already allowed: stx1gold"));

    let entry = allowed(&app, &bridge, "stx1gold").entry.unwrap();
    assert_eq!(entry.custody, CustodyMode::Escrow);
}

#[test]
fn test_native_coins_cannot_be_registered() {
    let (mut app, bridge, miner, _) = setup();

    let err = app
        .execute_contract(
            miner,
            bridge,
            &register_msg("ustx", AssetKind::Coin, CustodyMode::Escrow),
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Validation failed"));
}

// ============================================================================
// Default Asset Tests
// ============================================================================

#[test]
fn test_setup_default_assets_runs_once() {
    let (mut app, bridge, miner, user) = setup();

    let err = app
        .execute_contract(user, bridge.clone(), &ExecuteMsg::SetupDefaultAssets {}, &[])
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("caller is not a committer"));

    let res = app
        .execute_contract(
            miner.clone(),
            bridge.clone(),
            &ExecuteMsg::SetupDefaultAssets {},
            &[],
        )
        .unwrap();
    let registered = res
        .events
        .iter()
        .filter(|e| e.ty == "wasm-register-asset")
        .count();
    assert_eq!(registered, 2);

    let config: ConfigResponse = app
        .wrap()
        .query_wasm_smart(&bridge, &QueryMsg::Config {})
        .unwrap();
    assert!(config.defaults_installed);

    let nft = allowed(&app, &bridge, "stx1punks").entry.unwrap();
    assert_eq!(nft.kind, AssetKind::Nft);

    let err = app
        .execute_contract(miner, bridge, &ExecuteMsg::SetupDefaultAssets {}, &[])
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Asset already allowed"));
}

#[test]
fn test_setup_default_assets_conflicts_with_prior_registration() {
    let (mut app, bridge, miner, _) = setup();

    app.execute_contract(
        miner.clone(),
        bridge.clone(),
        &register_msg("stx1punks", AssetKind::Nft, CustodyMode::Mint),
        &[],
    )
    .unwrap();

    let err = app
        .execute_contract(miner, bridge.clone(), &ExecuteMsg::SetupDefaultAssets {}, &[])
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Asset already allowed: stx1punks"));

    // The failed setup rolled back entirely
    assert!(allowed(&app, &bridge, "stx1wrappedbtc").entry.is_none());
}

#[test]
fn test_allowed_assets_pagination() {
    let (mut app, bridge, miner, _) = setup();

    for asset in ["stx1aaa", "stx1bbb", "stx1ccc"] {
        app.execute_contract(
            miner.clone(),
            bridge.clone(),
            &register_msg(asset, AssetKind::Ft, CustodyMode::Escrow),
            &[],
        )
        .unwrap();
    }

    let page: AllowedAssetsResponse = app
        .wrap()
        .query_wasm_smart(
            &bridge,
            &QueryMsg::AllowedAssets {
                start_after: Some("stx1aaa".to_string()),
                limit: Some(1),
            },
        )
        .unwrap();
    assert_eq!(page.assets.len(), 1);
    assert_eq!(page.assets[0].asset, "stx1bbb");
}
