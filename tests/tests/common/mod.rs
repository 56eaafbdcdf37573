//! Sandbox fixtures shared by the scenario tests. Each test spins up its
//! own sandbox rather than sharing one across the suite, trading a little
//! startup time for tests that can never bleed state into each other.

use near_sdk::{NearToken, json_types::U64};
use near_workspaces::{Account, Contract, Worker, network::Sandbox};
use serde_json::json;

pub async fn sandbox() -> anyhow::Result<Worker<Sandbox>> {
    Ok(near_workspaces::sandbox().await?)
}

pub async fn create_account(worker: &Worker<Sandbox>, prefix: &str) -> anyhow::Result<Account> {
    let root = worker.root_account()?;
    Ok(root
        .create_subaccount(prefix)
        .initial_balance(NearToken::from_near(20))
        .transact()
        .await?
        .into_result()?)
}

/// Deploys a `crowdfund-coin` instance, initialized with `minter` as the
/// account authorized to `mint`/`refund`/`batch_refund`.
pub async fn deploy_coin(
    worker: &Worker<Sandbox>,
    minter: &Account,
    currency_name: &str,
) -> anyhow::Result<Contract> {
    let wasm = near_workspaces::compile_project("../coin").await?;
    let contract = worker.dev_deploy(&wasm).await?;
    contract
        .call("new")
        .args_json(json!({
            "minter_id": minter.id(),
            "currency_name": currency_name,
        }))
        .transact()
        .await?
        .into_result()?;
    Ok(contract)
}

pub async fn deploy_foundation(worker: &Worker<Sandbox>) -> anyhow::Result<Contract> {
    let wasm = near_workspaces::compile_project("../foundation").await?;
    let contract = worker.dev_deploy(&wasm).await?;
    contract.call("new").args_json(json!({})).transact().await?.into_result()?;
    Ok(contract)
}

pub async fn mint(coin: &Contract, minter: &Account, amount: u64) -> anyhow::Result<U64> {
    Ok(minter
        .call(coin.id(), "mint")
        .args_json(json!({ "amount": U64(amount) }))
        .transact()
        .await?
        .into_result()?
        .json()?)
}

pub async fn balance_of(coin: &Contract, account_type: &str, account_id: &str) -> anyhow::Result<U64> {
    let balance: serde_json::Value = coin
        .view("balance_of")
        .args_json(json!({ "account_type": account_type, "account_id": account_id }))
        .await?
        .json()?;
    Ok(serde_json::from_value(balance["balance"].clone())?)
}
