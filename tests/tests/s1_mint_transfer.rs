mod common;

use near_sdk::json_types::U64;
use serde_json::json;

#[tokio::test]
async fn mint_then_transfer_moves_a_permanent_balance() -> anyhow::Result<()> {
    let worker = common::sandbox().await?;
    let minter = common::create_account(&worker, "minter").await?;
    let alice = common::create_account(&worker, "alice").await?;
    let coin = common::deploy_coin(&worker, &minter, "USD").await?;

    let minted: U64 = common::mint(&coin, &minter, 1_000).await?;
    assert_eq!(minted.0, 1_000);

    let transferred: U64 = minter
        .call(coin.id(), "transfer")
        .args_json(json!({
            "receiver_type": "User",
            "receiver_id": alice.id(),
            "amount": U64(400),
            "expirable": false,
        }))
        .transact()
        .await?
        .into_result()?
        .json()?;
    // Balance remaining on the caller (minter) after the debit.
    assert_eq!(transferred.0, 600);

    let alice_balance = common::balance_of(&coin, "User", alice.id().as_str()).await?;
    assert_eq!(alice_balance.0, 400);

    let minter_balance = common::balance_of(&coin, "User", minter.id().as_str()).await?;
    assert_eq!(minter_balance.0, 600);

    Ok(())
}

#[tokio::test]
async fn only_minter_may_mint() -> anyhow::Result<()> {
    let worker = common::sandbox().await?;
    let minter = common::create_account(&worker, "minter").await?;
    let outsider = common::create_account(&worker, "outsider").await?;
    let coin = common::deploy_coin(&worker, &minter, "USD").await?;

    let result = outsider
        .call(coin.id(), "mint")
        .args_json(json!({ "amount": U64(1) }))
        .transact()
        .await?;
    assert!(result.is_failure());

    Ok(())
}
