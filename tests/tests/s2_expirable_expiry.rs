mod common;

use near_sdk::json_types::U64;
use serde_json::json;

/// The oldest-first, boundary-exact expiry semantics (a deposit created at
/// `t` is spendable through `t + expiration_period` and gone the instant
/// after) are exercised exhaustively by `coin::expirable`'s own unit tests,
/// which can advance a synthetic clock instantly. A sandbox cannot: the
/// contract's 3600-second window is fixed (there is no setter), and a real
/// sandbox test would have to wait out an hour of wall-clock time to
/// observe it. This test instead checks the reachable slice of that
/// behavior — that a freshly credited expirable deposit is counted in
/// full immediately, i.e. `balance_of` never applies the sweep
/// prematurely.
#[tokio::test]
async fn fresh_expirable_deposit_counts_immediately() -> anyhow::Result<()> {
    let worker = common::sandbox().await?;
    let minter = common::create_account(&worker, "minter").await?;
    let alice = common::create_account(&worker, "alice").await?;
    let coin = common::deploy_coin(&worker, &minter, "USD").await?;

    common::mint(&coin, &minter, 500).await?;

    minter
        .call(coin.id(), "transfer")
        .args_json(json!({
            "receiver_type": "User",
            "receiver_id": alice.id(),
            "amount": U64(120),
            "expirable": true,
        }))
        .transact()
        .await?
        .into_result()?;

    let alice_balance = common::balance_of(&coin, "User", alice.id().as_str()).await?;
    assert_eq!(alice_balance.0, 120);

    Ok(())
}
