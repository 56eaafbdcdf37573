mod common;

use near_sdk::json_types::U64;
use serde_json::{Value, json};

/// Allowance is keyed by whoever holds it, not by who receives the funds:
/// the admin grants itself standing via `set_allowance`, then withdraws to
/// a third party (`carol`, holding none of her own allowance) entirely on
/// the admin's.
#[tokio::test]
async fn admin_withdraws_on_its_own_allowance_to_a_third_party() -> anyhow::Result<()> {
    let worker = common::sandbox().await?;
    let minter = common::create_account(&worker, "minter").await?;
    let admin = common::create_account(&worker, "admin").await?;
    let donor = common::create_account(&worker, "donor").await?;
    let carol = common::create_account(&worker, "carol").await?;
    let coin = common::deploy_coin(&worker, &minter, "USD").await?;
    let foundation = common::deploy_foundation(&worker).await?;

    common::mint(&coin, &minter, 200).await?;
    minter
        .call(coin.id(), "transfer")
        .args_json(json!({
            "receiver_type": "User",
            "receiver_id": donor.id(),
            "amount": U64(200),
            "expirable": false,
        }))
        .transact()
        .await?
        .into_result()?;

    let project_id: String = admin
        .call(foundation.id(), "create_foundation")
        .args_json(json!({ "request": {
            "name": "Community Garden",
            "category": "environment",
            "description": "a garden",
            "image": null,
            "admin_id": admin.id(),
            "funding_goal": U64(200),
            "main_currency": coin.id(),
            "accept_currencies": [coin.id()],
            "deadline": U64(4_102_444_800),
            "close_on_goal_reached": true,
            "withdrawal_allowed": true,
        }}))
        .transact()
        .await?
        .into_result()?
        .json()?;

    admin
        .call(foundation.id(), "submit_for_review")
        .args_json(json!({ "project_id": project_id }))
        .transact()
        .await?
        .into_result()?;
    admin
        .call(foundation.id(), "activate_foundation")
        .args_json(json!({ "project_id": project_id }))
        .transact()
        .await?
        .into_result()?;

    donor
        .call(foundation.id(), "donate")
        .args_json(json!({
            "project_id": project_id,
            "currency": coin.id(),
            "amount": U64(200),
        }))
        .transact()
        .await?
        .into_result()?;

    // Goal reached closed the project already; grant the admin an
    // allowance against the now-closed remains.
    admin
        .call(foundation.id(), "set_allowance")
        .args_json(json!({
            "project_id": project_id,
            "user_id": admin.id(),
            "amount": U64(150),
        }))
        .transact()
        .await?
        .into_result()?;

    let remaining: U64 = admin
        .call(foundation.id(), "withdraw")
        .args_json(json!({
            "project_id": project_id,
            "recipient": carol.id(),
            "amount": U64(150),
            "note": "materials",
        }))
        .transact()
        .await?
        .into_result()?
        .json()?;
    assert_eq!(remaining.0, 50);

    let carol_balance = common::balance_of(&coin, "User", carol.id().as_str()).await?;
    assert_eq!(carol_balance.0, 150);

    let project: Value = foundation
        .view("get_foundation")
        .args_json(json!({ "project_id": project_id }))
        .await?
        .json()?;
    assert_eq!(project["remains_amount"], 50);
    assert_eq!(project["withdrawals"].as_array().unwrap().len(), 1);

    // The admin's own allowance was drawn down, not carol's (she never had any).
    assert_eq!(project["allowance"][admin.id().to_string()], 0);

    Ok(())
}
