mod common;

use near_sdk::json_types::U64;
use serde_json::{Value, json};

#[tokio::test]
async fn donation_reaching_the_goal_auto_closes_the_project() -> anyhow::Result<()> {
    let worker = common::sandbox().await?;
    let minter = common::create_account(&worker, "minter").await?;
    let admin = common::create_account(&worker, "admin").await?;
    let donor = common::create_account(&worker, "donor").await?;
    let coin = common::deploy_coin(&worker, &minter, "USD").await?;
    let foundation = common::deploy_foundation(&worker).await?;

    common::mint(&coin, &minter, 100).await?;
    minter
        .call(coin.id(), "transfer")
        .args_json(json!({
            "receiver_type": "User",
            "receiver_id": donor.id(),
            "amount": U64(100),
            "expirable": false,
        }))
        .transact()
        .await?
        .into_result()?;

    let project_id: String = admin
        .call(foundation.id(), "create_foundation")
        .args_json(json!({ "request": {
            "name": "Clean Water",
            "category": "charity",
            "description": "a well",
            "image": null,
            "admin_id": admin.id(),
            "funding_goal": U64(100),
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
            "amount": U64(100),
        }))
        .transact()
        .await?
        .into_result()?;

    let project: Value = foundation
        .view("get_foundation")
        .args_json(json!({ "project_id": project_id }))
        .await?
        .json()?;

    assert_eq!(project["status"], "Closed");
    assert_eq!(project["collected_amount"], 100);
    assert_eq!(project["remains_amount"], 100);
    assert_eq!(project["donations"].as_array().unwrap().len(), 1);

    let foundation_balance =
        common::balance_of(&coin, "Foundation", &project_id).await?;
    assert_eq!(foundation_balance.0, 100);

    Ok(())
}
