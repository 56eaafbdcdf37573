mod common;

use near_sdk::json_types::U64;
use serde_json::{Value, json};

/// A donation whose `transfer_from` leg fails (here, because the named
/// currency account has no Coin contract deployed on it at all) must leave
/// nothing committed on the Foundation side: no donation record, no change
/// to `collected_amount`. `donate_callback` only runs its writes after
/// confirming `PromiseResult::Successful`.
#[tokio::test]
async fn failed_transfer_leaves_no_donation_recorded() -> anyhow::Result<()> {
    let worker = common::sandbox().await?;
    let admin = common::create_account(&worker, "admin").await?;
    let donor = common::create_account(&worker, "donor").await?;
    let foundation = common::deploy_foundation(&worker).await?;

    let ghost_currency = format!("ghost.{}", worker.root_account()?.id());

    let project_id: String = admin
        .call(foundation.id(), "create_foundation")
        .args_json(json!({ "request": {
            "name": "Bridge Repair",
            "category": "infrastructure",
            "description": "a bridge",
            "image": null,
            "admin_id": admin.id(),
            "funding_goal": U64(100),
            "main_currency": ghost_currency,
            "accept_currencies": [ghost_currency],
            "deadline": U64(4_102_444_800),
            "close_on_goal_reached": false,
            "withdrawal_allowed": false,
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

    let outcome = donor
        .call(foundation.id(), "donate")
        .args_json(json!({
            "project_id": project_id,
            "currency": ghost_currency,
            "amount": U64(50),
        }))
        .transact()
        .await?;
    assert!(outcome.is_failure());

    let project: Value = foundation
        .view("get_foundation")
        .args_json(json!({ "project_id": project_id }))
        .await?
        .json()?;

    assert_eq!(project["collected_amount"], 0);
    assert_eq!(project["donations"].as_array().unwrap().len(), 0);

    Ok(())
}
