use crowdfund_accounts::AccountKind;
use crowdfund_near_utils::{CURRENT_ACCOUNT_ID, PREDECESSOR_ACCOUNT_ID, now_seconds};
use near_sdk::{
    AccountId, FunctionError, Promise, PromiseOrValue, PromiseResult, env, json_types::U64, log,
    near, require,
};

use crate::{error::FoundationError, ext::ext_coin, project::ProjectStatus};

use super::{CALLBACK_GAS, CROSS_CONTRACT_GAS, Contract};

#[near]
impl Contract {
    /// `CloseFoundation(project_id) -> remains_amount`. Authorized: caller
    /// == admin. If the goal was reached, closes immediately with no
    /// cross-contract call. Otherwise refunds every non-zero
    /// `donations_total` entry via `transfer_from` before closing.
    ///
    /// Fabric's single-transaction commit means a non-OK refund leg aborts
    /// *everything*, including legs that already reported OK, because
    /// nothing commits until the whole transaction does. NEAR has no such
    /// guarantee across already-resolved sibling promises: by the time the
    /// resolving callback below can see that leg N failed, legs 1..N-1 have
    /// already moved real balances on their Coin contracts. What this
    /// callback *can* still guarantee is that Foundation's own state
    /// (`is_donation_returned`, `is_contract_closed`) is only written when
    /// every leg succeeded — so a partial failure leaves the project open
    /// for the admin to retry, rather than silently recording a refund that
    /// didn't fully happen.
    #[must_use]
    pub fn close_foundation(&mut self, project_id: String) -> PromiseOrValue<U64> {
        let caller = PREDECESSOR_ACCOUNT_ID.to_string();
        let now = now_seconds();

        let legs: Vec<(String, String, u64)> = {
            let project = self.project_mut_or_panic(&project_id);
            require!(caller == project.admin_id, FoundationError::NoPermissions.to_string());
            project.check_goal_reached(now);
            require!(!project.is_contract_closed, FoundationError::AlreadyClosed.to_string());

            if project.funding_goal_reached {
                project.remains_amount = project.collected_amount;
                project.is_contract_closed = true;
                project.status = ProjectStatus::Closed;
                log!("closed project {project_id} (goal reached, remains={})", project.remains_amount);
                return PromiseOrValue::Value(U64(project.remains_amount));
            }

            project
                .donations_total
                .iter()
                .filter(|(_, amount)| **amount > 0)
                .filter_map(|(key, amount)| {
                    crate::project::DonorKey::parse(key).map(|key| (key.currency, key.user_id, *amount))
                })
                .collect()
        };

        if legs.is_empty() {
            let project = self.project_mut_or_panic(&project_id);
            project.is_donation_returned = true;
            project.is_contract_closed = true;
            project.status = ProjectStatus::Closed;
            log!("closed project {project_id} (no donations to refund)");
            return PromiseOrValue::Value(U64(project.remains_amount));
        }

        let mut joined: Option<Promise> = None;
        for (currency, user_id, amount) in &legs {
            let coin: AccountId = currency
                .parse()
                .unwrap_or_else(|_| env::panic_str("invalid currency account id"));
            let leg = ext_coin::ext(coin)
                .with_static_gas(CROSS_CONTRACT_GAS)
                .with_unused_gas_weight(0)
                .transfer_from(
                    AccountKind::Foundation,
                    project_id.clone(),
                    AccountKind::User,
                    user_id.clone(),
                    U64(*amount),
                );
            joined = Some(match joined {
                Some(acc) => acc.and(leg),
                None => leg,
            });
        }

        #[allow(clippy::unwrap_used)]
        let joined = joined.unwrap_or_else(|| unreachable!("legs is non-empty"));
        let legs_count = legs.len() as u64;

        PromiseOrValue::Promise(joined.then(
            Self::ext(CURRENT_ACCOUNT_ID.clone())
                .with_static_gas(CALLBACK_GAS)
                .close_refund_callback(project_id, legs_count),
        ))
    }

    #[private]
    pub fn close_refund_callback(&mut self, project_id: String, legs_count: u64) -> U64 {
        let results_count = env::promise_results_count();
        require!(results_count == legs_count, "unexpected promise result count");

        let all_refunded =
            (0..results_count).all(|i| matches!(env::promise_result(i), PromiseResult::Successful(_)));
        if !all_refunded {
            FoundationError::CrossContractCallFailed.panic();
        }

        let project = self.project_mut_or_panic(&project_id);
        project.is_donation_returned = true;
        project.is_contract_closed = true;
        project.status = ProjectStatus::Closed;
        log!("closed project {project_id} (refunded {legs_count} legs)");
        U64(project.remains_amount)
    }
}
