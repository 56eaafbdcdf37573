use crowdfund_accounts::AccountKind;
use crowdfund_near_utils::{CURRENT_ACCOUNT_ID, PREDECESSOR_ACCOUNT_ID, now_seconds};
use near_sdk::{
    AccountId, FunctionError, Promise, PromiseResult, env, json_types::U64, log, near, require,
};

use crate::{
    error::FoundationError,
    ext::ext_coin,
    project::{Donation, ProjectStatus},
};

use super::{CALLBACK_GAS, CROSS_CONTRACT_GAS, Contract};

#[near]
impl Contract {
    /// `Donate({project_id, currency, amount})`. The source has the Coin
    /// contract read the *donor's* identity off the same transaction via
    /// `InvokeChaincode`, because Fabric propagates the originating
    /// transaction creator down through chaincode-to-chaincode calls. NEAR
    /// has no equivalent: a `Promise` only exposes the *immediate* caller
    /// (this contract) to the callee. So the donor id is captured here,
    /// before the cross-contract call, and threaded explicitly into
    /// `transfer_from` and the resolving callback instead.
    #[must_use]
    pub fn donate(&mut self, project_id: String, currency: String, amount: U64) -> Promise {
        let donor_id = PREDECESSOR_ACCOUNT_ID.to_string();
        let project = self.project_or_panic(&project_id);

        require!(!project.is_contract_closed, FoundationError::AlreadyClosed.to_string());
        require!(
            project.status == ProjectStatus::Active,
            FoundationError::NotActive.to_string()
        );
        require!(
            project.accepts(&currency),
            FoundationError::UnsupportedCurrency(currency.clone()).to_string()
        );
        require!(amount.0 > 0, FoundationError::IncorrectAmount.to_string());

        let coin: AccountId = currency
            .parse()
            .unwrap_or_else(|_| env::panic_str(&FoundationError::UnsupportedCurrency(currency.clone()).to_string()));

        ext_coin::ext(coin)
            .with_static_gas(CROSS_CONTRACT_GAS)
            .with_unused_gas_weight(0)
            .transfer_from(
                AccountKind::User,
                donor_id.clone(),
                AccountKind::Foundation,
                project_id.clone(),
                amount,
            )
            .then(
                Self::ext(CURRENT_ACCOUNT_ID.clone())
                    .with_static_gas(CALLBACK_GAS)
                    .donate_callback(project_id, donor_id, currency, amount),
            )
    }

    /// Commits the donation only once `transfer_from` has actually
    /// succeeded; a failed cross-contract leg means nothing here gets
    /// written, so no donation is recorded for coins that never moved.
    /// NEAR's `PromiseResult::Failed` carries no message, unlike Fabric's
    /// response object, so the failure here is reported generically rather
    /// than with the callee's original text.
    #[private]
    pub fn donate_callback(
        &mut self,
        project_id: String,
        donor_id: String,
        currency: String,
        amount: U64,
    ) -> U64 {
        match env::promise_result(0) {
            PromiseResult::Successful(_) => {}
            PromiseResult::Failed => FoundationError::CrossContractCallFailed.panic(),
        }

        let now = now_seconds();
        let project = self.project_mut_or_panic(&project_id);

        project.donations.push(Donation {
            user_id: donor_id.clone(),
            user_account_type: AccountKind::User.prefix().to_string(),
            currency: currency.clone(),
            amount,
            created_at: U64(now),
        });

        log!("donation {} {currency} from {donor_id} to project {project_id}", amount.0);

        let total = project
            .donations_total
            .entry(crate::project::DonorKey::new(currency, donor_id).flatten())
            .or_insert(0);
        *total = total.checked_add(amount.0).unwrap_or_else(|| env::panic_str("overflow"));
        project.collected_amount = project
            .collected_amount
            .checked_add(amount.0)
            .unwrap_or_else(|| env::panic_str("overflow"));

        project.check_goal_reached(now);

        U64(project.collected_amount)
    }
}
