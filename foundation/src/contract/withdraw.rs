use crowdfund_accounts::AccountKind;
use crowdfund_near_utils::{CURRENT_ACCOUNT_ID, PREDECESSOR_ACCOUNT_ID, now_seconds};
use near_sdk::{
    AccountId, FunctionError, Promise, PromiseResult, env, json_types::U64, log, near, require,
};

use crate::{error::FoundationError, ext::ext_coin, project::Withdrawal};

use super::{CALLBACK_GAS, CROSS_CONTRACT_GAS, Contract};

#[near]
impl Contract {
    /// `Withdraw({project_id, recipient, amount, note})`. Any account
    /// with enough standing allowance may withdraw, to any recipient — the
    /// source does not require the caller and recipient to match (S6
    /// withdraws to a third party, `carol`, on the admin's allowance).
    #[must_use]
    pub fn withdraw(
        &mut self,
        project_id: String,
        recipient: String,
        amount: U64,
        note: String,
    ) -> Promise {
        let caller = PREDECESSOR_ACCOUNT_ID.to_string();
        let project = self.project_or_panic(&project_id);

        let allowance = project.allowance.get(&caller).copied().unwrap_or(0);
        require!(
            project.withdrawal_allowed && allowance >= amount.0,
            FoundationError::WithdrawalNotAllowed.to_string()
        );
        require!(project.is_contract_closed, FoundationError::ContractNotClosed.to_string());
        require!(amount.0 <= project.remains_amount, FoundationError::NotEnoughFunds.to_string());

        let coin: AccountId = project
            .main_currency
            .parse()
            .unwrap_or_else(|_| env::panic_str("invalid currency account id"));

        ext_coin::ext(coin)
            .with_static_gas(CROSS_CONTRACT_GAS)
            .with_unused_gas_weight(0)
            .transfer_from(
                AccountKind::Foundation,
                project_id.clone(),
                AccountKind::User,
                recipient.clone(),
                amount,
            )
            .then(
                Self::ext(CURRENT_ACCOUNT_ID.clone())
                    .with_static_gas(CALLBACK_GAS)
                    .withdraw_callback(project_id, caller, recipient, amount, note),
            )
    }

    #[private]
    pub fn withdraw_callback(
        &mut self,
        project_id: String,
        caller: String,
        recipient: String,
        amount: U64,
        note: String,
    ) -> U64 {
        match env::promise_result(0) {
            PromiseResult::Successful(_) => {}
            PromiseResult::Failed => FoundationError::CrossContractCallFailed.panic(),
        }

        let now = now_seconds();
        let project = self.project_mut_or_panic(&project_id);

        project.remains_amount = project
            .remains_amount
            .checked_sub(amount.0)
            .unwrap_or_else(|| env::panic_str("invariant violated: remains_amount underflow"));

        let entry = project.allowance.entry(caller).or_insert(0);
        *entry = entry
            .checked_sub(amount.0)
            .unwrap_or_else(|| env::panic_str("invariant violated: allowance underflow"));

        project.withdrawals.push(Withdrawal {
            id: project.withdrawals.len() as u64 + 1,
            user_id: recipient.clone(),
            amount,
            created_at: U64(now),
            note,
        });

        log!("withdrew {} from project {project_id} to {recipient}", amount.0);
        U64(project.remains_amount)
    }
}
