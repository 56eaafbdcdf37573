use crowdfund_near_utils::PREDECESSOR_ACCOUNT_ID;
use near_sdk::{FunctionError, json_types::U64, log, near, require};

use crate::error::FoundationError;

use super::Contract;

#[near]
impl Contract {
    /// `SetAllowance({project_id, user_id, amount})`. Authorized: caller
    /// == admin, and only while withdrawal is allowed at all. `amount ==
    /// 0` deletes the entry rather than storing a zero, matching the
    /// spec's "sets (or deletes, if amount == 0)" wording.
    pub fn set_allowance(&mut self, project_id: String, user_id: String, amount: U64) {
        let caller = PREDECESSOR_ACCOUNT_ID.to_string();
        let project = self.project_mut_or_panic(&project_id);
        require!(
            caller == project.admin_id && project.withdrawal_allowed,
            FoundationError::NoPermissions.to_string()
        );

        if amount.0 == 0 {
            project.allowance.remove(&user_id);
            log!("cleared allowance for {user_id} on project {project_id}");
        } else {
            project.allowance.insert(user_id.clone(), amount.0);
            log!("set allowance {} for {user_id} on project {project_id}", amount.0);
        }
    }
}
