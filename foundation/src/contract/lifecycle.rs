use crowdfund_near_utils::PREDECESSOR_ACCOUNT_ID;
use near_sdk::{FunctionError, log, near, require};

use crate::{error::FoundationError, project::ProjectStatus};

use super::Contract;

#[near]
impl Contract {
    /// `SubmitForReview(project_id)`. Creator-only: moves a freshly created
    /// project out of `DRAFT`, the last point at which `update_foundation`
    /// may still edit it, and into `REVIEW`.
    pub fn submit_for_review(&mut self, project_id: String) {
        let caller = PREDECESSOR_ACCOUNT_ID.to_string();
        let project = self.project_mut_or_panic(&project_id);
        require!(
            caller == project.creator_id || caller == project.admin_id,
            FoundationError::NoPermissions.to_string()
        );
        require!(
            matches!(project.status, ProjectStatus::Draft),
            FoundationError::NotDraftForReview.to_string()
        );

        project.status = ProjectStatus::Review;
        log!("project {project_id} submitted for review");
    }

    /// `ActivateFoundation(project_id)`. Admin-only: the review decision
    /// that opens a project to `donate()`. Only a project in `REVIEW` can be
    /// activated, so a project can't skip straight from `DRAFT` to
    /// accepting funds.
    pub fn activate_foundation(&mut self, project_id: String) {
        let caller = PREDECESSOR_ACCOUNT_ID.to_string();
        let project = self.project_mut_or_panic(&project_id);
        require!(caller == project.admin_id, FoundationError::NoPermissions.to_string());
        require!(
            matches!(project.status, ProjectStatus::Review),
            FoundationError::NotInReview.to_string()
        );

        project.status = ProjectStatus::Active;
        log!("activated project {project_id}");
    }

    /// `RejectFoundation(project_id)`. Admin-only, and terminal: a rejected
    /// project never becomes donatable. Unlike `close_foundation`, this
    /// never ran a cross-contract refund leg, since a project in `REVIEW`
    /// cannot yet have collected any donations.
    pub fn reject_foundation(&mut self, project_id: String) {
        let caller = PREDECESSOR_ACCOUNT_ID.to_string();
        let project = self.project_mut_or_panic(&project_id);
        require!(caller == project.admin_id, FoundationError::NoPermissions.to_string());
        require!(
            matches!(project.status, ProjectStatus::Review),
            FoundationError::NotInReview.to_string()
        );

        project.status = ProjectStatus::Rejected;
        log!("rejected project {project_id}");
    }
}
