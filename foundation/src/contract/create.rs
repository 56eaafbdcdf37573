use crowdfund_near_utils::{PREDECESSOR_ACCOUNT_ID, now_seconds};
use near_sdk::{FunctionError, json_types::U64, log, near, require};

use crate::{
    error::FoundationError,
    project::{Project, ProjectStatus},
};

use super::Contract;

#[near(serializers = [json])]
#[derive(Debug, Clone)]
pub struct CreateFoundationRequest {
    pub name: String,
    pub category: String,
    pub description: String,
    pub image: Option<String>,
    pub admin_id: String,
    pub funding_goal: U64,
    pub main_currency: String,
    pub accept_currencies: Vec<String>,
    pub deadline: U64,
    pub close_on_goal_reached: bool,
    pub withdrawal_allowed: bool,
}

#[near(serializers = [json])]
#[derive(Debug, Clone)]
pub struct UpdateFoundationRequest {
    pub name: String,
    pub category: String,
    pub description: String,
    pub image: Option<String>,
    pub funding_goal: U64,
    pub deadline: U64,
    pub close_on_goal_reached: bool,
}

#[near]
impl Contract {
    /// `CreateFoundation(json)`. The creator is read from
    /// `predecessor_account_id` (the NEAR-native caller identity); the
    /// admin is whoever the request names, matching the source's
    /// `CreatorId`/`AdminID` split. Initial allowance seeds `{creator:
    /// funding_goal}`, per the distilled spec (the source this was ported
    /// from does not seed an initial allowance at all).
    pub fn create_foundation(&mut self, request: CreateFoundationRequest) -> String {
        require!(request.funding_goal.0 > 0, FoundationError::IncorrectAmount.to_string());
        require!(
            !request.accept_currencies.is_empty(),
                FoundationError::UnsupportedCurrency(request.main_currency.clone()).to_string()
        );

        let creator_id = PREDECESSOR_ACCOUNT_ID.to_string();
        let id = self.fresh_project_id();
        let mut allowance = std::collections::BTreeMap::new();
        allowance.insert(creator_id.clone(), request.funding_goal.0);

        let project = Project {
            id: id.clone(),
            name: request.name,
            category: request.category,
            description: request.description,
            image: request.image,
            funding_goal: request.funding_goal.0,
            collected_amount: 0,
            remains_amount: 0,
            main_currency: request.main_currency,
            accept_currencies: request.accept_currencies,
            deadline: request.deadline.0,
            created_at: now_seconds(),
            status: ProjectStatus::Draft,
            creator_id,
            admin_id: request.admin_id,
            close_on_goal_reached: request.close_on_goal_reached,
            withdrawal_allowed: request.withdrawal_allowed,
            funding_goal_reached: false,
            is_contract_closed: false,
            is_donation_returned: false,
            donations: Vec::new(),
            donations_total: std::collections::BTreeMap::new(),
            withdrawals: Vec::new(),
            allowance,
        };

        log!("created foundation {id} for {}", project.creator_id);
        self.projects.insert(id.clone(), project);
        id
    }

    /// `UpdateFoundation(json)`. Allowed only while `status == DRAFT`. The
    /// source has no such operation at all; authorization (not specified
    /// anywhere) is the project's own creator or admin, the only two
    /// principals with any standing over a project before it leaves draft.
    pub fn update_foundation(&mut self, project_id: String, request: UpdateFoundationRequest) {
        let caller = PREDECESSOR_ACCOUNT_ID.to_string();
        let project = self.project_mut_or_panic(&project_id);
        require!(
            caller == project.creator_id || caller == project.admin_id,
            FoundationError::NoPermissions.to_string()
        );
        require!(
            matches!(project.status, ProjectStatus::Draft),
            FoundationError::NotDraft.to_string()
        );

        project.name = request.name;
        project.category = request.category;
        project.description = request.description;
        project.image = request.image;
        project.funding_goal = request.funding_goal.0;
        project.deadline = request.deadline.0;
        project.close_on_goal_reached = request.close_on_goal_reached;
    }
}
