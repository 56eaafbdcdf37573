//! The `Project` record and its nested donation/withdrawal ledgers.
//!
//! A `Project` is stored as the value of a top-level
//! `near_sdk::store::IterableMap`, so everything nested inside it —
//! donations, the per-currency donation totals, the allowance map — has to
//! be a plain Borsh-serializable value rather than its own persistent
//! collection. `BTreeMap` is used wherever the spec calls for a map that
//! drives a write during iteration (`donations_total`, `allowance`): its
//! iteration order is always the key's `Ord` order, so the lexicographic
//! iteration the refund loop needs falls out for free.

use std::collections::BTreeMap;

use near_sdk::{json_types::U64, near};

/// Storage representation of a project's lifecycle flag. Kept as a plain
/// enum (one value at a time, never OR'd together in storage); the bitmask
/// only exists at the `GetFoundations` filter boundary, where each
/// variant's [`ProjectStatus::bit`] is OR'd against a caller-supplied mask.
#[near(serializers = [borsh, json])]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Draft,
    Review,
    Active,
    Closed,
    Rejected,
}

impl ProjectStatus {
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::Draft => 1,
            Self::Review => 2,
            Self::Active => 4,
            Self::Closed => 8,
            Self::Rejected => 16,
        }
    }

    /// The default `GetFoundations` mask when the caller supplies none:
    /// `ACTIVE|CLOSED`.
    #[must_use]
    pub const fn default_mask() -> u8 {
        Self::Active.bit() | Self::Closed.bit()
    }
}

#[near(serializers = [borsh, json])]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donation {
    pub user_id: String,
    pub user_account_type: String,
    pub currency: String,
    pub amount: U64,
    pub created_at: U64,
}

#[near(serializers = [borsh, json])]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    pub id: u64,
    pub user_id: String,
    pub amount: U64,
    pub created_at: U64,
    pub note: String,
}

/// A `(currency, user account id)` pair, the key of `donations_total`.
/// `donations_total` is itself a plain `BTreeMap<String, u64>` rather than
/// `BTreeMap<DonorKey, u64>`: a JSON object's keys must be strings, and
/// `Project` is exposed through `json` view methods, so a struct key here
/// would fail to serialize. [`DonorKey::flatten`]/[`DonorKey::parse`] fold
/// the pair into one string the same way [`crowdfund_accounts::AccountKey`]
/// does, with the same one-byte separator that can't appear in either
/// half.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DonorKey {
    pub currency: String,
    pub user_id: String,
}

impl DonorKey {
    const SEP: char = '\u{0}';

    #[must_use]
    pub fn new(currency: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            user_id: user_id.into(),
        }
    }

    #[must_use]
    pub fn flatten(&self) -> String {
        format!("{}{}{}", self.currency, Self::SEP, self.user_id)
    }

    #[must_use]
    pub fn parse(flattened: &str) -> Option<Self> {
        let (currency, user_id) = flattened.split_once(Self::SEP)?;
        Some(Self::new(currency, user_id))
    }
}

#[near(serializers = [borsh, json])]
#[derive(Debug, Clone)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub image: Option<String>,
    pub funding_goal: u64,
    pub collected_amount: u64,
    pub remains_amount: u64,
    pub main_currency: String,
    pub accept_currencies: Vec<String>,
    pub deadline: u64,
    pub created_at: u64,
    pub status: ProjectStatus,
    pub creator_id: String,
    pub admin_id: String,
    pub close_on_goal_reached: bool,
    pub withdrawal_allowed: bool,
    pub funding_goal_reached: bool,
    pub is_contract_closed: bool,
    pub is_donation_returned: bool,
    pub donations: Vec<Donation>,
    pub donations_total: BTreeMap<String, u64>,
    pub withdrawals: Vec<Withdrawal>,
    pub allowance: BTreeMap<String, u64>,
}

impl Project {
    #[must_use]
    pub fn accepts(&self, currency: &str) -> bool {
        self.accept_currencies.iter().any(|c| c == currency)
    }

    /// `check_goal_reached`: sets `funding_goal_reached` once the collected
    /// total meets the goal, and auto-closes when `close_on_goal_reached`
    /// is set and either the goal was just reached or the deadline has
    /// strictly passed.
    pub fn check_goal_reached(&mut self, now: u64) {
        if self.collected_amount >= self.funding_goal {
            self.funding_goal_reached = true;
        }
        if self.close_on_goal_reached && (self.funding_goal_reached || now > self.deadline) {
            self.remains_amount = self.collected_amount;
            self.is_contract_closed = true;
            self.status = ProjectStatus::Closed;
        }
    }
}
