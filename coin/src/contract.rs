use std::collections::VecDeque;

use crowdfund_accounts::{AccountKey, AccountKind};
use crowdfund_near_utils::{PREDECESSOR_ACCOUNT_ID, now_seconds};
use near_sdk::{
    AccountId, BorshStorageKey, FunctionError, PanicOnDefault,
    borsh::BorshSerialize,
    env, log,
    json_types::U64,
    near, require,
    store::IterableMap,
};

use crate::{error::CoinError, expirable, expirable::Deposit};

/// Matches the source's fixed 3600-second expiry window. Kept as state
/// rather than a constant so the contract's own data model documents it,
/// even though no setter is exposed (reassigning it is out of scope).
const DEFAULT_EXPIRATION_PERIOD_SECONDS: u64 = 3600;

#[derive(BorshSerialize, BorshStorageKey)]
#[borsh(crate = "::near_sdk::borsh")]
enum Prefix {
    PermanentBalances,
    ExpirableBalances,
    ExpirableDeposits,
}

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct Contract {
    currency_name: String,
    minter: AccountId,
    expiration_period: u64,
    permanent_balances: IterableMap<AccountKey, u64>,
    expirable_balances: IterableMap<AccountKey, u64>,
    expirable_deposits: IterableMap<AccountKey, VecDeque<Deposit>>,
}

#[near(serializers = [json])]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBalance {
    pub user_id: String,
    pub balance: U64,
}

#[near(serializers = [json])]
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub user_id: String,
    pub amount: U64,
}

#[near]
impl Contract {
    /// `InitLedger(minter_id, currency_name)`. Exactly these two
    /// arguments: `near-sdk`'s JSON argument binding already enforces
    /// that. Re-initialization is rejected outright by `#[init]` +
    /// `PanicOnDefault` rather than silently skipped — a stronger
    /// reading of "idempotent: must not overwrite an existing balances
    /// map" than the source's check, but one that preserves the same
    /// guarantee: an existing ledger is never overwritten.
    #[init]
    pub fn new(minter_id: AccountId, currency_name: String) -> Self {
        Self {
            currency_name,
            minter: minter_id,
            expiration_period: DEFAULT_EXPIRATION_PERIOD_SECONDS,
            permanent_balances: IterableMap::new(Prefix::PermanentBalances),
            expirable_balances: IterableMap::new(Prefix::ExpirableBalances),
            expirable_deposits: IterableMap::new(Prefix::ExpirableDeposits),
        }
    }

    pub fn currency_name(&self) -> String {
        self.currency_name.clone()
    }

    pub fn minter(&self) -> AccountId {
        self.minter.clone()
    }

    fn require_minter(&self) {
        if *PREDECESSOR_ACCOUNT_ID != self.minter {
            CoinError::NoPermissions.panic();
        }
    }

    /// `Mint(amount)`. Authorized: caller == minter.
    pub fn mint(&mut self, amount: U64) -> U64 {
        self.require_minter();
        let amount = amount.0;
        require!(amount > 0, CoinError::IncorrectAmount.to_string());

        let key = AccountKey::user(self.minter.to_string());
        let balance = self.permanent_balances.entry(key.clone()).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .unwrap_or_else(|| CoinError::InvariantViolated.panic());
        log!("minted {amount} {} to {}", self.currency_name, self.minter);
        U64(*balance)
    }

    /// `Transfer(receiver_type, receiver_id, amount, expirable) -> caller's
    /// balance`. Debits the caller's expirable deposits oldest-first, then
    /// the permanent balance, for any shortfall. Credits the receiver's
    /// expirable queue (if `expirable`) or permanent balance.
    pub fn transfer(
        &mut self,
        receiver_type: AccountKind,
        receiver_id: String,
        amount: U64,
        expirable: bool,
    ) -> U64 {
        let caller = AccountKey::user(PREDECESSOR_ACCOUNT_ID.to_string());
        let receiver = AccountKey::new(receiver_type, receiver_id);
        let result = self.internal_transfer(&caller, &receiver, amount.0, expirable);
        log!("transfer {} {} from {caller} to {receiver} (expirable={expirable})", amount.0, self.currency_name);
        result
    }

    /// `BatchTransfer(requests)`. Atomic, permanent-balance-only on the
    /// debit side (the expirable layer is deliberately not touched here —
    /// see `SPEC_FULL.md` §9, kept as a documented divergence from
    /// `Transfer` rather than "fixed").
    pub fn batch_transfer(&mut self, requests: Vec<TransferRequest>) -> U64 {
        let caller = AccountKey::user(PREDECESSOR_ACCOUNT_ID.to_string());
        let total: u64 = requests.iter().try_fold(0u64, |acc, r| acc.checked_add(r.amount.0))
            .unwrap_or_else(|| CoinError::InvariantViolated.panic());

        let caller_balance = self.permanent_balances.entry(caller.clone()).or_insert(0);
        if *caller_balance < total {
            CoinError::NotEnoughCoins.panic();
        }
        *caller_balance -= total;
        let caller_balance = *caller_balance;

        for request in &requests {
            let receiver = AccountKey::user(request.user_id.clone());
            let balance = self.permanent_balances.entry(receiver).or_insert(0);
            *balance = balance
                .checked_add(request.amount.0)
                .unwrap_or_else(|| CoinError::InvariantViolated.panic());
        }

        log!("batch_transfer {total} {} from {caller} to {} recipients", self.currency_name, requests.len());
        U64(caller_balance)
    }

    /// `TransferFrom(from, to, amount)`. No caller authorization check:
    /// this entrypoint exists for trusted cross-contract callers on the
    /// same channel (the `foundation` contract uses it for donations,
    /// refunds, and withdrawals), permanent balances only.
    pub fn transfer_from(
        &mut self,
        from_type: AccountKind,
        from_id: String,
        to_type: AccountKind,
        to_id: String,
        amount: U64,
    ) {
        let from = AccountKey::new(from_type, from_id);
        let to = AccountKey::new(to_type, to_id);
        self.internal_transfer_permanent(&from, &to, amount.0);
        log!("transfer_from {} {} from {from} to {to}", amount.0, self.currency_name);
    }

    /// `Refund(project_id, receiver_user_id, amount)`. Authorized: caller
    /// == minter. Permanent-only, project_ -> user_.
    pub fn refund(&mut self, project_id: String, receiver_user_id: String, amount: U64) -> U64 {
        self.require_minter();
        require!(amount.0 > 0, CoinError::IncorrectAmount.to_string());
        let from = AccountKey::project(project_id);
        let to = AccountKey::user(receiver_user_id);
        let result = self.internal_transfer_permanent(&from, &to, amount.0);
        log!("refund {} {} from {from} to {to}", amount.0, self.currency_name);
        result
    }

    /// `BatchRefund(project_id, requests)`. Authorized: caller == minter.
    /// Requires the requested total to exactly drain the project's
    /// permanent balance.
    pub fn batch_refund(&mut self, project_id: String, requests: Vec<TransferRequest>) -> U64 {
        self.require_minter();
        let project = AccountKey::project(project_id);
        let total: u64 = requests
            .iter()
            .try_fold(0u64, |acc, r| acc.checked_add(r.amount.0))
            .unwrap_or_else(|| CoinError::InvariantViolated.panic());

        let project_balance = *self.permanent_balances.get(&project).unwrap_or(&0);
        if total != project_balance {
            CoinError::BatchRefundIncomplete.panic();
        }

        for request in &requests {
            let to = AccountKey::user(request.user_id.clone());
            self.internal_transfer_permanent(&project, &to, request.amount.0);
        }

        log!("batch_refund {total} {} drained project {project}", self.currency_name);
        U64(*self.permanent_balances.get(&project).unwrap_or(&0))
    }

    /// `BalanceOf(account_type, account_id)`. A `view` call: the lazy
    /// expiry sweep here computes the unexpired total but cannot persist
    /// the trimmed queue back to storage (NEAR forbids state writes from
    /// view methods). The next mutating call that touches this account
    /// performs and commits the real sweep.
    pub fn balance_of(&self, account_type: AccountKind, account_id: String) -> UserBalance {
        let key = AccountKey::new(account_type, account_id);
        UserBalance {
            user_id: key.to_string(),
            balance: U64(self.total_balance_unswept(&key)),
        }
    }

    pub fn batch_balance_of(&self, accounts: Vec<(AccountKind, String)>) -> Vec<UserBalance> {
        accounts
            .into_iter()
            .map(|(kind, id)| self.balance_of(kind, id))
            .collect()
    }

    /// `AllBalances`. Iterates the permanent-balance map; entries are
    /// sorted by composite-key string so that the read set is identical
    /// across replays, matching the determinism rule for any iteration
    /// that could drive downstream decisions.
    pub fn all_balances(&self) -> Vec<UserBalance> {
        let mut keys: Vec<&AccountKey> = self.permanent_balances.iter().map(|(k, _)| k).collect();
        keys.sort_by_key(|key| key.to_string());
        keys.into_iter()
            .map(|key| UserBalance {
                user_id: key.to_string(),
                balance: U64(self.total_balance_unswept(key)),
            })
            .collect()
    }
}

impl Contract {
    fn total_balance_unswept(&self, account: &AccountKey) -> u64 {
        let permanent = *self.permanent_balances.get(account).unwrap_or(&0);
        let expirable_balance = *self.expirable_balances.get(account).unwrap_or(&0);
        let now = now_seconds();
        let expired: u64 = self
            .expirable_deposits
            .get(account)
            .into_iter()
            .flatten()
            .take_while(|d| d.created_at + self.expiration_period < now)
            .map(|d| d.amount)
            .sum();
        permanent + expirable_balance.saturating_sub(expired)
    }

    fn internal_transfer(
        &mut self,
        from: &AccountKey,
        to: &AccountKey,
        amount: u64,
        credit_expirable: bool,
    ) -> U64 {
        require!(amount > 0, CoinError::IncorrectAmount.to_string());

        let now = now_seconds();
        let expiration_period = self.expiration_period;

        let deposits = self.expirable_deposits.entry(from.clone()).or_insert_with(VecDeque::new);
        let expirable_balance = self.expirable_balances.entry(from.clone()).or_insert(0);
        expirable::sweep_expired(deposits, expirable_balance, now, expiration_period)
            .unwrap_or_else(|e| e.panic());

        let permanent_balance = self.permanent_balances.entry(from.clone()).or_insert(0);
        expirable::debit(deposits, expirable_balance, permanent_balance, amount)
            .unwrap_or_else(|e| e.panic());
        let from_balance_after = *permanent_balance + *expirable_balance;

        if credit_expirable {
            let tx_id = env::random_seed()
                .iter()
                .take(8)
                .map(|b| format!("{b:02x}"))
                .collect::<String>();
            let to_deposits = self
                .expirable_deposits
                .entry(to.clone())
                .or_insert_with(VecDeque::new);
            to_deposits.push_back(Deposit::new(tx_id, amount, now));
            let to_expirable_balance = self.expirable_balances.entry(to.clone()).or_insert(0);
            *to_expirable_balance = to_expirable_balance
                .checked_add(amount)
                .unwrap_or_else(|| CoinError::InvariantViolated.panic());
        } else {
            let to_permanent = self.permanent_balances.entry(to.clone()).or_insert(0);
            *to_permanent = to_permanent
                .checked_add(amount)
                .unwrap_or_else(|| CoinError::InvariantViolated.panic());
        }

        U64(from_balance_after)
    }

    fn internal_transfer_permanent(&mut self, from: &AccountKey, to: &AccountKey, amount: u64) -> U64 {
        require!(amount > 0, CoinError::IncorrectAmount.to_string());
        let from_balance = self.permanent_balances.entry(from.clone()).or_insert(0);
        if *from_balance < amount {
            CoinError::NotEnoughCoins.panic();
        }
        *from_balance -= amount;
        let from_balance_after = *from_balance;

        let to_balance = self.permanent_balances.entry(to.clone()).or_insert(0);
        *to_balance = to_balance
            .checked_add(amount)
            .unwrap_or_else(|| CoinError::InvariantViolated.panic());

        U64(from_balance_after)
    }
}
