//! The FIFO expirable-deposit engine.
//!
//! An account's expirable balance is backed by an ordered queue of
//! [`Deposit`]s, oldest first. Spending always drains the queue front to
//! back before touching the permanent balance, so a coin close to expiry
//! is spent before a fresh or permanent one — the intent of a
//! promotion/reward wallet.
//!
//! The reference implementation this is ported from corrupts the queue
//! when a single debit consumes more than one deposit, because it reuses
//! the loop counter as an index into the shrinking slice it's removing
//! from. `debit` below never indexes by position — it only ever looks at
//! the front of the queue — so that class of bug cannot occur here.

use std::collections::VecDeque;

use near_sdk::near;

use crate::error::CoinError;

#[near(serializers = [borsh, json])]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deposit {
    pub tx_id: String,
    pub amount: u64,
    pub created_at: u64,
}

impl Deposit {
    #[must_use]
    pub const fn new(tx_id: String, amount: u64, created_at: u64) -> Self {
        Self {
            tx_id,
            amount,
            created_at,
        }
    }

    /// `created_at + expiration_period < now` — strictly less than, so a
    /// deposit reaching exactly its expiration instant is not yet expired.
    #[must_use]
    fn has_expired(&self, now: u64, expiration_period: u64) -> bool {
        self.created_at + expiration_period < now
    }
}

/// Removes every expired prefix entry from `deposits`, decrementing
/// `balance` by the sum removed. Stops at the first non-expired deposit:
/// the ordering invariant (deposits sorted by `created_at` ascending)
/// guarantees everything after it is also unexpired.
///
/// Returns an error if the balance would go negative, which signals that
/// the `balance == sum(deposits)` invariant was already broken before this
/// call — a corruption, not a user-facing condition.
pub fn sweep_expired(
    deposits: &mut VecDeque<Deposit>,
    balance: &mut u64,
    now: u64,
    expiration_period: u64,
) -> Result<(), CoinError> {
    while deposits
        .front()
        .is_some_and(|d| d.has_expired(now, expiration_period))
    {
        let expired = deposits.pop_front().unwrap_or_else(|| unreachable!());
        *balance = balance
            .checked_sub(expired.amount)
            .ok_or(CoinError::InvariantViolated)?;
    }
    Ok(())
}

/// Debits `amount` from an account's total balance (expirable + permanent),
/// spending oldest expirable deposits first. `expirable_balance` and
/// `permanent_balance` are updated in place; `deposits` is trimmed to its
/// surviving suffix.
///
/// Callers must run [`sweep_expired`] first so the queue and
/// `expirable_balance` reflect only live deposits before this is applied.
pub fn debit(
    deposits: &mut VecDeque<Deposit>,
    expirable_balance: &mut u64,
    permanent_balance: &mut u64,
    amount: u64,
) -> Result<(), CoinError> {
    let total = expirable_balance
        .checked_add(*permanent_balance)
        .ok_or(CoinError::InvariantViolated)?;
    if total < amount {
        return Err(CoinError::NotEnoughCoins);
    }

    let mut remaining = amount;
    let mut consumed_from_expirable: u64 = 0;
    while remaining > 0 {
        let Some(front) = deposits.front_mut() else {
            break;
        };
        if front.amount <= remaining {
            remaining -= front.amount;
            consumed_from_expirable += front.amount;
            deposits.pop_front();
        } else {
            front.amount -= remaining;
            consumed_from_expirable += remaining;
            remaining = 0;
        }
    }

    *expirable_balance = expirable_balance
        .checked_sub(consumed_from_expirable)
        .ok_or(CoinError::InvariantViolated)?;
    if remaining > 0 {
        *permanent_balance = permanent_balance
            .checked_sub(remaining)
            .ok_or(CoinError::InvariantViolated)?;
    }
    Ok(())
}
