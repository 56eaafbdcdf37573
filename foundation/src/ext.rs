//! Cross-contract wire shape for the Coin contract a project's currencies
//! name. Mirrors `crowdfund_coin::Contract`'s public `transfer`/
//! `transfer_from` signatures exactly — this is the contract boundary, so
//! the two crates are never linked together; this trait is the only thing
//! that couples them.

use crowdfund_accounts::AccountKind;
use near_sdk::{ext_contract, json_types::U64};

#[ext_contract(ext_coin)]
pub trait CoinCrossContract {
    fn transfer(
        &mut self,
        receiver_type: AccountKind,
        receiver_id: String,
        amount: U64,
        expirable: bool,
    ) -> U64;

    fn transfer_from(
        &mut self,
        from_type: AccountKind,
        from_id: String,
        to_type: AccountKind,
        to_id: String,
        amount: U64,
    );
}
