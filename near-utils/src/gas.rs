use near_sdk::{Gas, env};

/// Gas remaining in the current call after subtracting what's already been
/// burned, used to size the gas attached to outgoing cross-contract calls.
#[must_use]
#[inline]
pub fn gas_left() -> Gas {
    env::prepaid_gas().saturating_sub(env::used_gas())
}
