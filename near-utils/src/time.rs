use near_sdk::env;

/// The only callsite in the workspace that reads the host clock. Every
/// other module receives "now" as a value derived from here — never from
/// wall-clock time — so that replaying a transaction on any node yields
/// identical results.
#[must_use]
pub fn now_nanos() -> u64 {
    env::block_timestamp()
}

/// `now_nanos()` truncated to whole seconds, matching the `int64` seconds
/// timestamps the data model uses for deposit/expiry bookkeeping.
#[must_use]
pub fn now_seconds() -> u64 {
    now_nanos() / 1_000_000_000
}
