//! Composite account-key scheme shared between the `coin` and `foundation`
//! contracts.
//!
//! Every balance the system tracks belongs to one of three namespaces —
//! a real user, a foundation's own treasury, or a single project's escrow —
//! flattened into a single key the way a composite key works on a
//! key-value ledger: `kind || sep || id || sep`. The pair is always
//! reversible back into its two parts.

use near_sdk::{
    borsh::{BorshDeserialize, BorshSerialize},
    near,
};

/// Matches the `"user_" | "foundation_" | "project_"` namespace prefixes.
#[near(serializers = [borsh, json])]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccountKind {
    User,
    Foundation,
    Project,
}

impl AccountKind {
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::User => "user_",
            Self::Foundation => "foundation_",
            Self::Project => "project_",
        }
    }
}

/// The `(account_type, id)` pair. `id` is an opaque string: a NEAR account
/// id for `User`/`Foundation` accounts, a project UUID for `Project`
/// accounts.
#[near(serializers = [borsh, json])]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountKey {
    pub kind: AccountKind,
    pub id: String,
}

impl AccountKey {
    #[must_use]
    pub fn new(kind: AccountKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    #[must_use]
    #[inline]
    pub fn user(id: impl Into<String>) -> Self {
        Self::new(AccountKind::User, id)
    }

    #[must_use]
    #[inline]
    pub fn foundation(id: impl Into<String>) -> Self {
        Self::new(AccountKind::Foundation, id)
    }

    #[must_use]
    #[inline]
    pub fn project(id: impl Into<String>) -> Self {
        Self::new(AccountKind::Project, id)
    }

    /// Separator matching the one-byte `MinUnicodeRuneValue` scheme used by
    /// composite keys on the reference ledger: a byte that can never appear
    /// in an account id or project UUID.
    const SEP: char = '\u{0}';

    /// Flattens the pair into the single string a composite-key-based
    /// ledger would store it under. Not used as the actual NEAR storage
    /// key (Borsh encoding is used for that — see [`AccountKey`]'s
    /// `BorshSerialize` impl) but kept for parity with spec's composite-key
    /// contract and for human-readable logging.
    #[must_use]
    pub fn flatten(&self) -> String {
        format!("{}{}{}{}", self.kind.prefix(), Self::SEP, self.id, Self::SEP)
    }

    /// The reverse of [`Self::flatten`].
    #[must_use]
    pub fn split(flattened: &str) -> Option<Self> {
        let body = flattened
            .strip_suffix(Self::SEP)
            .unwrap_or(flattened);
        let (prefix, id) = body.split_once(Self::SEP)?;
        let kind = match prefix {
            "user_" => AccountKind::User,
            "foundation_" => AccountKind::Foundation,
            "project_" => AccountKind::Project,
            _ => return None,
        };
        Some(Self::new(kind, id))
    }
}

impl core::fmt::Display for AccountKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.id)
    }
}
