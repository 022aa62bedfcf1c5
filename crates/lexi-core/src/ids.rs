//! Tenant identity and token constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of random bytes behind a callback token (rendered as lowercase hex).
pub const TOKEN_BYTES: usize = 16;

/// Length of a rendered callback token.
pub const TOKEN_LEN: usize = TOKEN_BYTES * 2;

/// An isolated learner scope, one chat identity.
///
/// Words, learning batch, and pending callbacks are all keyed by tenant.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TenantId(pub i64);

impl TenantId {
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for TenantId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for TenantId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check that a string looks like a token minted by the callback store.
#[must_use]
pub fn is_well_formed_token(token: &str) -> bool {
    token.len() == TOKEN_LEN
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
