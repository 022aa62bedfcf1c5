//! Inbound action payloads.
//!
//! A quiz prompt carries one button per [`Outcome`]; each button's payload is
//! `"<outcome>:<token>"`, short enough for a 64-byte callback data limit.

use std::fmt;
use std::str::FromStr;

use crate::enums::Outcome;
use crate::errors::CoreError;
use crate::ids::is_well_formed_token;

/// Upper bound on an encoded payload, imposed by chat transports.
pub const MAX_PAYLOAD_LEN: usize = 64;

/// A decoded learner action referencing a correlation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundAction {
    pub outcome: Outcome,
    pub token: String,
}

impl InboundAction {
    #[must_use]
    pub fn new(outcome: Outcome, token: impl Into<String>) -> Self {
        Self {
            outcome,
            token: token.into(),
        }
    }

    /// Encoded payload for every possible answer to one prompt.
    #[must_use]
    pub fn buttons(token: &str) -> Vec<(Outcome, String)> {
        Outcome::ALL
            .into_iter()
            .map(|outcome| (outcome, Self::new(outcome, token).to_string()))
            .collect()
    }
}

impl fmt::Display for InboundAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.outcome, self.token)
    }
}

impl FromStr for InboundAction {
    type Err = CoreError;

    fn from_str(payload: &str) -> Result<Self, Self::Err> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(CoreError::MalformedAction(format!(
                "payload is {} bytes, limit is {MAX_PAYLOAD_LEN}",
                payload.len()
            )));
        }
        let (outcome, token) = payload
            .split_once(':')
            .ok_or_else(|| CoreError::MalformedAction(format!("missing ':' in '{payload}'")))?;
        let outcome: Outcome = outcome.parse()?;
        if !is_well_formed_token(token) {
            return Err(CoreError::MalformedAction(format!(
                "token '{token}' is not a callback token"
            )));
        }
        Ok(Self::new(outcome, token))
    }
}
