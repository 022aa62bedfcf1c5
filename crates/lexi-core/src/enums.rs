//! Quiz outcomes, mastery stages, and word-pool selectors for Lexi.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for the representation used on the wire and in storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What the learner answered to a quiz prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The learner knew the translation.
    Correct,
    /// The learner did not know it.
    Incorrect,
    /// The learner asked to keep this word on the standing review list.
    #[serde(rename = "review")]
    FlagForReview,
}

impl Outcome {
    pub const ALL: [Self; 3] = [Self::Correct, Self::Incorrect, Self::FlagForReview];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::FlagForReview => "review",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| CoreError::MalformedAction(format!("unknown outcome '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// MasteryStage
// ---------------------------------------------------------------------------

/// Where a word sits in its learning lifecycle.
///
/// ```text
/// new ──(replenish)──> batched ──(streak reaches threshold)──> learned
///  ^                      │                                       │
///  └──────(incorrect)─────┴───────────────(incorrect)─────────────┘
/// ```
///
/// The review flag is orthogonal and can be set in any stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryStage {
    New,
    Batched,
    Learned,
}

impl MasteryStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Batched => "batched",
            Self::Learned => "learned",
        }
    }
}

impl fmt::Display for MasteryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// WordPool
// ---------------------------------------------------------------------------

/// Which subset of a tenant's words a random pick may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordPool {
    /// Only current learning-batch members.
    Batched,
    /// Only words outside the learning batch.
    NotBatched,
    /// Every word, regardless of batch membership.
    Any,
}

impl WordPool {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Batched => "batched",
            Self::NotBatched => "not_batched",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for WordPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StreakBound
// ---------------------------------------------------------------------------

/// Streak constraint applied together with a [`WordPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakBound {
    /// `streak < n`: words not yet mastered under threshold `n`.
    Below(u32),
    /// `streak >= n`: words mastered under threshold `n`.
    AtLeast(u32),
    /// No streak constraint.
    Unbounded,
}

impl StreakBound {
    #[must_use]
    pub const fn matches(self, streak: u32) -> bool {
        match self {
            Self::Below(n) => streak < n,
            Self::AtLeast(n) => streak >= n,
            Self::Unbounded => true,
        }
    }
}

/// Filter for a uniform random word pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFilter {
    pub pool: WordPool,
    pub streak: StreakBound,
}

impl WordFilter {
    /// Unmastered batch members.
    #[must_use]
    pub const fn batched_unmastered(threshold: u32) -> Self {
        Self {
            pool: WordPool::Batched,
            streak: StreakBound::Below(threshold),
        }
    }

    /// Unmastered words outside the batch, the replenishment pool.
    #[must_use]
    pub const fn replenish_pool(threshold: u32) -> Self {
        Self {
            pool: WordPool::NotBatched,
            streak: StreakBound::Below(threshold),
        }
    }

    /// Every unmastered word, batch membership ignored.
    #[must_use]
    pub const fn any_unmastered(threshold: u32) -> Self {
        Self {
            pool: WordPool::Any,
            streak: StreakBound::Below(threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Outcome::Correct, "\"correct\"")]
    #[case(Outcome::Incorrect, "\"incorrect\"")]
    #[case(Outcome::FlagForReview, "\"review\"")]
    fn outcome_serde_matches_as_str(#[case] outcome: Outcome, #[case] json: &str) {
        assert_eq!(serde_json::to_string(&outcome).unwrap(), json);
        assert_eq!(outcome.as_str().parse::<Outcome>().unwrap(), outcome);
    }

    #[test]
    fn outcome_rejects_unknown() {
        assert!("skip".parse::<Outcome>().is_err());
        assert!("Correct".parse::<Outcome>().is_err());
    }

    #[rstest]
    #[case(StreakBound::Below(15), 14, true)]
    #[case(StreakBound::Below(15), 15, false)]
    #[case(StreakBound::AtLeast(15), 15, true)]
    #[case(StreakBound::AtLeast(15), 3, false)]
    #[case(StreakBound::Unbounded, 0, true)]
    fn streak_bound_matches(#[case] bound: StreakBound, #[case] streak: u32, #[case] expected: bool) {
        assert_eq!(bound.matches(streak), expected);
    }
}
