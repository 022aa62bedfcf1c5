//! Per-word mastery state machine.
//!
//! A word's mastery is a streak counter plus an orthogonal review flag.
//! Applying an [`Outcome`] yields the next state; eviction from the learning
//! batch once the streak reaches the threshold is the batch maintainer's job,
//! never done inline here.

use serde::{Deserialize, Serialize};

use crate::enums::{MasteryStage, Outcome};

/// Streak at which a word counts as learned.
pub const DEFAULT_MASTERY_THRESHOLD: u32 = 15;

/// Target size of a tenant's learning batch.
pub const DEFAULT_BATCH_SIZE: u32 = 50;

/// Mutable mastery fields of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MasteryState {
    pub streak: u32,
    pub to_review: bool,
}

impl MasteryState {
    #[must_use]
    pub const fn new(streak: u32, to_review: bool) -> Self {
        Self { streak, to_review }
    }

    /// Next state after observing `outcome`.
    ///
    /// - `Correct` increments the streak and leaves the review flag alone.
    /// - `Incorrect` resets the streak to exactly zero.
    /// - `FlagForReview` sets the review flag and keeps the streak.
    #[must_use]
    pub const fn apply(self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Correct => Self {
                streak: self.streak.saturating_add(1),
                ..self
            },
            Outcome::Incorrect => Self { streak: 0, ..self },
            Outcome::FlagForReview => Self {
                to_review: true,
                ..self
            },
        }
    }

    #[must_use]
    pub const fn is_learned(self, threshold: u32) -> bool {
        self.streak >= threshold
    }

    /// Lifecycle stage given current batch membership.
    ///
    /// A learned word reports `Learned` even while it still sits in the batch
    /// waiting for the next eviction pass.
    #[must_use]
    pub const fn stage(self, batched: bool, threshold: u32) -> MasteryStage {
        if self.is_learned(threshold) {
            MasteryStage::Learned
        } else if batched {
            MasteryStage::Batched
        } else {
            MasteryStage::New
        }
    }
}

/// What changed when an outcome was applied, for logging and replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: MasteryState,
    pub to: MasteryState,
    pub outcome: Outcome,
}

impl Transition {
    #[must_use]
    pub const fn new(from: MasteryState, outcome: Outcome) -> Self {
        Self {
            from,
            to: from.apply(outcome),
            outcome,
        }
    }

    /// True when this transition crossed the mastery threshold upwards.
    #[must_use]
    pub const fn became_learned(&self, threshold: u32) -> bool {
        !self.from.is_learned(threshold) && self.to.is_learned(threshold)
    }

    #[must_use]
    pub const fn streak_changed(&self) -> bool {
        self.from.streak != self.to.streak
    }

    #[must_use]
    pub const fn review_changed(&self) -> bool {
        self.from.to_review != self.to.to_review
    }
}
