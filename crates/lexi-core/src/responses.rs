//! User-visible messages.
//!
//! These are the only texts a learner ever sees; internal error details never
//! reach them.

use serde::{Deserialize, Serialize};

use crate::action::InboundAction;
use crate::ids::TenantId;

/// Outbound quiz question for one word.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizPrompt {
    pub tenant_id: TenantId,
    pub word: String,
    pub description: Option<String>,
    pub token: String,
    /// Drawn from the whole unmastered pool rather than the learning batch.
    pub surprise: bool,
}

impl QuizPrompt {
    /// Question text shown above the answer buttons.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = format!("Do you remember the translation of \"{}\"?", self.word);
        if let Some(description) = &self.description {
            text.push_str("\n(");
            text.push_str(description);
            text.push(')');
        }
        text
    }

    /// `(label, payload)` pairs for the answer buttons.
    #[must_use]
    pub fn buttons(&self) -> Vec<(&'static str, String)> {
        InboundAction::buttons(&self.token)
            .into_iter()
            .map(|(outcome, payload)| (button_label(outcome), payload))
            .collect()
    }
}

const fn button_label(outcome: crate::enums::Outcome) -> &'static str {
    use crate::enums::Outcome;
    match outcome {
        Outcome::Correct => "I know it",
        Outcome::Incorrect => "I don't know",
        Outcome::FlagForReview => "Review later",
    }
}

/// Response to an inbound learner action or an on-demand quiz request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// The outcome was recorded.
    Acknowledged {
        word: String,
        translation: String,
        streak: u32,
        to_review: bool,
        learned: bool,
    },
    /// The token is unknown, expired, or already used.
    TooMuchTimePassed,
    /// The tenant has no eligible word to ask about.
    NoWordsToCheck,
    /// Anything unexpected; details stay in the logs.
    SomethingWentWrong,
}

impl Reply {
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Acknowledged {
                word,
                translation,
                streak,
                to_review,
                learned,
            } => {
                let mut text = format!("{word}: {translation}\nStreak: {streak}");
                if *learned {
                    text.push_str("\nLearned!");
                }
                if *to_review {
                    text.push_str("\nOn your review list.");
                }
                text
            }
            Self::TooMuchTimePassed => "Too much time has passed, this question expired.".into(),
            Self::NoWordsToCheck => "No words to check.".into(),
            Self::SomethingWentWrong => "Something went wrong, please try again later.".into(),
        }
    }
}
