use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::TenantId;
use crate::mastery::MasteryState;

/// A word/translation pair owned by one tenant.
///
/// Identity is `(tenant_id, word)` with `word` case-normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordEntry {
    pub tenant_id: TenantId,
    pub word: String,
    pub translation: String,
    pub description: Option<String>,
    pub streak: u32,
    pub to_review: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WordEntry {
    #[must_use]
    pub const fn mastery(&self) -> MasteryState {
        MasteryState::new(self.streak, self.to_review)
    }
}

/// Input for creating or overwriting a word.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewWord {
    pub word: String,
    pub translation: String,
    pub description: Option<String>,
}

impl NewWord {
    /// Build a validated, normalized word.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the word or translation is blank.
    pub fn new(
        word: &str,
        translation: &str,
        description: Option<&str>,
    ) -> Result<Self, CoreError> {
        let word = normalize_word(word);
        if word.is_empty() {
            return Err(CoreError::Validation("word must not be empty".into()));
        }
        let translation = translation.trim();
        if translation.is_empty() {
            return Err(CoreError::Validation(format!(
                "translation for '{word}' must not be empty"
            )));
        }
        Ok(Self {
            word,
            translation: translation.to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from),
        })
    }
}

/// Canonical form of a word key: trimmed, inner whitespace collapsed, lower-cased.
#[must_use]
pub fn normalize_word(word: &str) -> String {
    word.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_word("  Der   Apfel "), "der apfel");
        assert_eq!(normalize_word("ÄPFEL"), "äpfel");
    }

    #[test]
    fn new_word_rejects_blank_parts() {
        assert!(NewWord::new("   ", "apple", None).is_err());
        assert!(NewWord::new("Apfel", "  ", None).is_err());
    }

    #[test]
    fn new_word_drops_blank_description() {
        let w = NewWord::new("Apfel", " apple ", Some("  ")).unwrap();
        assert_eq!(w.word, "apfel");
        assert_eq!(w.translation, "apple");
        assert_eq!(w.description, None);
    }
}
