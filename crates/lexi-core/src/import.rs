//! Word-list import parsing.
//!
//! One entry per line: `word;translation[;description]`. Blank lines and lines
//! starting with `#` are skipped.

use crate::entities::NewWord;
use crate::errors::CoreError;

/// Parse a whole word list, failing on the first malformed line.
///
/// # Errors
///
/// Returns `CoreError::InvalidImportLine` with the 1-based line number.
pub fn parse_word_list(text: &str) -> Result<Vec<NewWord>, CoreError> {
    let mut words = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        words.push(parse_line(line).map_err(|reason| CoreError::InvalidImportLine {
            line: idx + 1,
            reason,
        })?);
    }
    Ok(words)
}

fn parse_line(line: &str) -> Result<NewWord, String> {
    let mut parts = line.splitn(3, ';');
    let word = parts.next().unwrap_or_default();
    let translation = parts
        .next()
        .ok_or_else(|| "expected 'word;translation[;description]'".to_string())?;
    let description = parts.next();
    NewWord::new(word, translation, description).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_entries_and_skips_noise() {
        let text = "# German basics\n\nDer Apfel;the apple\nHaus; house ;building\n";
        let words = parse_word_list(text).unwrap();
        assert_eq!(
            words,
            vec![
                NewWord::new("der apfel", "the apple", None).unwrap(),
                NewWord::new("haus", "house", Some("building")).unwrap(),
            ]
        );
    }

    #[test]
    fn description_may_contain_semicolons() {
        let words = parse_word_list("lauf;run;verb; also a noun").unwrap();
        assert_eq!(words[0].description.as_deref(), Some("verb; also a noun"));
    }

    #[test]
    fn reports_line_number() {
        let err = parse_word_list("a;b\n\nbroken line\n").unwrap_err();
        match err {
            CoreError::InvalidImportLine { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_translation_is_rejected() {
        assert!(parse_word_list("apfel;  ").is_err());
    }
}
