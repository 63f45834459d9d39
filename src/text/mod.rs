//! Модуль обработки текста
//!
//! Этот модуль содержит разбиение текста на предложения и фрагменты
//! для синтеза речи.

pub mod chunker;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Конец предложения: одна или несколько точек, восклицательных
    /// или вопросительных знаков
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]+").unwrap();
}

/// Разбить текст на предложения
///
/// Пустые и состоящие из пробелов предложения отбрасываются.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("Hello world. This is a test! Really? Yes.");
        assert_eq!(sentences, vec!["Hello world", "This is a test", "Really", "Yes"]);
    }

    #[test]
    fn test_split_sentences_collapses_repeated_punctuation() {
        let sentences = split_sentences("Wait... what?! Fine.");
        assert_eq!(sentences, vec!["Wait", "what", "Fine"]);
    }

    #[test]
    fn test_split_sentences_empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("  .  !  ").is_empty());
    }
}
