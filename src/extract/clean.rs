//! Модуль очистки извлеченного текста
//!
//! Этот модуль содержит функции подготовки текста PDF к синтезу речи:
//! восстановление границ предложений, удаление небезопасных символов
//! и нормализацию абзацев.

use lazy_static::lazy_static;
use regex::Regex;

/// Маркер, добавляемый при усечении слишком длинного текста
pub const TRUNCATION_MARKER: &str = "\n\n[Text truncated for audio processing]";

// Временный разделитель абзацев; символ не входит в безопасный набор
// и к этому моменту уже вычищен из текста
const PARAGRAPH_PLACEHOLDER: &str = "\u{7}";

lazy_static! {
    /// Последовательности пробелов и табуляций (переводы строк сохраняются)
    static ref SPACE_RUNS: Regex = Regex::new(r"[^\S\n]+").unwrap();
    /// Слипшиеся предложения: строчная буква сразу перед заглавной
    static ref LOWER_UPPER: Regex = Regex::new(r"([a-z])([A-Z])").unwrap();
    /// Цифра, слипшаяся с буквой
    static ref DIGIT_LETTER: Regex = Regex::new(r"(\d)([A-Za-z])").unwrap();
    /// Буква, слипшаяся с цифрой
    static ref LETTER_DIGIT: Regex = Regex::new(r"([A-Za-z])(\d)").unwrap();
    /// Символы, с которыми TTS работает плохо
    static ref UNSAFE_CHARS: Regex = Regex::new(r"[^\w\s.,!?;:\-]").unwrap();
    /// Потерянная точка между предложением и заглавной буквой следующего
    static ref MISSING_SENTENCE_END: Regex = Regex::new(r"([a-z])(\s+[A-Z])").unwrap();
    /// Серии пустых строк — граница абзаца
    static ref BLANK_LINE_RUNS: Regex = Regex::new(r"\n[ \t]*(?:\n[ \t]*)+").unwrap();
}

/// Очистить и оптимизировать текст для синтеза речи
///
/// Переводы строк внутри абзаца сворачиваются в пробелы, серии пустых
/// строк становятся границами абзацев `\n\n`.
pub fn clean_for_tts(text: &str) -> String {
    // Схлопываем последовательности пробелов
    let text = SPACE_RUNS.replace_all(text, " ");

    // Восстанавливаем границы предложений, потерянные при извлечении из PDF
    let text = LOWER_UPPER.replace_all(&text, "$1. $2");
    let text = DIGIT_LETTER.replace_all(&text, "$1. $2");
    let text = LETTER_DIGIT.replace_all(&text, "$1. $2");

    // Удаляем символы вне безопасного набора
    let text = UNSAFE_CHARS.replace_all(&text, "");

    // Добавляем точку перед заглавной буквой нового предложения
    let text = MISSING_SENTENCE_END.replace_all(&text, "$1.$2");

    // Нормализуем абзацы: серии пустых строк превращаются в '\n\n',
    // одиночные переводы строк — в пробелы
    let text = BLANK_LINE_RUNS.replace_all(&text, PARAGRAPH_PLACEHOLDER);
    let text = text.replace('\n', " ");
    let text = text.replace(PARAGRAPH_PLACEHOLDER, "\n\n");

    text.trim().to_string()
}

/// Усечь текст до максимального количества символов с добавлением маркера
///
/// Ограничивает стоимость дальнейшей обработки; срез выполняется строго
/// по границе символа.
pub fn truncate_for_processing(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => {
            let mut truncated = text[..byte_index].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => text.to_string(),
    }
}
