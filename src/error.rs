//! Модуль обработки ошибок библиотеки pdf-audiobook
//!
//! Этот модуль содержит типы ошибок, которые могут возникнуть при работе библиотеки.

use thiserror::Error;

/// Ошибки библиотеки pdf-audiobook
#[derive(Debug, Error)]
pub enum AudiobookError {
    /// Ошибка HTTP запроса
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Ошибка ввода-вывода
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка сериализации/десериализации JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Ошибка извлечения текста из PDF (фатальная, без повторных попыток)
    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    /// Ошибка генерации TTS (фатальная, только если не сгенерирован ни один фрагмент)
    #[error("TTS generation error: {0}")]
    TtsGeneration(String),

    /// Ошибка обработки аудио (склейка/перекодирование)
    #[error("Audio processing error: {0}")]
    AudioProcessing(String),

    /// Ошибка генерации субтитров (не фатальна для конвейера в целом)
    #[error("Caption generation error: {0}")]
    CaptionGeneration(String),

    /// Ошибка конфигурации
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Файл не найден
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Неверный формат
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Другая ошибка
    #[error("Other error: {0}")]
    Other(String),
}

impl From<&str> for AudiobookError {
    fn from(s: &str) -> Self {
        AudiobookError::Other(s.to_string())
    }
}

impl From<String> for AudiobookError {
    fn from(s: String) -> Self {
        AudiobookError::Other(s)
    }
}

/// Тип Result для библиотеки pdf-audiobook
pub type Result<T> = std::result::Result<T, AudiobookError>;
