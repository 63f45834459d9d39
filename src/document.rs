//! Модуль записи документа
//!
//! Этот модуль содержит структуру Document — запись об одном документе,
//! за которой внешние наблюдатели следят опросом полей статуса и прогресса.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::config::{Accent, VoiceStyle};

/// Статус обработки документа
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Документ загружен, обработка не начата
    Uploaded,
    /// Конвейер выполняется
    Processing,
    /// Обработка успешно завершена
    Completed,
    /// Обработка завершилась ошибкой
    Failed,
}

/// Строка синхронизированных субтитров
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptionLine {
    /// Смещение от начала аудио в секундах (округлено до 2 знаков)
    pub time: f64,
    /// Текст строки
    pub text: String,
}

impl CaptionLine {
    /// Создать новую строку субтитров
    pub fn new(time: f64, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
        }
    }
}

/// Запись об одном документе
///
/// Поля status и progress изменяются только тем запуском конвейера,
/// который владеет документом; внешние читатели их только опрашивают.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Идентификатор документа
    pub id: Uuid,
    /// Путь к исходному PDF файлу
    pub pdf_path: String,
    /// Извлеченный текст (отсутствует до завершения извлечения)
    pub extracted_text: Option<String>,
    /// Текущий статус обработки
    pub status: DocumentStatus,
    /// Прогресс обработки (0-100, не убывает в пределах одного запуска)
    pub progress: u8,
    /// Выбранный стиль голоса
    pub voice_style: VoiceStyle,
    /// Выбранный акцент
    pub accent: Accent,
    /// Путь к итоговому аудиофайлу (устанавливается при завершении)
    pub audio_file: Option<String>,
    /// Дорожка субтитров (устанавливается при завершении вместе с аудио)
    pub captions: Option<Vec<CaptionLine>>,
}

impl Document {
    /// Создать новую запись документа со стилем и акцентом по умолчанию
    pub fn new(pdf_path: impl Into<String>) -> Self {
        Self::with_voice(pdf_path, VoiceStyle::default(), Accent::default())
    }

    /// Создать новую запись документа с выбранным стилем и акцентом
    pub fn with_voice(pdf_path: impl Into<String>, voice_style: VoiceStyle, accent: Accent) -> Self {
        Self {
            id: Uuid::new_v4(),
            pdf_path: pdf_path.into(),
            extracted_text: None,
            status: DocumentStatus::Uploaded,
            progress: 0,
            voice_style,
            accent,
            audio_file: None,
            captions: None,
        }
    }

    /// Имя итогового аудиофайла для документа
    pub fn audio_filename(&self) -> String {
        format!("{}_audiobook_{}.mp3", self.id, self.voice_style.as_str())
    }
}
