//! Модуль конфигурации библиотеки pdf-audiobook
//!
//! Этот модуль содержит структуры и перечисления для настройки конвейера:
//! стили голоса, акценты и таблицу параметров синтеза.

use serde::{Deserialize, Serialize};

/// Стиль голоса для озвучивания
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoiceStyle {
    /// Художественное чтение
    Storytelling,
    /// Нейтральное повествование
    Narration,
    /// Спокойный голос
    Calm,
    /// Энергичный голос
    Energetic,
    /// Драматичный голос
    Dramatic,
    /// Шепот
    Whisper,
    /// Восторженный голос
    Excited,
    /// Монотонный голос
    Monotone,
    /// Официальный голос
    Formal,
}

impl Default for VoiceStyle {
    fn default() -> Self {
        Self::Storytelling
    }
}

impl VoiceStyle {
    /// Получить строковое представление стиля
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Storytelling => "storytelling",
            Self::Narration => "narration",
            Self::Calm => "calm",
            Self::Energetic => "energetic",
            Self::Dramatic => "dramatic",
            Self::Whisper => "whisper",
            Self::Excited => "excited",
            Self::Monotone => "monotone",
            Self::Formal => "formal",
        }
    }

    /// Получить профиль синтеза для стиля
    pub fn profile(&self) -> VoiceProfile {
        match self {
            Self::Storytelling => VoiceProfile::new("com", false, true),
            // Narration всегда использует формальный американский выговор,
            // выбранный акцент игнорируется
            Self::Narration => VoiceProfile::new("com", false, false),
            Self::Calm => VoiceProfile::new("co.uk", true, true),
            Self::Energetic => VoiceProfile::new("com", false, true),
            Self::Dramatic => VoiceProfile::new("com", false, true),
            Self::Whisper => VoiceProfile::new("co.uk", true, true),
            Self::Excited => VoiceProfile::new("com", false, true),
            Self::Monotone => VoiceProfile::new("com", true, true),
            Self::Formal => VoiceProfile::new("co.uk", false, true),
        }
    }
}

/// Региональный акцент озвучивания
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    /// Американский английский
    Us,
    /// Британский английский
    Uk,
    /// Австралийский английский
    Au,
    /// Канадский английский
    Ca,
    /// Индийский английский
    In,
    /// Ирландский английский
    Ie,
    /// Южноафриканский английский
    Za,
    /// Новозеландский английский
    Nz,
}

impl Default for Accent {
    fn default() -> Self {
        Self::Us
    }
}

impl Accent {
    /// Получить строковое представление акцента
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Uk => "uk",
            Self::Au => "au",
            Self::Ca => "ca",
            Self::In => "in",
            Self::Ie => "ie",
            Self::Za => "za",
            Self::Nz => "nz",
        }
    }

    /// Получить региональный диалектный токен (TLD) для бэкенда TTS
    pub fn dialect_tld(&self) -> &'static str {
        match self {
            Self::Us => "com",
            Self::Uk => "co.uk",
            Self::Au => "com.au",
            Self::Ca => "ca",
            Self::In => "co.in",
            Self::Ie => "ie",
            Self::Za => "co.za",
            Self::Nz => "co.nz",
        }
    }
}

/// Профиль синтеза для стиля голоса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceProfile {
    /// Язык синтеза
    pub language: &'static str,
    /// Диалект по умолчанию, когда акцент не учитывается
    pub fallback_dialect: &'static str,
    /// Замедленная речь
    pub slow: bool,
    /// Учитывается ли выбранный пользователем акцент
    pub honors_accent: bool,
}

impl VoiceProfile {
    fn new(fallback_dialect: &'static str, slow: bool, honors_accent: bool) -> Self {
        Self {
            language: "en",
            fallback_dialect,
            slow,
            honors_accent,
        }
    }
}

/// Разрешенные параметры одного вызова синтеза
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SynthesisParams {
    /// Язык синтеза
    pub language: String,
    /// Диалектный токен (TLD)
    pub dialect: String,
    /// Замедленная речь
    pub slow: bool,
}

/// Разрешить пару (стиль, акцент) в параметры синтеза
pub fn resolve_synthesis_params(style: VoiceStyle, accent: Accent) -> SynthesisParams {
    let profile = style.profile();
    let dialect = if profile.honors_accent {
        accent.dialect_tld()
    } else {
        profile.fallback_dialect
    };

    SynthesisParams {
        language: profile.language.to_string(),
        dialect: dialect.to_string(),
        slow: profile.slow,
    }
}

/// Конфигурация конвейера
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Максимальная длина извлеченного текста в символах
    pub max_text_length: usize,
    /// Максимальная длина одного фрагмента текста для TTS
    pub max_chunk_length: usize,
    /// Количество параллельных обработчиков страниц PDF
    pub extraction_workers: usize,
    /// Целевое количество слов в строке субтитров
    pub target_words_per_line: usize,
    /// Скорость речи для резервного расчета таймингов (слов в минуту)
    pub words_per_minute: f64,
    /// Пауза между строками субтитров в резервном режиме (секунды)
    pub line_pause_seconds: f64,
    /// Частота дискретизации итогового аудио
    pub sample_rate: u32,
    /// Битрейт итогового аудио
    pub bitrate: String,
    /// Директория для итоговых аудиофайлов
    pub output_dir: String,
    /// Удалять временные файлы после завершения
    pub cleanup_temp_files: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            max_chunk_length: 4_000,
            extraction_workers: 4,
            target_words_per_line: 12,
            words_per_minute: 80.0,
            line_pause_seconds: 0.5,
            sample_rate: 24_000,
            bitrate: "128k".to_string(),
            output_dir: "audio".to_string(),
            cleanup_temp_files: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_dialect_table() {
        assert_eq!(Accent::Us.dialect_tld(), "com");
        assert_eq!(Accent::Uk.dialect_tld(), "co.uk");
        assert_eq!(Accent::Au.dialect_tld(), "com.au");
        assert_eq!(Accent::In.dialect_tld(), "co.in");
        assert_eq!(Accent::Nz.dialect_tld(), "co.nz");
    }

    #[test]
    fn test_narration_ignores_accent() {
        // Narration использует фиксированный диалект независимо от акцента
        for accent in [Accent::Us, Accent::Uk, Accent::Au, Accent::In] {
            let params = resolve_synthesis_params(VoiceStyle::Narration, accent);
            assert_eq!(params.dialect, "com");
        }
    }

    #[test]
    fn test_style_honors_accent() {
        let params = resolve_synthesis_params(VoiceStyle::Storytelling, Accent::Au);
        assert_eq!(params.dialect, "com.au");

        let params = resolve_synthesis_params(VoiceStyle::Calm, Accent::Za);
        assert_eq!(params.dialect, "co.za");
    }

    #[test]
    fn test_slow_styles() {
        assert!(VoiceStyle::Calm.profile().slow);
        assert!(VoiceStyle::Whisper.profile().slow);
        assert!(VoiceStyle::Monotone.profile().slow);
        assert!(!VoiceStyle::Storytelling.profile().slow);
        assert!(!VoiceStyle::Formal.profile().slow);
    }

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_text_length, 50_000);
        assert_eq!(config.max_chunk_length, 4_000);
        assert_eq!(config.extraction_workers, 4);
        assert_eq!(config.words_per_minute, 80.0);
    }
}
