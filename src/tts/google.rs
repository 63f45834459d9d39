//! Модуль для интеграции с Google Translate TTS
//!
//! Этот модуль содержит интерфейс бэкенда синтеза речи и его реализацию
//! поверх публичной конечной точки Google Translate.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use crate::config::SynthesisParams;
use crate::error::{Result, AudiobookError};

/// Бэкенд синтеза речи
///
/// Граница одного вызова: текст и разрешенные параметры на входе,
/// сырые аудиобайты на выходе. Каждый вызов может завершиться ошибкой
/// независимо от остальных.
#[async_trait]
pub trait TtsBackend: Send + Sync {
    /// Синтезировать речь для одного фрагмента текста
    async fn synthesize(&self, text: &str, params: &SynthesisParams) -> Result<Bytes>;
}

/// Бэкенд на основе конечной точки Google Translate TTS
///
/// Диалектный токен выбирает региональный домен и тем самым
/// смещает акцент синтезированной речи.
pub struct GoogleTranslateTts {
    /// HTTP клиент
    client: Client,
}

impl GoogleTranslateTts {
    /// Создать новый экземпляр GoogleTranslateTts
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for GoogleTranslateTts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TtsBackend for GoogleTranslateTts {
    async fn synthesize(&self, text: &str, params: &SynthesisParams) -> Result<Bytes> {
        let url = format!("https://translate.google.{}/translate_tts", params.dialect);
        let speed = if params.slow { "0.24" } else { "1.0" };

        log::debug!(
            "Sending TTS request: dialect={}, slow={}, {} chars",
            params.dialect,
            params.slow,
            text.len()
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", params.language.as_str()),
                ("ttsspeed", speed),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AudiobookError::TtsGeneration(format!(
                "TTS backend returned status {}",
                status
            )));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(AudiobookError::TtsGeneration(
                "TTS backend returned empty audio".to_string(),
            ));
        }

        Ok(bytes)
    }
}
