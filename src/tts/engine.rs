//! Модуль последовательного синтеза речи по фрагментам
//!
//! Этот модуль вызывает бэкенд TTS фрагмент за фрагментом. Вызовы
//! выполняются строго последовательно: отчет о прогрессе и характер
//! нагрузки внешнего бэкенда делают это простейшей корректной схемой.

use bytes::Bytes;
use crate::config::SynthesisParams;
use crate::error::{Result, AudiobookError};
use crate::tts::TtsBackend;

/// Синтезировать речь для упорядоченного списка фрагментов
///
/// Фрагмент, синтез которого не удался, записывается в журнал и
/// пропускается; повторных попыток нет. `on_attempt` вызывается после
/// каждой попытки (успешной или нет) с количеством завершенных попыток
/// и общим числом фрагментов, чтобы внешние наблюдатели видели
/// непрерывное продвижение. Если не удался ни один фрагмент, этап
/// завершается ошибкой без аудио.
pub async fn synthesize_chunks(
    chunks: &[String],
    params: &SynthesisParams,
    backend: &dyn TtsBackend,
    mut on_attempt: impl FnMut(usize, usize),
) -> Result<Vec<Bytes>> {
    if chunks.is_empty() {
        return Err(AudiobookError::TtsGeneration(
            "no text chunks to synthesize".to_string(),
        ));
    }

    let total = chunks.len();
    log::info!(
        "Starting speech synthesis: {} chunks, dialect={}, slow={}",
        total,
        params.dialect,
        params.slow
    );

    let mut segments = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        match backend.synthesize(chunk, params).await {
            Ok(audio) => {
                log::info!("Processed chunk {}/{}", i + 1, total);
                segments.push(audio);
            }
            Err(e) => {
                log::warn!("Error processing chunk {}/{}: {}", i + 1, total, e);
            }
        }

        on_attempt(i + 1, total);
    }

    if segments.is_empty() {
        return Err(AudiobookError::TtsGeneration(
            "no audio segments were generated".to_string(),
        ));
    }

    log::info!("Synthesized {}/{} chunks", segments.len(), total);
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use crate::config::{resolve_synthesis_params, Accent, VoiceStyle};

    struct FixedBackend;

    #[async_trait]
    impl TtsBackend for FixedBackend {
        async fn synthesize(&self, _text: &str, _params: &SynthesisParams) -> Result<Bytes> {
            Ok(Bytes::from_static(b"audio"))
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl TtsBackend for FailingBackend {
        async fn synthesize(&self, _text: &str, _params: &SynthesisParams) -> Result<Bytes> {
            Err(AudiobookError::TtsGeneration("backend unreachable".to_string()))
        }
    }

    /// Бэкенд, у которого отказывает каждый второй вызов
    struct FlakyBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TtsBackend for FlakyBackend {
        async fn synthesize(&self, _text: &str, _params: &SynthesisParams) -> Result<Bytes> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call % 2 == 1 {
                Err(AudiobookError::TtsGeneration("transient failure".to_string()))
            } else {
                Ok(Bytes::from_static(b"audio"))
            }
        }
    }

    fn chunks(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("chunk number {}", i)).collect()
    }

    fn params() -> SynthesisParams {
        resolve_synthesis_params(VoiceStyle::Storytelling, Accent::Us)
    }

    #[tokio::test]
    async fn test_all_chunks_synthesized() {
        let segments = synthesize_chunks(&chunks(3), &params(), &FixedBackend, |_, _| {})
            .await
            .unwrap();
        assert_eq!(segments.len(), 3);
    }

    #[tokio::test]
    async fn test_progress_reported_after_every_attempt() {
        let mut attempts = Vec::new();
        synthesize_chunks(&chunks(4), &params(), &FlakyBackend { calls: AtomicUsize::new(0) }, |done, total| {
            attempts.push((done, total));
        })
        .await
        .unwrap();

        // Прогресс продвигается и после пропущенных фрагментов
        assert_eq!(attempts, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
    }

    #[tokio::test]
    async fn test_failed_chunks_are_skipped() {
        let segments = synthesize_chunks(
            &chunks(4),
            &params(),
            &FlakyBackend { calls: AtomicUsize::new(0) },
            |_, _| {},
        )
        .await
        .unwrap();
        assert_eq!(segments.len(), 2);
    }

    #[tokio::test]
    async fn test_all_failures_fail_the_stage() {
        let result = synthesize_chunks(&chunks(3), &params(), &FailingBackend, |_, _| {}).await;
        assert!(matches!(result, Err(AudiobookError::TtsGeneration(_))));
    }

    #[tokio::test]
    async fn test_empty_input_fails() {
        let result = synthesize_chunks(&[], &params(), &FixedBackend, |_, _| {}).await;
        assert!(matches!(result, Err(AudiobookError::TtsGeneration(_))));
    }
}
