//! Основной файл библиотеки pdf-audiobook с поддержкой системы прогресса и уведомлений
//!
//! Эта библиотека превращает PDF документ в озвученную аудиокнигу с
//! синхронизированными субтитрами, с возможностью отслеживания прогресса
//! выполнения операций.

pub mod progress;
pub mod notification;
pub mod config;
pub mod error;
pub mod document;
pub mod extract;
pub mod text;
pub mod tts;
pub mod media;
pub mod caption;
pub mod utils;

use std::path::Path;
use crate::caption::{captions_from_duration, captions_from_rate};
use crate::config::{resolve_synthesis_params, PipelineConfig};
use crate::document::{CaptionLine, Document, DocumentStatus};
use crate::error::{AudiobookError, Result};
use crate::progress::{ProcessStep, ProgressObserver, ProgressReporter, ProgressTracker};
use crate::tts::{GoogleTranslateTts, TtsBackend};

/// Основная структура для работы с библиотекой
pub struct AudiobookPipeline {
    /// Конфигурация конвейера
    config: PipelineConfig,
    /// Бэкенд синтеза речи
    backend: Box<dyn TtsBackend>,
    /// Трекер прогресса
    progress_tracker: Option<ProgressTracker>,
}

impl AudiobookPipeline {
    /// Создать новый экземпляр AudiobookPipeline с указанной конфигурацией
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            backend: Box::new(GoogleTranslateTts::new()),
            progress_tracker: None,
        }
    }

    /// Создать экземпляр с указанным бэкендом синтеза речи
    pub fn with_backend(config: PipelineConfig, backend: Box<dyn TtsBackend>) -> Self {
        Self {
            config,
            backend,
            progress_tracker: None,
        }
    }

    /// Создать экземпляр с репортером прогресса
    pub fn with_progress_reporter(config: PipelineConfig, reporter: Box<dyn ProgressReporter>) -> Self {
        let mut tracker = ProgressTracker::new();
        tracker.set_reporter(reporter);

        Self {
            config,
            backend: Box::new(GoogleTranslateTts::new()),
            progress_tracker: Some(tracker),
        }
    }

    /// Установить репортер прогресса
    pub fn set_progress_reporter(&mut self, reporter: Box<dyn ProgressReporter>) {
        if let Some(tracker) = &mut self.progress_tracker {
            tracker.set_reporter(reporter);
        } else {
            let mut tracker = ProgressTracker::new();
            tracker.set_reporter(reporter);
            self.progress_tracker = Some(tracker);
        }
    }

    /// Добавить наблюдателя прогресса
    pub fn add_observer(&mut self, observer: Box<dyn ProgressObserver>) -> Result<usize> {
        if let Some(tracker) = &mut self.progress_tracker {
            Ok(tracker.add_observer(observer).unwrap_or(0))
        } else {
            let mut tracker = ProgressTracker::new();
            let id = tracker.add_observer(observer).unwrap_or(0);
            self.progress_tracker = Some(tracker);
            Ok(id)
        }
    }

    /// Основной метод обработки документа
    ///
    /// Этапы выполняются в фиксированном порядке: извлечение текста,
    /// синтез речи, склейка аудио, субтитры. Повторный запуск для того
    /// же документа перезаписывает текст, аудио и субтитры. Любой
    /// фатальный сбой переводит документ в статус failed со сброшенным
    /// прогрессом; результаты предыдущих успешных запусков не трогаются.
    pub async fn process(&self, document: &mut Document) -> Result<String> {
        log::info!("Starting audiobook generation for document {}", document.id);

        let tracker_ref = self.progress_tracker.as_ref();
        if let Some(t) = tracker_ref {
            t.reset();
        }

        document.status = DocumentStatus::Processing;
        document.progress = 0;

        match self.run_stages(document, tracker_ref).await {
            Ok(output_path) => Ok(output_path),
            Err(e) => {
                log::error!("Audiobook generation failed for document {}: {}", document.id, e);
                document.status = DocumentStatus::Failed;
                document.progress = 0;
                Err(e)
            }
        }
    }

    /// Выполнить этапы конвейера
    async fn run_stages(
        &self,
        document: &mut Document,
        tracker: Option<&ProgressTracker>,
    ) -> Result<String> {
        // 1. Извлечение и очистка текста
        if let Some(t) = tracker {
            t.set_step(ProcessStep::TextExtraction);
            t.update_step_progress(0.0, Some("Извлечение текста из PDF".to_string()));
        }

        let extracted = extract::extract_document_text(&document.pdf_path, &self.config).await?;
        if extracted.trim().is_empty() {
            return Err(AudiobookError::PdfExtraction(
                "no extractable text in PDF".to_string(),
            ));
        }
        document.extracted_text = Some(extracted.clone());

        if let Some(t) = tracker {
            t.update_step_progress(100.0, Some("Извлечение текста завершено".to_string()));
        }

        // 2. Синтез речи по фрагментам
        let chunks = text::chunker::split_into_chunks(&extracted, self.config.max_chunk_length);
        let params = resolve_synthesis_params(document.voice_style, document.accent);

        if let Some(t) = tracker {
            t.set_step(ProcessStep::SpeechGeneration);
        }

        // Единственный владелец счетчика прогресса — текущий запуск;
        // фаза синтеза занимает первую половину шкалы документа
        let doc_progress = &mut document.progress;
        let segments = tts::engine::synthesize_chunks(
            &chunks,
            &params,
            self.backend.as_ref(),
            |done, total| {
                *doc_progress = (done as f32 / total as f32 * 50.0).round() as u8;
                if let Some(t) = tracker {
                    t.update_step_progress(
                        done as f32 / total as f32 * 100.0,
                        Some(format!("Синтез речи: {}/{} фрагментов", done, total)),
                    );
                }
            },
        )
        .await?;

        // 3. Склейка аудио и запись итогового файла
        if let Some(t) = tracker {
            t.set_step(ProcessStep::AudioAssembly);
            t.update_step_progress(0.0, Some("Склейка аудиофрагментов".to_string()));
        }

        // Запуск ffmpeg/ffprobe блокирует поток, уводим его в блокирующий пул
        let assembly_config = self.config.clone();
        let combined = tokio::task::spawn_blocking(move || {
            media::audio::combine_segments(&segments, &assembly_config)
        })
        .await
        .map_err(|e| AudiobookError::AudioProcessing(format!("audio assembly task failed: {}", e)))??;

        let output_dir = Path::new(&self.config.output_dir);
        std::fs::create_dir_all(output_dir)?;
        let output_path = output_dir.join(document.audio_filename());
        std::fs::write(&output_path, &combined.data)?;
        let output_path = output_path.to_string_lossy().to_string();

        document.progress = 90;
        if let Some(t) = tracker {
            t.update_step_progress(100.0, Some("Склейка аудио завершена".to_string()));
        }

        // 4. Субтитры: по реальной длительности, если ее удалось измерить,
        // иначе по модели скорости речи. Сбой здесь не отменяет готовое аудио.
        if let Some(t) = tracker {
            t.set_step(ProcessStep::CaptionGeneration);
        }

        let captions = self.generate_captions(&extracted, combined.duration);

        // Публикуем аудио и субтитры вместе
        document.audio_file = Some(output_path.clone());
        document.captions = captions;
        document.status = DocumentStatus::Completed;
        document.progress = 100;

        if let Some(t) = tracker {
            t.complete();
        }

        log::info!(
            "Audio generated successfully for document {}, duration: {:?}, captions: {} lines",
            document.id,
            combined.duration,
            document.captions.as_ref().map(Vec::len).unwrap_or(0)
        );

        Ok(output_path)
    }

    /// Построить дорожку субтитров для текста
    fn generate_captions(&self, extracted: &str, duration: Option<f64>) -> Option<Vec<CaptionLine>> {
        let result = match duration {
            Some(total) => captions_from_duration(extracted, total, self.config.target_words_per_line),
            None => {
                log::warn!("Audio duration unavailable, falling back to speaking-rate timing");
                Ok(captions_from_rate(
                    extracted,
                    self.config.words_per_minute,
                    self.config.line_pause_seconds,
                    self.config.target_words_per_line,
                ))
            }
        };

        match result {
            Ok(captions) => Some(captions),
            Err(e) => {
                log::warn!("Caption generation failed, keeping audio without captions: {}", e);
                None
            }
        }
    }
}

/// Публичный API для удобного использования
pub async fn generate_audiobook(document: &mut Document, config: PipelineConfig) -> Result<String> {
    let pipeline = AudiobookPipeline::new(config);
    pipeline.process(document).await
}

/// Публичный API с поддержкой отслеживания прогресса
pub async fn generate_audiobook_with_progress(
    document: &mut Document,
    config: PipelineConfig,
    reporter: Box<dyn ProgressReporter>,
) -> Result<String> {
    let pipeline = AudiobookPipeline::with_progress_reporter(config, reporter);
    pipeline.process(document).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use crate::config::{Accent, SynthesisParams, VoiceStyle};
    use crate::extract::pdf::testing::write_pdf;

    struct FixedBackend;

    #[async_trait]
    impl TtsBackend for FixedBackend {
        async fn synthesize(&self, _text: &str, _params: &SynthesisParams) -> Result<Bytes> {
            Ok(Bytes::from_static(b"ID3 fake mp3 payload"))
        }
    }

    struct UnreachableBackend;

    #[async_trait]
    impl TtsBackend for UnreachableBackend {
        async fn synthesize(&self, _text: &str, _params: &SynthesisParams) -> Result<Bytes> {
            Err(AudiobookError::TtsGeneration("backend unreachable".to_string()))
        }
    }

    fn test_config(output_dir: &Path) -> PipelineConfig {
        PipelineConfig {
            output_dir: output_dir.to_string_lossy().to_string(),
            ..PipelineConfig::default()
        }
    }

    #[tokio::test]
    async fn test_pipeline_completes_document() {
        let temp_dir = tempfile::tempdir().unwrap();
        let pdf_path = temp_dir.path().join("book.pdf");
        write_pdf(&pdf_path, &["Hello world. This is a test."]);

        let pipeline = AudiobookPipeline::with_backend(
            test_config(temp_dir.path()),
            Box::new(FixedBackend),
        );
        let mut document =
            Document::with_voice(pdf_path.to_string_lossy(), VoiceStyle::Storytelling, Accent::Us);

        let output_path = pipeline.process(&mut document).await.unwrap();

        assert_eq!(document.status, DocumentStatus::Completed);
        assert_eq!(document.progress, 100);
        assert!(document.extracted_text.is_some());
        assert_eq!(document.audio_file.as_deref(), Some(output_path.as_str()));
        assert!(Path::new(&output_path).exists());

        let captions = document.captions.as_ref().unwrap();
        assert!(!captions.is_empty());
        assert_eq!(captions[0].time, 0.0);
        // Смещения не убывают
        for pair in captions.windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
    }

    #[tokio::test]
    async fn test_all_chunk_failures_fail_the_run() {
        let temp_dir = tempfile::tempdir().unwrap();
        let pdf_path = temp_dir.path().join("book.pdf");
        write_pdf(&pdf_path, &["Hello world. This is a test."]);

        let pipeline = AudiobookPipeline::with_backend(
            test_config(temp_dir.path()),
            Box::new(UnreachableBackend),
        );
        let mut document = Document::new(pdf_path.to_string_lossy());

        let result = pipeline.process(&mut document).await;

        assert!(matches!(result, Err(AudiobookError::TtsGeneration(_))));
        assert_eq!(document.status, DocumentStatus::Failed);
        assert_eq!(document.progress, 0);
        assert!(document.audio_file.is_none());
        assert!(document.captions.is_none());
    }

    #[tokio::test]
    async fn test_failed_rerun_preserves_prior_outputs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let pdf_path = temp_dir.path().join("book.pdf");
        write_pdf(&pdf_path, &["Hello world. This is a test."]);

        let config = test_config(temp_dir.path());
        let mut document = Document::new(pdf_path.to_string_lossy());

        let pipeline = AudiobookPipeline::with_backend(config.clone(), Box::new(FixedBackend));
        pipeline.process(&mut document).await.unwrap();
        let prior_audio = document.audio_file.clone().unwrap();
        let prior_captions = document.captions.clone().unwrap();

        let pipeline = AudiobookPipeline::with_backend(config, Box::new(UnreachableBackend));
        let result = pipeline.process(&mut document).await;

        assert!(result.is_err());
        assert_eq!(document.status, DocumentStatus::Failed);
        assert_eq!(document.progress, 0);
        // Аудио и субтитры успешного запуска остаются на месте
        assert_eq!(document.audio_file.as_deref(), Some(prior_audio.as_str()));
        let captions = document.captions.as_ref().unwrap();
        assert_eq!(captions.len(), prior_captions.len());
        for (a, b) in captions.iter().zip(prior_captions.iter()) {
            assert_eq!(a.text, b.text);
        }
    }

    #[tokio::test]
    async fn test_missing_pdf_fails_the_run() {
        let temp_dir = tempfile::tempdir().unwrap();
        let pipeline = AudiobookPipeline::with_backend(
            test_config(temp_dir.path()),
            Box::new(FixedBackend),
        );
        let mut document = Document::new("no/such/book.pdf");

        let result = pipeline.process(&mut document).await;

        assert!(result.is_err());
        assert_eq!(document.status, DocumentStatus::Failed);
        assert_eq!(document.progress, 0);
        assert!(document.extracted_text.is_none());
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let pdf_path = temp_dir.path().join("book.pdf");
        write_pdf(&pdf_path, &["Hello world. This is a test."]);

        let pipeline = AudiobookPipeline::with_backend(
            test_config(temp_dir.path()),
            Box::new(FixedBackend),
        );
        let mut document = Document::new(pdf_path.to_string_lossy());

        pipeline.process(&mut document).await.unwrap();
        let first_text = document.extracted_text.clone().unwrap();
        let first_captions = document.captions.clone().unwrap();

        pipeline.process(&mut document).await.unwrap();
        let second_captions = document.captions.clone().unwrap();

        // Повторный запуск перезаписывает результаты тем же содержимым
        assert_eq!(document.extracted_text.as_deref(), Some(first_text.as_str()));
        assert_eq!(first_captions.len(), second_captions.len());
        for (a, b) in first_captions.iter().zip(second_captions.iter()) {
            assert_eq!(a.text, b.text);
        }
        assert_eq!(document.status, DocumentStatus::Completed);
    }

    #[tokio::test]
    async fn test_progress_observed_through_reporter() {
        use crate::notification::MemoryProgressObserver;
        use crate::progress::DefaultProgressReporter;

        let temp_dir = tempfile::tempdir().unwrap();
        let pdf_path = temp_dir.path().join("book.pdf");
        write_pdf(&pdf_path, &["Hello world. This is a test."]);

        let observer = MemoryProgressObserver::new();
        let mut reporter = DefaultProgressReporter::new();
        reporter.add_observer(Box::new(observer.clone()));

        let mut pipeline = AudiobookPipeline::with_backend(
            test_config(temp_dir.path()),
            Box::new(FixedBackend),
        );
        pipeline.set_progress_reporter(Box::new(reporter));

        let mut document = Document::new(pdf_path.to_string_lossy());
        pipeline.process(&mut document).await.unwrap();

        let history = observer.history();
        assert!(!history.is_empty());
        // Общий прогресс не убывает и доходит до 100%
        for pair in history.windows(2) {
            assert!(pair[0].total_progress <= pair[1].total_progress);
        }
        assert_eq!(history.last().unwrap().total_progress, 100.0);
    }
}
