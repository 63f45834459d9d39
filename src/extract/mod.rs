//! Модуль извлечения текста из PDF
//!
//! Этот модуль объединяет постраничное извлечение текста и его
//! последующую очистку для синтеза речи.

pub mod pdf;
pub mod clean;

use crate::config::PipelineConfig;
use crate::error::Result;

/// Извлечь, очистить и ограничить по длине текст документа
pub async fn extract_document_text(pdf_path: &str, config: &PipelineConfig) -> Result<String> {
    let raw_text = pdf::extract_text(pdf_path, config.extraction_workers).await?;
    let cleaned = clean::clean_for_tts(&raw_text);
    Ok(clean::truncate_for_processing(&cleaned, config.max_text_length))
}
