//! Модуль извлечения текста из PDF
//!
//! Этот модуль содержит функции постраничного извлечения текста с
//! ограниченным пулом обработчиков и сохранением исходного порядка страниц.

use std::path::Path;
use std::sync::Arc;
use futures::future::join_all;
use tokio::sync::Semaphore;
use crate::error::{Result, AudiobookError};

/// Извлечь текст из всех страниц PDF файла
///
/// Страницы обрабатываются параллельно, не более `max_workers` одновременно.
/// Результаты записываются в слоты, индексированные позицией страницы,
/// поэтому порядок завершения задач не влияет на порядок текста.
/// Ошибка извлечения отдельной страницы дает пустую строку; ошибка
/// разбора всего файла фатальна.
pub async fn extract_text<P: AsRef<Path>>(pdf_path: P, max_workers: usize) -> Result<String> {
    let pdf_path = pdf_path.as_ref().to_path_buf();
    if !pdf_path.exists() {
        return Err(AudiobookError::FileNotFound(format!(
            "Input PDF file not found: {}",
            pdf_path.display()
        )));
    }

    // Разбор всего документа выполняется в блокирующем пуле
    let document = tokio::task::spawn_blocking(move || lopdf::Document::load(&pdf_path))
        .await
        .map_err(|e| AudiobookError::PdfExtraction(format!("PDF load task failed: {}", e)))?
        .map_err(|e| AudiobookError::PdfExtraction(format!("Failed to parse PDF: {}", e)))?;

    let document = Arc::new(document);
    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    let total_pages = page_numbers.len();
    log::info!("Extracting text from {} pages", total_pages);

    // Семафор ограничивает количество одновременных обработчиков страниц
    let semaphore = Arc::new(Semaphore::new(max_workers.max(1)));
    let mut tasks = Vec::new();

    for (i, page_number) in page_numbers.into_iter().enumerate() {
        let document = document.clone();
        let semaphore = semaphore.clone();

        let task = tokio::spawn(async move {
            // Получаем разрешение от семафора
            let _permit = semaphore.acquire().await.unwrap();

            let result =
                tokio::task::spawn_blocking(move || document.extract_text(&[page_number])).await;

            match result {
                Ok(Ok(text)) => (i, text),
                Ok(Err(e)) => {
                    log::warn!("Error extracting page {}: {}", i, e);
                    (i, String::new())
                }
                Err(e) => {
                    log::warn!("Extraction task for page {} panicked: {}", i, e);
                    (i, String::new())
                }
            }
        });

        tasks.push(task);
    }

    let results = join_all(tasks).await;

    // Фиксированные слоты по индексу страницы: порядок завершения
    // конкурентных задач не меняет порядок вывода
    let mut slots: Vec<Option<String>> = vec![None; total_pages];
    for result in results {
        if let Ok((i, text)) = result {
            slots[i] = Some(text);
        }
    }

    let text = slots
        .into_iter()
        .flatten()
        .filter(|page_text| !page_text.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(text)
}
