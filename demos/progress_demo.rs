//! Пример использования системы прогресса и уведомлений
//!
//! Этот пример демонстрирует, как использовать систему прогресса и уведомлений
//! при работе с библиотекой pdf-audiobook.

use pdf_audiobook::{
    AudiobookPipeline,
    config::{Accent, PipelineConfig, VoiceStyle},
    document::Document,
    progress::DefaultProgressReporter,
    notification::{
        ConsoleProgressObserver, ProgressBarObserver,
        FileProgressObserver, CompositeProgressObserver,
    },
};
use pdf_audiobook::progress::ProgressReporter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Инициализируем логирование
    env_logger::init();

    // Путь к исходному документу
    let pdf_path = std::env::args().nth(1).unwrap_or_else(|| "book.pdf".to_string());

    println!("Пример 1: Использование функции-обертки с прогрессом");

    // Создаем репортер прогресса
    let mut reporter = DefaultProgressReporter::new();

    // Создаем комбинированный наблюдатель
    let mut composite_observer = CompositeProgressObserver::new();

    // Добавляем наблюдатель для вывода в консоль
    composite_observer.add_observer(Box::new(ConsoleProgressObserver::new()));

    // Добавляем наблюдатель для отображения прогресс-бара
    composite_observer.add_observer(Box::new(ProgressBarObserver::new(50)));

    // Добавляем наблюдатель для записи в файл
    composite_observer.add_observer(Box::new(FileProgressObserver::new("progress.log")));

    // Добавляем комбинированный наблюдатель к репортеру
    reporter.add_observer(Box::new(composite_observer));

    // Используем функцию-обертку с поддержкой прогресса
    let mut document = Document::new(pdf_path.clone());
    let result = pdf_audiobook::generate_audiobook_with_progress(
        &mut document,
        PipelineConfig::default(),
        Box::new(reporter),
    )
    .await?;

    println!("Озвучивание завершено. Выходной файл: {}", result);

    println!("\nПример 2: Использование объекта AudiobookPipeline с настраиваемой конфигурацией");

    // Создаем конфигурацию
    let config = PipelineConfig {
        output_dir: "audio".to_string(),
        target_words_per_line: 10,
        ..PipelineConfig::default()
    };

    // Создаем новый репортер прогресса
    let reporter = DefaultProgressReporter::new();

    // Создаем конвейер с репортером прогресса
    let mut pipeline = AudiobookPipeline::with_progress_reporter(config, Box::new(reporter));

    // Добавляем наблюдатель для вывода в консоль
    pipeline.add_observer(Box::new(ConsoleProgressObserver::with_prefix("[Custom] ")))?;

    // Добавляем наблюдатель для отображения прогресс-бара
    pipeline.add_observer(Box::new(ProgressBarObserver::new(50)))?;

    // Запускаем обработку документа с выбранным голосом
    let mut document = Document::with_voice(pdf_path, VoiceStyle::Calm, Accent::Uk);
    let result = pipeline.process(&mut document).await?;

    println!("Пользовательское озвучивание завершено. Выходной файл: {}", result);
    if let Some(captions) = &document.captions {
        println!("Субтитров сгенерировано: {} строк", captions.len());
    }

    Ok(())
}
