//! Модуль для отслеживания прогресса выполнения операций
//!
//! Этот модуль предоставляет реализацию паттерна Observer для асинхронного
//! отслеживания прогресса обработки документа в библиотеке pdf-audiobook.

use std::collections::HashMap;
use std::sync::{RwLock, atomic::{AtomicUsize, Ordering}};
use serde::{Serialize, Deserialize};

/// Информация о прогрессе выполнения операции
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressInfo {
    /// Текущий этап операции
    pub step: String,
    /// Процент выполнения текущего этапа (0.0 - 100.0)
    pub step_progress: f32,
    /// Общий процент выполнения всей операции (0.0 - 100.0)
    pub total_progress: f32,
    /// Дополнительная информация о текущем этапе
    pub details: Option<String>,
}

impl ProgressInfo {
    /// Создает новый экземпляр ProgressInfo
    pub fn new(step: impl Into<String>, step_progress: f32, total_progress: f32, details: Option<String>) -> Self {
        Self {
            step: step.into(),
            step_progress: step_progress.clamp(0.0, 100.0),
            total_progress: total_progress.clamp(0.0, 100.0),
            details,
        }
    }
}

/// Трейт для наблюдателя, получающего уведомления о прогрессе
pub trait ProgressObserver: Send + Sync {
    /// Метод, вызываемый при обновлении прогресса
    fn on_progress_update(&self, progress: ProgressInfo);
}

/// Трейт для объекта, отправляющего уведомления о прогрессе
pub trait ProgressReporter: Send + Sync {
    /// Добавить наблюдателя
    ///
    /// Возвращает уникальный идентификатор наблюдателя, который можно использовать
    /// для его удаления в будущем.
    fn add_observer(&mut self, observer: Box<dyn ProgressObserver>) -> usize;

    /// Удалить наблюдателя по идентификатору
    ///
    /// Возвращает удаленного наблюдателя, если он был найден.
    fn remove_observer(&mut self, id: usize) -> Option<Box<dyn ProgressObserver>>;

    /// Уведомить всех наблюдателей о прогрессе
    fn notify_progress(&self, progress: ProgressInfo);
}

/// Реализация ProgressReporter для отслеживания прогресса
pub struct DefaultProgressReporter {
    /// Список наблюдателей
    observers: RwLock<HashMap<usize, Box<dyn ProgressObserver>>>,
    /// Счетчик для генерации уникальных идентификаторов наблюдателей
    next_id: AtomicUsize,
}

impl DefaultProgressReporter {
    /// Создать новый экземпляр DefaultProgressReporter
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(HashMap::new()),
            next_id: AtomicUsize::new(0),
        }
    }

    /// Получить следующий уникальный идентификатор
    fn next_id(&self) -> usize {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for DefaultProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for DefaultProgressReporter {
    fn add_observer(&mut self, observer: Box<dyn ProgressObserver>) -> usize {
        let id = self.next_id();
        let mut observers = self.observers.write().unwrap();
        observers.insert(id, observer);
        id
    }

    fn remove_observer(&mut self, id: usize) -> Option<Box<dyn ProgressObserver>> {
        let mut observers = self.observers.write().unwrap();
        observers.remove(&id)
    }

    fn notify_progress(&self, progress: ProgressInfo) {
        let observers = self.observers.read().unwrap();
        for observer in observers.values() {
            observer.on_progress_update(progress.clone());
        }
    }
}

/// Этапы обработки документа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessStep {
    /// Извлечение текста из PDF
    TextExtraction,
    /// Генерация речи по фрагментам
    SpeechGeneration,
    /// Склейка аудиофрагментов
    AudioAssembly,
    /// Генерация синхронизированных субтитров
    CaptionGeneration,
}

impl ProcessStep {
    /// Получить название этапа в виде строки
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextExtraction => "Извлечение текста",
            Self::SpeechGeneration => "Генерация речи",
            Self::AudioAssembly => "Склейка аудио",
            Self::CaptionGeneration => "Генерация субтитров",
        }
    }

    /// Получить долю этапа в шкале прогресса документа
    ///
    /// Извлечение текста не продвигает шкалу; генерация речи занимает
    /// первую половину, после склейки аудио шкала достигает 90%,
    /// субтитры закрывают остаток.
    pub fn weight(&self) -> f32 {
        match self {
            Self::TextExtraction => 0.0,
            Self::SpeechGeneration => 50.0,
            Self::AudioAssembly => 40.0,
            Self::CaptionGeneration => 10.0,
        }
    }

    /// Сумма весов всех этапов
    pub fn total_weight() -> f32 {
        100.0
    }
}

/// Трекер прогресса для отслеживания выполнения процесса
pub struct ProgressTracker {
    /// Репортер прогресса
    reporter: Option<Box<dyn ProgressReporter>>,
    /// Текущий этап
    current_step: RwLock<ProcessStep>,
    /// Прогресс текущего этапа (0.0 - 100.0)
    step_progress: RwLock<f32>,
    /// Общий прогресс (0.0 - 100.0)
    total_progress: RwLock<f32>,
    /// Завершенные этапы
    completed_steps: RwLock<HashMap<ProcessStep, f32>>,
}

impl ProgressTracker {
    /// Создать новый экземпляр ProgressTracker
    pub fn new() -> Self {
        Self {
            reporter: None,
            current_step: RwLock::new(ProcessStep::TextExtraction),
            step_progress: RwLock::new(0.0),
            total_progress: RwLock::new(0.0),
            completed_steps: RwLock::new(HashMap::new()),
        }
    }

    /// Создать новый экземпляр ProgressTracker с репортером
    pub fn with_reporter(reporter: Box<dyn ProgressReporter>) -> Self {
        Self {
            reporter: Some(reporter),
            current_step: RwLock::new(ProcessStep::TextExtraction),
            step_progress: RwLock::new(0.0),
            total_progress: RwLock::new(0.0),
            completed_steps: RwLock::new(HashMap::new()),
        }
    }

    /// Установить репортер прогресса
    pub fn set_reporter(&mut self, reporter: Box<dyn ProgressReporter>) {
        self.reporter = Some(reporter);
    }

    /// Добавить наблюдателя
    pub fn add_observer(&mut self, observer: Box<dyn ProgressObserver>) -> Option<usize> {
        self.reporter.as_mut().map(|reporter| reporter.add_observer(observer))
    }

    /// Сбросить трекер к началу нового запуска
    pub fn reset(&self) {
        *self.current_step.write().unwrap() = ProcessStep::TextExtraction;
        *self.step_progress.write().unwrap() = 0.0;
        *self.total_progress.write().unwrap() = 0.0;
        self.completed_steps.write().unwrap().clear();
    }

    /// Установить текущий этап
    pub fn set_step(&self, step: ProcessStep) {
        // Если этап меняется, считаем предыдущий этап завершенным на 100%
        let mut current_step = self.current_step.write().unwrap();
        if *current_step != step {
            let mut completed_steps = self.completed_steps.write().unwrap();
            completed_steps.insert(*current_step, 100.0);
            *current_step = step;
            drop(completed_steps);
            drop(current_step);

            let mut step_progress = self.step_progress.write().unwrap();
            *step_progress = 0.0;
            drop(step_progress);

            self.update_total_progress();
            self.report_progress(None);
        }
    }

    /// Обновить прогресс текущего этапа
    pub fn update_step_progress(&self, progress: f32, details: Option<String>) {
        let mut step_progress = self.step_progress.write().unwrap();
        *step_progress = progress.clamp(0.0, 100.0);
        drop(step_progress);

        self.update_total_progress();
        self.report_progress(details);
    }

    /// Получить общий прогресс (0.0 - 100.0)
    pub fn total_progress(&self) -> f32 {
        *self.total_progress.read().unwrap()
    }

    /// Обновить общий прогресс на основе прогресса этапов
    ///
    /// Знаменатель фиксирован (сумма весов всех этапов), поэтому общий
    /// прогресс не убывает при движении конвейера вперед.
    fn update_total_progress(&self) {
        let mut total = 0.0;

        // Учитываем завершенные этапы
        let completed_steps = self.completed_steps.read().unwrap();
        for (step, progress) in completed_steps.iter() {
            total += step.weight() * progress / 100.0;
        }
        drop(completed_steps);

        // Учитываем текущий этап
        let current_step = self.current_step.read().unwrap();
        let step_progress = self.step_progress.read().unwrap();
        total += current_step.weight() * *step_progress / 100.0;

        // Веса в сумме дают 100, поэтому сумма и есть процент
        let mut total_progress = self.total_progress.write().unwrap();
        *total_progress = total.clamp(0.0, ProcessStep::total_weight());
    }

    /// Отправить уведомление о прогрессе
    fn report_progress(&self, details: Option<String>) {
        if let Some(reporter) = &self.reporter {
            let current_step = self.current_step.read().unwrap();
            let step_progress = self.step_progress.read().unwrap();
            let total_progress = self.total_progress.read().unwrap();

            let progress = ProgressInfo::new(
                current_step.as_str(),
                *step_progress,
                *total_progress,
                details,
            );
            reporter.notify_progress(progress);
        }
    }

    /// Отметить завершение всего процесса
    pub fn complete(&self) {
        let current_step = self.current_step.read().unwrap();
        let mut completed_steps = self.completed_steps.write().unwrap();
        completed_steps.insert(*current_step, 100.0);
        drop(completed_steps);
        drop(current_step);

        let mut total_progress = self.total_progress.write().unwrap();
        *total_progress = 100.0;
        drop(total_progress);

        self.report_progress(Some("Обработка завершена".to_string()));
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}
