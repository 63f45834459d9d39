//! Модуль синтеза речи
//!
//! Этот модуль содержит интерфейс бэкенда TTS и последовательный
//! движок синтеза по фрагментам.

pub mod engine;
pub mod google;

pub use google::{GoogleTranslateTts, TtsBackend};
