//! Модуль для работы с аудио
//!
//! Этот модуль содержит склейку аудиофрагментов в единую дорожку.

pub mod audio;
