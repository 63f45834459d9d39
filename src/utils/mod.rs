//! Вспомогательные модули
//!
//! Этот модуль содержит утилиты для работы с временными файлами и FFmpeg.

pub mod temp;
pub mod ffmpeg;
