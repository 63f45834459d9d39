//! Модуль для работы с временными файлами
//!
//! Этот модуль содержит менеджер временных файлов одного запуска
//! конвейера; файлы удаляются на всех путях выхода, включая ошибки.

use std::path::{Path, PathBuf};
use std::fs;
use tempfile::TempDir;
use crate::error::Result;

/// Менеджер временных файлов
pub struct TempFileManager {
    /// Временная директория
    temp_dir: TempDir,
    /// Список созданных файлов
    files: Vec<PathBuf>,
    /// Нужно ли удалять файлы при завершении
    cleanup: bool,
}

impl TempFileManager {
    /// Создать новый экземпляр TempFileManager
    pub fn new(cleanup: bool) -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;

        Ok(Self {
            temp_dir,
            files: Vec::new(),
            cleanup,
        })
    }

    /// Создать пустой временный файл
    pub fn create_temp_file(&mut self, prefix: &str, extension: &str) -> Result<PathBuf> {
        let file_name = format!("{}_{}.{}", prefix, uuid::Uuid::new_v4(), extension);
        let file_path = self.temp_dir.path().join(file_name);

        fs::File::create(&file_path)?;

        self.files.push(file_path.clone());

        Ok(file_path)
    }

    /// Записать данные во временный файл и вернуть его путь
    pub fn write_temp_file(&mut self, prefix: &str, extension: &str, data: &[u8]) -> Result<PathBuf> {
        let file_path = self.create_temp_file(prefix, extension)?;
        fs::write(&file_path, data)?;
        Ok(file_path)
    }

    /// Получить путь к временной директории
    pub fn temp_dir_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Очистить временные файлы
    pub fn cleanup(&mut self) -> Result<()> {
        if self.cleanup {
            for file in &self.files {
                if file.exists() {
                    fs::remove_file(file)?;
                }
            }

            self.files.clear();
        }

        Ok(())
    }
}

impl Drop for TempFileManager {
    fn drop(&mut self) {
        // Пытаемся очистить файлы при уничтожении объекта
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_cleanup() {
        let mut manager = TempFileManager::new(true).unwrap();
        let path = manager.write_temp_file("segment", "mp3", b"audio data").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read(&path).unwrap(), b"audio data");

        manager.cleanup().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_files_removed_on_drop() {
        let path = {
            let mut manager = TempFileManager::new(true).unwrap();
            manager.write_temp_file("segment", "mp3", b"audio data").unwrap()
        };
        assert!(!path.exists());
    }
}
