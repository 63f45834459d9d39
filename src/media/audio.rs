//! Модуль склейки аудио
//!
//! Этот модуль объединяет аудиофрагменты в одну дорожку с однократным
//! перекодированием и измеряет реальную длительность результата.

use std::io::Write;
use bytes::Bytes;
use crate::config::PipelineConfig;
use crate::error::{Result, AudiobookError};
use crate::utils::ffmpeg::{run_ffmpeg_command, run_ffprobe_command};
use crate::utils::temp::TempFileManager;

/// Итог склейки аудиофрагментов
#[derive(Debug, Clone)]
pub struct CombinedAudio {
    /// Байты итоговой аудиодорожки
    pub data: Bytes,
    /// Реальная длительность дорожки в секундах, если ее удалось измерить
    pub duration: Option<f64>,
}

/// Объединить упорядоченные аудиофрагменты в одну дорожку
///
/// Единственный фрагмент возвращается без перекодирования. Несколько
/// фрагментов материализуются во временные файлы, склеиваются в порядке
/// входа и перекодируются один раз с фиксированной частотой
/// дискретизации и битрейтом. Временные файлы удаляются и при успехе,
/// и при ошибке.
pub fn combine_segments(segments: &[Bytes], config: &PipelineConfig) -> Result<CombinedAudio> {
    if segments.is_empty() {
        return Err(AudiobookError::AudioProcessing(
            "no audio segments to combine".to_string(),
        ));
    }

    let mut temp = TempFileManager::new(config.cleanup_temp_files)?;

    if segments.len() == 1 {
        // Единственный фрагмент возвращаем как есть
        let segment_path = temp.write_temp_file("segment", "mp3", &segments[0])?;
        let duration = probe_duration(&segment_path.to_string_lossy());
        return Ok(CombinedAudio {
            data: segments[0].clone(),
            duration,
        });
    }

    log::info!("Combining {} audio segments", segments.len());

    // Материализуем фрагменты и пишем список для concat-демультиплексора
    let concat_list_path = temp.create_temp_file("concat_list", "txt")?;
    let mut concat_list = std::fs::File::create(&concat_list_path)?;
    for segment in segments {
        let segment_path = temp.write_temp_file("segment", "mp3", segment)?;
        writeln!(concat_list, "file '{}'", segment_path.display())?;
    }
    drop(concat_list);

    let output_path = temp.temp_dir_path().join("combined.mp3");
    let output_str = output_path.to_string_lossy().to_string();
    let concat_list_str = concat_list_path.to_string_lossy().to_string();
    let sample_rate = config.sample_rate.to_string();

    // Склейка с однократным перекодированием
    run_ffmpeg_command(&[
        "-f", "concat",
        "-safe", "0",
        "-i", &concat_list_str,
        "-ar", &sample_rate,
        "-b:a", &config.bitrate,
        "-codec:a", "libmp3lame",
        "-y", &output_str,
    ])?;

    log::info!("Wrote combined audio");

    let data = Bytes::from(std::fs::read(&output_path)?);
    let duration = probe_duration(&output_str);

    Ok(CombinedAudio { data, duration })
}

/// Измерить длительность аудиофайла через FFprobe
///
/// Неудача измерения не фатальна: без длительности субтитры строятся
/// по модели скорости речи.
pub fn probe_duration(file_path: &str) -> Option<f64> {
    let output = run_ffprobe_command(&[
        "-v", "error",
        "-show_entries", "format=duration",
        "-of", "default=noprint_wrappers=1:nokey=1",
        file_path,
    ]);

    match output {
        Ok(stdout) => match stdout.trim().parse::<f64>() {
            Ok(duration) if duration.is_finite() && duration > 0.0 => Some(duration),
            _ => {
                log::warn!("Failed to parse audio duration: {}", stdout.trim());
                None
            }
        },
        Err(e) => {
            log::warn!("Failed to probe audio duration for {}: {}", file_path, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_segment_returned_unchanged() {
        let config = PipelineConfig::default();
        let segment = Bytes::from_static(b"fake mp3 payload");

        let combined = combine_segments(&[segment.clone()], &config).unwrap();
        assert_eq!(combined.data, segment);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let config = PipelineConfig::default();
        let result = combine_segments(&[], &config);
        assert!(matches!(result, Err(AudiobookError::AudioProcessing(_))));
    }

    #[test]
    fn test_probe_duration_missing_file() {
        assert_eq!(probe_duration("no/such/audio.mp3"), None);
    }
}
