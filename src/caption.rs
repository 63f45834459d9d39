//! Модуль генерации синхронизированных субтитров
//!
//! Этот модуль группирует исходный текст в строки субтитров и
//! распределяет тайминги либо пропорционально известной длительности
//! аудио, либо по модели скорости речи, когда длительность недоступна.

use crate::document::CaptionLine;
use crate::error::{Result, AudiobookError};
use crate::text::split_sentences;

/// Сгруппировать текст в строки субтитров
///
/// Предложения жадно упаковываются в строки до целевого количества
/// слов; предложение, которое само превышает цель, все равно образует
/// отдельную строку — середина предложения никогда не разрывается.
pub fn group_caption_lines(text: &str, target_words: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for sentence in split_sentences(text) {
        let sentence_words = sentence.split_whitespace().count();
        let current_words = current_line.split_whitespace().count();

        if current_words + sentence_words <= target_words {
            if current_line.is_empty() {
                current_line = sentence.to_string();
            } else {
                current_line.push(' ');
                current_line.push_str(sentence);
            }
        } else {
            if !current_line.is_empty() {
                lines.push(current_line);
            }
            current_line = sentence.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Построить субтитры по известной длительности аудио
///
/// Общая длительность делится поровну между строками; первая строка
/// начинается с 0.0, смещения округляются до 2 знаков.
pub fn captions_from_duration(
    text: &str,
    total_duration: f64,
    target_words: usize,
) -> Result<Vec<CaptionLine>> {
    if !total_duration.is_finite() || total_duration <= 0.0 {
        return Err(AudiobookError::CaptionGeneration(format!(
            "invalid audio duration: {}",
            total_duration
        )));
    }

    let lines = group_caption_lines(text, target_words);
    if lines.is_empty() {
        return Ok(Vec::new());
    }

    let time_per_line = total_duration / lines.len() as f64;

    Ok(lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| CaptionLine::new(round2(i as f64 * time_per_line), line))
        .collect())
}

/// Построить субтитры по модели скорости речи
///
/// Резервный режим для случая, когда реальная длительность аудио
/// недоступна: длительность строки равна числу ее слов, деленному на
/// скорость речи, плюс фиксированная пауза между строками.
pub fn captions_from_rate(
    text: &str,
    words_per_minute: f64,
    line_pause_seconds: f64,
    target_words: usize,
) -> Vec<CaptionLine> {
    let words_per_second = words_per_minute / 60.0;
    let mut current_time = 0.0;

    group_caption_lines(text, target_words)
        .into_iter()
        .map(|line| {
            let caption = CaptionLine::new(round2(current_time), line);
            let word_count = caption.text.split_whitespace().count() as f64;
            current_time += word_count / words_per_second + line_pause_seconds;
            caption
        })
        .collect()
}

/// Округлить до 2 знаков после запятой
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_line() {
        // 5 слов при цели 12 — остается одна строка со смещением 0.0
        let captions = captions_from_rate("Hello world. This is a test.", 80.0, 0.5, 12);
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].time, 0.0);
        assert_eq!(captions[0].text, "Hello world This is a test");
    }

    #[test]
    fn test_oversize_sentence_keeps_own_line() {
        let text = "One two three four five six seven eight nine ten eleven twelve thirteen fourteen. Short one.";
        let lines = group_caption_lines(text, 12);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("One two"));
        assert_eq!(lines[1], "Short one");
    }

    #[test]
    fn test_duration_mode_uniform_offsets() {
        let text = "First sentence with several words inside it here now. \
                    Second sentence with several words inside it here now. \
                    Third sentence with several words inside it here now. \
                    Fourth sentence with several words inside it here now.";
        let captions = captions_from_duration(text, 10.0, 12).unwrap();
        assert_eq!(captions.len(), 4);
        assert_eq!(captions[0].time, 0.0);
        assert_eq!(captions[1].time, 2.5);
        assert_eq!(captions[2].time, 5.0);
        assert_eq!(captions[3].time, 7.5);
        // Последнее смещение строго меньше длительности
        assert!(captions[3].time < 10.0);
    }

    #[test]
    fn test_duration_mode_offsets_are_rounded() {
        let text = "Alpha one two three four five six seven eight nine ten eleven. \
                    Bravo one two three four five six seven eight nine ten eleven. \
                    Charlie one two three four five six seven eight nine ten eleven.";
        let captions = captions_from_duration(text, 10.0, 12).unwrap();
        assert_eq!(captions.len(), 3);
        // 10 / 3 = 3.3333.. -> 3.33
        assert_eq!(captions[1].time, 3.33);
        assert_eq!(captions[2].time, 6.67);
    }

    #[test]
    fn test_rate_mode_gaps_respect_pause_floor() {
        let text = "Alpha one two three four five six seven eight nine ten eleven. \
                    Bravo one two three four five six seven eight nine ten eleven. \
                    Charlie one two three four five six seven eight nine ten eleven.";
        let captions = captions_from_rate(text, 80.0, 0.5, 12);
        assert!(captions.len() >= 2);

        for pair in captions.windows(2) {
            let gap = pair[1].time - pair[0].time;
            // Смещения строго возрастают, зазор не меньше паузы
            assert!(gap >= 0.5, "gap {} below pause floor", gap);
        }
    }

    #[test]
    fn test_rate_mode_accumulates_durations() {
        // 12 слов при 80 словах в минуту: 12 / (80/60) = 9 секунд + пауза 0.5
        let text = "One two three four five six seven eight nine ten eleven twelve. Next line starts here.";
        let captions = captions_from_rate(text, 80.0, 0.5, 12);
        assert_eq!(captions.len(), 2);
        assert_eq!(captions[0].time, 0.0);
        assert_eq!(captions[1].time, 9.5);
    }

    #[test]
    fn test_empty_text_yields_empty_captions() {
        assert!(captions_from_duration("", 10.0, 12).unwrap().is_empty());
        assert!(captions_from_rate("", 80.0, 0.5, 12).is_empty());
    }

    #[test]
    fn test_invalid_duration_is_an_error() {
        assert!(captions_from_duration("Some text.", 0.0, 12).is_err());
        assert!(captions_from_duration("Some text.", f64::NAN, 12).is_err());
    }
}
