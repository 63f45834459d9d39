//! Модуль разбиения текста на фрагменты для TTS
//!
//! Этот модуль делит очищенный текст на упорядоченные фрагменты,
//! ограниченные по длине, с уважением границ абзацев и предложений.

use crate::text::split_sentences;

/// Разбить текст на фрагменты не длиннее `max_length` символов
///
/// Первый проход жадно группирует целые абзацы; фрагменты, все еще
/// превышающие лимит, разбиваются по предложениям. Предложение длиннее
/// лимита режется по границам символов. Фрагменты без видимого
/// содержимого отбрасываются.
pub fn split_into_chunks(text: &str, max_length: usize) -> Vec<String> {
    // Первый проход: группируем абзацы
    let mut chunks = Vec::new();
    let mut current_chunk = String::new();

    for paragraph in text.split("\n\n") {
        if current_chunk.len() + paragraph.len() <= max_length {
            current_chunk.push_str(paragraph);
            current_chunk.push_str("\n\n");
        } else {
            if !current_chunk.is_empty() {
                chunks.push(current_chunk.trim().to_string());
            }
            current_chunk = format!("{}\n\n", paragraph);
        }
    }
    if !current_chunk.is_empty() {
        chunks.push(current_chunk.trim().to_string());
    }

    // Второй проход: фрагменты длиннее лимита разбиваем по предложениям
    let mut final_chunks = Vec::new();
    for chunk in chunks {
        if chunk.len() <= max_length {
            final_chunks.push(chunk);
        } else {
            pack_sentences(&chunk, max_length, &mut final_chunks);
        }
    }

    final_chunks
        .into_iter()
        .filter(|chunk| !chunk.trim().is_empty())
        .collect()
}

/// Упаковать предложения фрагмента в подфрагменты в пределах лимита
fn pack_sentences(chunk: &str, max_length: usize, output: &mut Vec<String>) {
    let mut current = String::new();

    for sentence in split_sentences(chunk) {
        // Предложение, которое само не помещается в лимит, режем по символам
        if sentence.len() + 2 > max_length {
            if !current.is_empty() {
                output.push(current.trim().to_string());
                current = String::new();
            }
            push_char_windows(sentence, max_length, output);
            continue;
        }

        if current.len() + sentence.len() + 2 <= max_length {
            current.push_str(sentence);
            current.push_str(". ");
        } else {
            if !current.is_empty() {
                output.push(current.trim().to_string());
            }
            current = format!("{}. ", sentence);
        }
    }

    if !current.is_empty() {
        output.push(current.trim().to_string());
    }
}

/// Разрезать сверхдлинное предложение на куски по границам символов
fn push_char_windows(sentence: &str, max_length: usize, output: &mut Vec<String>) {
    let mut rest = sentence;
    while !rest.is_empty() {
        let split_at = rest
            .char_indices()
            .nth(max_length.max(1))
            .map(|(byte_index, _)| byte_index)
            .unwrap_or(rest.len())
            .min(rest.len());
        let (head, tail) = rest.split_at(split_at);
        let head = head.trim();
        if !head.is_empty() {
            output.push(head.to_string());
        }
        rest = tail;
    }
}
