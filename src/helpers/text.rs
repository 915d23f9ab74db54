//! Text helpers for listings

/// First `length` characters of `text`.
///
/// Not HTML-aware: a rendered body may be cut inside a tag.
pub fn preview(text: &str, length: usize) -> String {
    match text.char_indices().nth(length) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Estimated minutes to read `text`, rounded up
pub fn reading_time(text: &str, words_per_minute: usize) -> usize {
    let words = text.split(' ').count();
    words.div_ceil(words_per_minute.max(1))
}
