//! Tokenization shared by the text analyzers.

/// Sentence boundary characters.
pub const SENTENCE_BOUNDARIES: [char; 3] = ['.', '!', '?'];

/// Whitespace-separated tokens, empty tokens discarded.
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Sentences split on `.`, `!` and `?`; blank segments discarded.
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(|c| SENTENCE_BOUNDARIES.contains(&c))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lowercase a token and trim surrounding punctuation.
///
/// Returns an empty string for tokens made only of punctuation.
pub fn normalize_word(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Normalized tokens, punctuation-only tokens discarded.
pub fn normalized_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize_word)
        .filter(|w| !w.is_empty())
        .collect()
}

/// Check that the byte span `start..end` of `text` is not glued to a
/// neighbouring alphanumeric character.
pub fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Convert a byte offset into a character offset.
pub fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

/// Up to `radius` characters on each side of the byte span `start..end`.
pub fn context_window(text: &str, start: usize, end: usize, radius: usize) -> String {
    let before: Vec<char> = text[..start].chars().rev().take(radius).collect();
    let after: String = text[end..].chars().take(radius).collect();

    let mut window: String = before.into_iter().rev().collect();
    window.push_str(&text[start..end]);
    window.push_str(&after);
    window
}

/// Round to a fixed number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentences_discard_empty_segments() {
        let parts = sentences("Oi. Tudo bem?! Sim...");
        assert_eq!(parts, vec!["Oi", "Tudo bem", "Sim"]);
        assert!(sentences("  ...  ").is_empty());
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("Feliz."), "feliz");
        assert_eq!(normalize_word("\"Você\","), "você");
        assert_eq!(normalize_word("..."), "");
    }

    #[test]
    fn test_whole_word_unicode() {
        let text = "avcs vcs";
        assert!(!is_whole_word(text, 1, 4));
        assert!(is_whole_word(text, 5, 8));

        // accented neighbour counts as a letter
        let text = "évc";
        assert!(!is_whole_word(text, 2, 4));
    }

    #[test]
    fn test_context_window_is_char_based() {
        let text = "ação vc não";
        let start = text.find("vc").unwrap();
        assert_eq!(context_window(text, start, start + 2, 2), "o vc n");
        assert_eq!(char_offset(text, start), 5);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(55.5555, 1), 55.6);
        assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
    }
}
