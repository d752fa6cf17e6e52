use std::collections::HashSet;

/// Characters stripped from both ends of every token
const STRIP_CHARS: &[char] = &['.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '"', '\''];

/// Splits text into a set of normalized tokens
///
/// Tokens are whitespace-separated, trimmed of surrounding punctuation and
/// lowercased. No stemming, no stopword removal.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|word| word.trim_matches(STRIP_CHARS).to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Joins a token set back into a single space-separated string, sorted for stable output
pub fn tokens_to_string(tokens: &HashSet<String>) -> String {
    let mut sorted: Vec<&str> = tokens.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(" ")
}
