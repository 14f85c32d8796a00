/// Normalize raw text into an ordered token sequence.
///
/// Lowercases the input, replaces every character that is not a Unicode
/// letter or whitespace with a space (accented Latin letters survive,
/// digits and punctuation do not), and splits on whitespace. Splitting
/// collapses consecutive separators and trims the ends.
///
/// Empty or symbol-only text yields an empty token list. Callers must treat
/// that as "no searchable terms" and short-circuit instead of vectorizing.
///
/// # Examples
/// ```
/// use rocchio_recommender::engine::tokenizer::tokenize;
///
/// let tokens = tokenize("  O Senhor dos Anéis, Vol. 1!");
/// assert_eq!(tokens, vec!["o", "senhor", "dos", "anéis", "vol"]);
/// assert!(tokenize("42 !?").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphabetic() || c.is_whitespace() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().map(str::to_owned).collect()
}
