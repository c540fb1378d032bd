/// Normalize text into lowercase word tokens.
///
/// Lowercases, maps every character outside ASCII `[a-z0-9]` and whitespace to
/// a space, then splits on whitespace runs. Empty input yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}
