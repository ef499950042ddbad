/// Parses a line-delimited list
///
/// Every line is trimmed and blank lines are dropped. Order is preserved.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
