/// Split line-delimited text into URLs.
///
/// Lines are trimmed and blank lines dropped. Order and duplicates are kept
/// exactly as given; nothing else is validated.
pub fn parse_url_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
