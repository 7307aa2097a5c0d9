use std::sync::LazyLock;

use regex::Regex;

/// A number in parentheses surrounded by spaces, e.g. `Show S01E05 (005) 1080p.mkv`
static PATH_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \((\d+)\) ").expect("path pattern is valid"));

/// A number in parentheses anywhere, e.g. `Episode (12)`
static NAME_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)\)").expect("name pattern is valid"));

/// Only the first match counts; zero or values beyond u32 yield nothing.
fn first_positive_number(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures(text)?
        .get(1)?
        .as_str()
        .parse::<u32>()
        .ok()
        .filter(|number| *number > 0)
}

/// Extract the absolute episode number from a media file path
pub fn extract_from_path(path: &str) -> Option<u32> {
    first_positive_number(&PATH_NUMBER, path)
}

/// Extract the absolute episode number from an episode display name
pub fn extract_from_name(name: &str) -> Option<u32> {
    first_positive_number(&NAME_NUMBER, name)
}

/// Determine the absolute episode number of an item
///
/// The path is authoritative whenever one is present. The name is only
/// consulted for items without a path, so a path without a number is not
/// rescued by a numbered name.
pub fn absolute_number(path: Option<&str>, name: Option<&str>) -> Option<u32> {
    let path = path.filter(|p| !p.is_empty());
    let name = name.filter(|n| !n.is_empty());

    match (path, name) {
        (Some(path), _) => extract_from_path(path),
        (None, Some(name)) => extract_from_name(name),
        (None, None) => None,
    }
}
