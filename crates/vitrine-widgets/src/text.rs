#![forbid(unsafe_code)]

//! Free-text helpers shared by the menu and carousel.

/// Delimiter used in catalog descriptions to separate bullet items.
pub const BULLET: char = '•';

/// Segment a bullet-delimited description into trimmed items.
///
/// Empty segments (leading, trailing, or doubled delimiters) are discarded.
///
/// # Example
///
/// ```
/// use vitrine_widgets::text::bullet_points;
///
/// assert_eq!(
///     bullet_points("dry roads • low wear •  quiet "),
///     vec!["dry roads", "low wear", "quiet"]
/// );
/// ```
#[must_use]
pub fn bullet_points(text: &str) -> Vec<String> {
    text.split(BULLET)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
