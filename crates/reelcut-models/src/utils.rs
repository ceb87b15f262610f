//! Small text helpers shared by input parsing and scoring.

/// Strip a leading UTF-8 byte-order mark, if present.
///
/// # Examples
/// ```
/// use reelcut_models::utils::strip_bom;
/// assert_eq!(strip_bom("\u{feff}{}"), "{}");
/// assert_eq!(strip_bom("{}"), "{}");
/// ```
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Split text into lower-cased words, treating every non-alphanumeric
/// character as a separator.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}
