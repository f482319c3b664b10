/// Cleans up parsed game title so it can be safely passed through the selector's text stream.
///
/// Anything outside of ASCII is dropped rather than replaced, so `Soon™` becomes `Soon`.
pub fn to_ascii_title(title: impl AsRef<str>) -> String {
    title.as_ref().chars().filter(char::is_ascii).collect()
}
