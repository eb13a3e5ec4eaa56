//! Text normalization shared by registry domain types.

/// Trims `value` and returns it, or `None` when nothing remains.
///
/// Used wherever an empty or whitespace-only string means "absent".
pub(crate) fn non_blank(value: impl Into<String>) -> Option<String> {
    let raw = value.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == raw.len() {
        Some(raw)
    } else {
        Some(trimmed.to_owned())
    }
}

/// Applies [`non_blank`] to an optional input.
pub(crate) fn non_blank_opt(value: Option<String>) -> Option<String> {
    value.and_then(non_blank)
}
