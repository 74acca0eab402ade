use serde::Serialize;

/// Pretty-prints `value` for a DEBUG log line, cut to at most `max_chars` characters.
///
/// Serialization is skipped entirely unless DEBUG is enabled; pricing listings
/// can run to megabytes.
pub(crate) fn with_pretty_json_debug<T, F>(value: &T, max_chars: usize, log_action: F)
where
    T: Serialize,
    F: FnOnce(&str),
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let pretty_json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|error| format!("<pretty serialize failed: {error}>"));
    log_action(truncate_chars(&pretty_json, max_chars).as_str());
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}... ({} bytes total)", &text[..cut], text.len()),
        None => text.to_string(),
    }
}
