const MAX_VISIBLE_CHARS: usize = 120;

/// Shortens transcript text for log lines. Transcripts of long recordings
/// run to tens of kilobytes; logs only need enough to identify the content.
pub fn sanitize_transcript(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    if trimmed.chars().count() > MAX_VISIBLE_CHARS {
        let visible: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", visible, trimmed.chars().count())
    } else {
        trimmed.to_string()
    }
}
