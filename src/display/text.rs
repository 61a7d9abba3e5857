//! Plain-text layout helpers for terminal reports

/// A horizontal rule
pub fn rule(width: usize) -> String {
    "─".repeat(width)
}

/// A heavy horizontal rule
pub fn heavy_rule(width: usize) -> String {
    "═".repeat(width)
}

/// Center a title within `width` columns
pub fn centered(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = width.saturating_sub(len) / 2;
    format!("{}{}", " ".repeat(padding), title)
}

/// Shorten text to at most `max_chars` characters, ending with "..."
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }
    let kept: String = text.chars().take(max_chars - 3).collect();
    format!("{}...", kept)
}
