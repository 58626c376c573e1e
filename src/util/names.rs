//! Display helpers for guest names and counts

/// Avatar initials: first letter of the first two words, uppercased.
///
/// Returns "?" for a blank name.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .take(2)
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

/// Pick the singular or plural noun for a count.
pub fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

/// Truncate to `max` display columns, appending "..." when cut.
pub fn truncate_display(text: &str, max: usize) -> String {
    use unicode_width::UnicodeWidthStr;

    if text.width() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return ".".repeat(max);
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > max - 3 {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push_str("...");
    out
}
