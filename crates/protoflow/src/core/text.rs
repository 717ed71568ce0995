//! Label text utilities shared by the rendering adapters

use unicode_width::UnicodeWidthStr;

/// Wrap a single line of text on word boundaries so every output line fits
/// within `max_width` display columns.
///
/// Words wider than `max_width` are kept whole on their own line. A
/// `max_width` of 0 disables wrapping.
///
/// # Example
/// ```
/// use protoflow::core::wrap_line;
///
/// let lines = wrap_line("Assess ongoing risk", 10);
/// assert_eq!(lines, vec!["Assess", "ongoing", "risk"]);
/// ```
pub fn wrap_line(line: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || UnicodeWidthStr::width(line) <= max_width {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in line.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);

        if current_width == 0 {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

/// Wrap a label that may already contain explicit line breaks.
///
/// Existing breaks are kept; each line is wrapped independently.
pub fn wrap_label(label: &str, max_width: usize) -> Vec<String> {
    if label.is_empty() {
        return vec![String::new()];
    }
    label
        .split('\n')
        .flat_map(|line| wrap_line(line.trim_end_matches('\r'), max_width))
        .collect()
}
