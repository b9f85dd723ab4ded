//! Terminal text helpers

use unicode_width::UnicodeWidthStr;

/// `1234567` -> `"1,234,567"`.
pub fn format_with_commas(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Right-pad `text` with spaces to `width` display columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let shown = UnicodeWidthStr::width(text);
    if shown >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - shown))
}

/// Display width of the widest string.
pub fn max_width<'a, I: IntoIterator<Item = &'a str>>(items: I) -> usize {
    items.into_iter().map(UnicodeWidthStr::width).max().unwrap_or(0)
}
