use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `s` to at most `max_width` display columns, ending in "..."
/// when anything was cut.
pub fn truncate_with_ellipsis(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if s.width() <= max_width {
        return s.to_string();
    }

    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut used = 0;
    let mut truncated = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        truncated.push(c);
    }
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_strings_untouched() {
        assert_eq!(truncate_with_ellipsis("delectus", 20), "delectus");
    }

    #[test]
    fn test_long_strings_cut() {
        assert_eq!(truncate_with_ellipsis("quis ut nam facilis", 10), "quis ut...");
        assert_eq!(truncate_with_ellipsis("abcdef", 2), "..");
        assert_eq!(truncate_with_ellipsis("abcdef", 0), "");
    }

    #[test]
    fn test_wide_chars_count_double() {
        assert_eq!(truncate_with_ellipsis("日本語のタイトル", 9), "日本語...");
    }
}
