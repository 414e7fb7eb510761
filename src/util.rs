//! Shared utility functions

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `s` to at most `max` display columns, marking the cut with "…".
///
/// Widths come from `unicode-width`, so CJK and emoji count as two columns.
///
/// # Examples
///
/// ```
/// use searchkro_admin::util::truncate_width;
///
/// assert_eq!(truncate_width("Delhi", 10), "Delhi");
/// assert_eq!(truncate_width("Electronics", 6), "Elect…");
/// ```
pub fn truncate_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Pad `s` with spaces to exactly `width` display columns, truncating if longer
pub fn fit_width(s: &str, width: usize) -> String {
    let cut = truncate_width(s, width);
    let pad = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_untouched() {
        assert_eq!(truncate_width("Delhi", 10), "Delhi");
    }

    #[test]
    fn test_long_text_gets_ellipsis() {
        assert_eq!(truncate_width("Electronics", 6), "Elect…");
    }

    #[test]
    fn test_wide_characters_count_double() {
        let cut = truncate_width("日本語テキスト", 5);
        assert_eq!(cut, "日本…");
        assert!(cut.width() <= 5);
    }

    #[test]
    fn test_zero_width_budget() {
        assert_eq!(truncate_width("abc", 0), "");
    }

    #[test]
    fn test_fit_width_pads_and_cuts() {
        assert_eq!(fit_width("ab", 4), "ab  ");
        assert_eq!(fit_width("abcdef", 4), "abc…");
        assert_eq!(fit_width("日本", 5), "日本 ");
    }
}
