use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// `HH:MM:SS`. Hours wrap at 100 to keep the column two digits wide.
pub fn format_elapsed(total_seconds: u64) -> String {
    let hours = (total_seconds / 3600) % 100;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

pub fn format_percent(fraction: Option<f64>) -> String {
    match fraction {
        Some(f) => format!("{:.1}%", f * 100.0),
        None => "n/a".to_string(),
    }
}

pub fn format_optional<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_examples() {
        assert_eq!(format_elapsed(3661), "01:01:01");
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(59), "00:00:59");
        assert_eq!(format_elapsed(99 * 3600 + 59 * 60 + 59), "99:59:59");
    }

    #[test]
    fn elapsed_hours_wrap_at_one_hundred() {
        assert_eq!(format_elapsed(360_000), "00:00:00");
        assert_eq!(format_elapsed(360_000 + 3661), "01:01:01");
    }

    #[test]
    fn percent_and_unavailable() {
        assert_eq!(format_percent(Some(0.153)), "15.3%");
        assert_eq!(format_percent(Some(1.5)), "150.0%");
        assert_eq!(format_percent(None), "n/a");
        assert_eq!(format_optional(Some(12)), "12");
        assert_eq!(format_optional::<u64>(None), "n/a");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_unicode("short", 10), "short");
        assert_eq!(truncate_unicode("/usr/bin/python3", 8), "/usr/bi\u{2026}");
    }
}
