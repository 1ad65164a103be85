//! Shared formatting utilities for sizes, percentages and durations

use console::Emoji;

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Rocket emoji for publishing
pub const ROCKET: Emoji = Emoji("🚀", ">");

/// Render an emoji, or its text fallback when `NO_EMOJI` is set
pub fn icon(emoji: Emoji<'_, '_>) -> String {
    if std::env::var_os("NO_EMOJI").is_some() {
        emoji.1.to_string()
    } else {
        emoji.to_string()
    }
}

const SIZE_UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];

/// Format a byte count as a human-readable size (SI units, base 1000)
///
/// Up to two decimals are kept, trailing zeros are dropped.
///
/// # Examples
///
/// ```
/// use bundle_diff::fmt::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(12_300), "12.3 kB");
/// assert_eq!(format_size(2_500_000), "2.5 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    if bytes < 1000 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    // 999_995 rounds up to "1000 kB"; promote it to the next unit instead
    if round_two(value) >= 1000.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    format!("{} {}", trim_decimals(value), SIZE_UNITS[unit])
}

/// Format a signed size change, with an explicit `+` for growth
///
/// # Examples
///
/// ```
/// use bundle_diff::fmt::format_size_change;
///
/// assert_eq!(format_size_change(1_200), "+1.2 kB");
/// assert_eq!(format_size_change(-200), "-200 B");
/// assert_eq!(format_size_change(0), "0 B");
/// ```
pub fn format_size_change(diff: i64) -> String {
    let formatted = format_size(diff.unsigned_abs());
    match diff.signum() {
        1 => format!("+{}", formatted),
        -1 => format!("-{}", formatted),
        _ => formatted,
    }
}

/// Format a percentage change with two decimals
///
/// `None` marks a change from zero, which has no meaningful percentage.
///
/// # Examples
///
/// ```
/// use bundle_diff::fmt::format_percentage;
///
/// assert_eq!(format_percentage(Some(20.0)), "+20.00%");
/// assert_eq!(format_percentage(Some(-4.567)), "-4.57%");
/// assert_eq!(format_percentage(Some(0.0)), "0.00%");
/// assert_eq!(format_percentage(None), "new");
/// ```
pub fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        None => "new".to_string(),
        Some(value) => {
            let rounded = round_two(value);
            if rounded > 0.0 {
                format!("+{:.2}%", rounded)
            } else if rounded < 0.0 {
                format!("{:.2}%", rounded)
            } else {
                "0.00%".to_string()
            }
        }
    }
}

/// Format a duration in milliseconds as `m`/`s`/`ms` components
///
/// # Examples
///
/// ```
/// use bundle_diff::fmt::format_duration;
///
/// assert_eq!(format_duration(62_005), "1m 2s 5ms");
/// assert_eq!(format_duration(350), "350ms");
/// assert_eq!(format_duration(0), "0ms");
/// ```
pub fn format_duration(millis: u64) -> String {
    let minutes = millis / 60_000;
    let seconds = (millis % 60_000) / 1000;
    let ms = millis % 1000;

    let mut parts = Vec::with_capacity(3);
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 {
        parts.push(format!("{}s", seconds));
    }
    if ms > 0 || parts.is_empty() {
        parts.push(format!("{}ms", ms));
    }

    parts.join(" ")
}

/// Format a signed duration change in milliseconds
///
/// # Examples
///
/// ```
/// use bundle_diff::fmt::format_duration_change;
///
/// assert_eq!(format_duration_change(62_005), "+1m 2s 5ms");
/// assert_eq!(format_duration_change(-350), "-350ms");
/// assert_eq!(format_duration_change(0), "0ms");
/// ```
pub fn format_duration_change(millis: i64) -> String {
    let formatted = format_duration(millis.unsigned_abs());
    match millis.signum() {
        1 => format!("+{}", formatted),
        -1 => format!("-{}", formatted),
        _ => formatted,
    }
}

fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn trim_decimals(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_various_sizes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(999), "999 B");
        assert_eq!(format_size(1000), "1 kB");
        assert_eq!(format_size(1536), "1.54 kB");
        assert_eq!(format_size(1_000_000), "1 MB");
        assert_eq!(format_size(3_210_000_000), "3.21 GB");
    }

    #[test]
    fn test_format_size_promotes_rounded_unit_boundary() {
        assert_eq!(format_size(999_999), "1 MB");
        assert_eq!(format_size(999_994), "999.99 kB");
    }

    #[test]
    fn test_format_size_change_extremes_keep_sign() {
        assert_eq!(format_size_change(-1_500), "-1.5 kB");
        assert!(format_size_change(i64::MIN).starts_with('-'));
        assert!(format_size_change(i64::MAX).starts_with('+'));
    }

    #[test]
    fn test_format_size_largest_values_use_top_unit() {
        assert!(format_size(u64::MAX).ends_with(" TB"));
    }

    #[test]
    fn test_format_size_change_signs() {
        assert_eq!(format_size_change(500), "+500 B");
        assert_eq!(format_size_change(-12_300), "-12.3 kB");
    }

    #[test]
    fn test_format_percentage_rounds_to_zero_without_sign() {
        assert_eq!(format_percentage(Some(-0.001)), "0.00%");
        assert_eq!(format_percentage(Some(0.004)), "0.00%");
    }

    #[test]
    fn test_format_percentage_large_values() {
        assert_eq!(format_percentage(Some(1234.5)), "+1234.50%");
        assert_eq!(format_percentage(Some(-100.0)), "-100.00%");
    }

    #[test]
    fn test_format_duration_components() {
        assert_eq!(format_duration(60_000), "1m");
        assert_eq!(format_duration(61_000), "1m 1s");
        assert_eq!(format_duration(1_001), "1s 1ms");
        assert_eq!(format_duration(125_000), "2m 5s");
    }

    #[test]
    fn test_format_duration_change_negative_minutes() {
        assert_eq!(format_duration_change(-120_500), "-2m 500ms");
    }
}
