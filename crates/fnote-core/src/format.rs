//! Date/time formatting with moment-style patterns.
//!
//! Title templates and `{{date:...}}` overrides are written in the widely
//! used `YYYY-MM-DD HH:mm` token syntax. [`DateFormatter`] is the seam the
//! resolver formats "now" through; [`MomentFormatter`] implements the common
//! tokens on top of `chrono`.
//!
//! Supported tokens (longest match wins, `[...]` is copied literally):
//!
//! | Token | Output | Token | Output |
//! |-------|--------|-------|--------|
//! | `YYYY` `YY` `Y` | year | `Q` | quarter |
//! | `M` `MM` `MMM` `MMMM` | month | `W` `WW` | ISO week |
//! | `D` `DD` `Do` | day of month | `DDD` `DDDD` | day of year |
//! | `d` `dd` `ddd` `dddd` | weekday | `E` | ISO weekday |
//! | `H` `HH` `h` `hh` `k` `kk` | hour | `m` `mm` `s` `ss` | minute, second |
//! | `S` `SS` `SSS` | fraction | `A` `a` | meridiem |
//! | `Z` `ZZ` | offset | `X` `x` | unix seconds, millis |

use chrono::{DateTime, Datelike, FixedOffset, Local, Timelike};

/// Pattern used when a caller asks to format with an empty pattern.
pub const ISO_PATTERN: &str = "YYYY-MM-DDTHH:mm:ssZ";

/// Formats a point in time with a user-supplied pattern.
pub trait DateFormatter {
    fn format(&self, now: &DateTime<FixedOffset>, pattern: &str) -> String;
}

/// Source of "now" for a resolution pass.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Moment-style pattern formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MomentFormatter;

// Ordered longest first so that `MMMM` is never read as `MM` + `MM`.
const TOKENS: &[&str] = &[
    "YYYY", "MMMM", "DDDD", "dddd", "MMM", "DDD", "ddd", "SSS", "YY", "MM", "DD", "Do", "dd",
    "WW", "HH", "hh", "kk", "mm", "ss", "SS", "ZZ", "Y", "M", "D", "d", "E", "W", "Q", "H", "h",
    "k", "m", "s", "S", "A", "a", "Z", "X", "x",
];

impl DateFormatter for MomentFormatter {
    fn format(&self, now: &DateTime<FixedOffset>, pattern: &str) -> String {
        let pattern = if pattern.is_empty() {
            ISO_PATTERN
        } else {
            pattern
        };

        let mut out = String::with_capacity(pattern.len() + 8);
        let mut rest = pattern;

        while let Some(c) = rest.chars().next() {
            if c == '[' {
                if let Some(close) = rest.find(']') {
                    out.push_str(&rest[1..close]);
                    rest = &rest[close + 1..];
                    continue;
                }
            }

            if let Some(token) = TOKENS.iter().find(|t| rest.starts_with(**t)) {
                render_token(now, token, &mut out);
                rest = &rest[token.len()..];
            } else {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }

        out
    }
}

fn render_token(now: &DateTime<FixedOffset>, token: &str, out: &mut String) {
    let rendered = match token {
        "YYYY" => format!("{:04}", now.year()),
        "YY" => format!("{:02}", now.year().rem_euclid(100)),
        "Y" => now.year().to_string(),
        "MMMM" => now.format("%B").to_string(),
        "MMM" => now.format("%b").to_string(),
        "MM" => format!("{:02}", now.month()),
        "M" => now.month().to_string(),
        "DDDD" => format!("{:03}", now.ordinal()),
        "DDD" => now.ordinal().to_string(),
        "DD" => format!("{:02}", now.day()),
        "Do" => ordinal(now.day()),
        "D" => now.day().to_string(),
        "dddd" => now.format("%A").to_string(),
        "ddd" => now.format("%a").to_string(),
        "dd" => now.format("%a").to_string().chars().take(2).collect(),
        "d" => now.weekday().num_days_from_sunday().to_string(),
        "E" => now.weekday().number_from_monday().to_string(),
        "WW" => format!("{:02}", now.iso_week().week()),
        "W" => now.iso_week().week().to_string(),
        "Q" => now.month().div_ceil(3).to_string(),
        "HH" => format!("{:02}", now.hour()),
        "H" => now.hour().to_string(),
        "hh" => format!("{:02}", twelve_hour(now.hour())),
        "h" => twelve_hour(now.hour()).to_string(),
        "kk" => format!("{:02}", now.hour() + 1),
        "k" => (now.hour() + 1).to_string(),
        "mm" => format!("{:02}", now.minute()),
        "m" => now.minute().to_string(),
        "ss" => format!("{:02}", now.second()),
        "s" => now.second().to_string(),
        "SSS" => format!("{:03}", now.timestamp_subsec_millis()),
        "SS" => format!("{:02}", now.timestamp_subsec_millis() / 10),
        "S" => (now.timestamp_subsec_millis() / 100).to_string(),
        "A" => meridiem(now.hour()).to_string(),
        "a" => meridiem(now.hour()).to_lowercase(),
        "ZZ" => now.format("%z").to_string(),
        "Z" => now.format("%:z").to_string(),
        "X" => now.timestamp().to_string(),
        "x" => now.timestamp_millis().to_string(),
        other => other.to_string(),
    };
    out.push_str(&rendered);
}

fn twelve_hour(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

fn meridiem(hour: u32) -> &'static str {
    if hour < 12 {
        "AM"
    } else {
        "PM"
    }
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
    }

    fn fmt(now: &DateTime<FixedOffset>, pattern: &str) -> String {
        MomentFormatter.format(now, pattern)
    }

    #[test]
    fn formats_default_date_and_time_patterns() {
        let now = at(2025, 2, 10, 9, 5, 7);
        assert_eq!(fmt(&now, "YYYY-MM-DD"), "2025-02-10");
        assert_eq!(fmt(&now, "HH:mm"), "09:05");
        assert_eq!(fmt(&now, "HH:mm:ss"), "09:05:07");
    }

    #[test]
    fn longest_token_wins() {
        let now = at(2025, 2, 10, 9, 5, 7);
        assert_eq!(fmt(&now, "MMMM"), "February");
        assert_eq!(fmt(&now, "MMM D"), "Feb 10");
        assert_eq!(fmt(&now, "dddd"), "Monday");
        assert_eq!(fmt(&now, "ddd"), "Mon");
        assert_eq!(fmt(&now, "dd"), "Mo");
    }

    #[test]
    fn twelve_hour_clock_and_meridiem() {
        assert_eq!(fmt(&at(2025, 1, 1, 0, 30, 0), "h:mm A"), "12:30 AM");
        assert_eq!(fmt(&at(2025, 1, 1, 13, 0, 0), "hh a"), "01 pm");
        assert_eq!(fmt(&at(2025, 1, 1, 23, 0, 0), "k"), "24");
    }

    #[test]
    fn ordinals_and_calendar_fields() {
        assert_eq!(fmt(&at(2025, 3, 1, 0, 0, 0), "Do"), "1st");
        assert_eq!(fmt(&at(2025, 3, 2, 0, 0, 0), "Do"), "2nd");
        assert_eq!(fmt(&at(2025, 3, 13, 0, 0, 0), "Do"), "13th");
        assert_eq!(fmt(&at(2025, 3, 23, 0, 0, 0), "Do"), "23rd");
        assert_eq!(fmt(&at(2025, 8, 15, 0, 0, 0), "Q"), "3");
        assert_eq!(fmt(&at(2025, 1, 5, 0, 0, 0), "DDDD"), "005");
        assert_eq!(fmt(&at(2025, 1, 5, 0, 0, 0), "d E"), "0 7");
    }

    #[test]
    fn brackets_escape_literal_text() {
        let now = at(2025, 2, 10, 9, 5, 7);
        assert_eq!(fmt(&now, "[Meeting] YYYY"), "Meeting 2025");
        assert_eq!(fmt(&now, "[YYYY"), "[2025");
    }

    #[test]
    fn non_token_characters_are_copied() {
        let now = at(2025, 2, 10, 9, 5, 7);
        assert_eq!(fmt(&now, "YYYY/MM/DD, #1"), "2025/02/10, #1");
    }

    #[test]
    fn offsets_and_unix_time() {
        let now = at(2025, 2, 10, 9, 5, 7);
        assert_eq!(fmt(&now, "Z"), "+02:00");
        assert_eq!(fmt(&now, "ZZ"), "+0200");
        assert_eq!(fmt(&now, "X"), now.timestamp().to_string());
    }

    #[test]
    fn empty_pattern_formats_as_iso() {
        let now = at(2025, 2, 10, 9, 5, 7);
        assert_eq!(fmt(&now, ""), "2025-02-10T09:05:07+02:00");
    }

    #[test]
    fn fixed_clock_returns_its_instant() {
        let now = at(2025, 2, 10, 9, 5, 7);
        assert_eq!(FixedClock(now).now(), now);
    }
}
