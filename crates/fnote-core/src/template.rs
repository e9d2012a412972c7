//! Title-template and body-template resolution.
//!
//! A title template is a date pattern; resolving it formats "now" and the
//! result is the note name. A body template is a stored document whose text
//! carries placeholders:
//!
//! - `{{date}}` and `{{time}}` use the configured date and time formats
//! - `{{date:<pattern>}}` and `{{time:<pattern>}}` use `<pattern>` verbatim,
//!   where `<pattern>` runs up to the first `}}`
//!
//! Substitution is positional: the text is split into pieces once, left to
//! right, and every placeholder is replaced where it stands. Two overrides
//! that format to the same literal are still each expanded exactly once.

use chrono::{DateTime, FixedOffset};

use crate::format::DateFormatter;
use crate::settings::Settings;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// One piece of a parsed body template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    Text(&'a str),
    /// `{{date}}` (`None`) or `{{date:<pattern>}}`.
    Date(Option<&'a str>),
    /// `{{time}}` (`None`) or `{{time:<pattern>}}`.
    Time(Option<&'a str>),
}

/// Inputs shared by every placeholder in one resolution pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub now: DateTime<FixedOffset>,
    pub date_format: &'a str,
    pub time_format: &'a str,
}

impl<'a> RenderContext<'a> {
    #[must_use]
    pub fn from_settings(settings: &'a Settings, now: DateTime<FixedOffset>) -> Self {
        Self {
            now,
            date_format: settings.effective_date_format(),
            time_format: settings.effective_time_format(),
        }
    }
}

/// Resolve a title template into a literal note name.
#[must_use]
pub fn resolve_title<F: DateFormatter + ?Sized>(
    template: &str,
    now: &DateTime<FixedOffset>,
    formatter: &F,
) -> String {
    formatter.format(now, template.trim())
}

/// Split body text into literal runs and placeholders.
///
/// Anything that looks like the start of a placeholder but is not one
/// (`{{title}}`, an unterminated `{{date:`) stays literal text.
#[must_use]
pub fn parse(content: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = content;
    let mut literal_start = 0;
    let mut offset = 0;

    while let Some(open) = rest.find(OPEN) {
        match placeholder(&rest[open..]) {
            Some((piece, consumed)) => {
                let text_end = offset + open;
                if text_end > literal_start {
                    pieces.push(Piece::Text(&content[literal_start..text_end]));
                }
                pieces.push(piece);
                offset = text_end + consumed;
                literal_start = offset;
                rest = &content[offset..];
            }
            None => {
                offset += open + 1;
                rest = &content[offset..];
            }
        }
    }

    if literal_start < content.len() {
        pieces.push(Piece::Text(&content[literal_start..]));
    }
    pieces
}

/// Recognize a placeholder at the start of `at`, returning it and the number
/// of bytes it spans.
fn placeholder(at: &str) -> Option<(Piece<'_>, usize)> {
    const NAME_LEN: usize = 4;

    let head = &at[OPEN.len()..];
    let (is_date, after_name) = if let Some(rest) = head.strip_prefix("date") {
        (true, rest)
    } else if let Some(rest) = head.strip_prefix("time") {
        (false, rest)
    } else {
        return None;
    };
    let make = |pattern| {
        if is_date {
            Piece::Date(pattern)
        } else {
            Piece::Time(pattern)
        }
    };

    if after_name.starts_with(CLOSE) {
        return Some((make(None), OPEN.len() + NAME_LEN + CLOSE.len()));
    }

    let pattern_and_rest = after_name.strip_prefix(':')?;
    let close = pattern_and_rest.find(CLOSE)?;
    let consumed = OPEN.len() + NAME_LEN + 1 + close + CLOSE.len();
    Some((make(Some(&pattern_and_rest[..close])), consumed))
}

/// Render a body template, substituting every placeholder in place.
///
/// An override with an empty pattern (`{{date:}}`) uses the default format.
#[must_use]
pub fn render_body<F: DateFormatter + ?Sized>(
    content: &str,
    ctx: &RenderContext<'_>,
    formatter: &F,
) -> String {
    let mut out = String::with_capacity(content.len());
    for piece in parse(content) {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Date(pattern) => {
                let pattern = pattern.filter(|p| !p.is_empty()).unwrap_or(ctx.date_format);
                out.push_str(&formatter.format(&ctx.now, pattern));
            }
            Piece::Time(pattern) => {
                let pattern = pattern.filter(|p| !p.is_empty()).unwrap_or(ctx.time_format);
                out.push_str(&formatter.format(&ctx.now, pattern));
            }
        }
    }
    out
}

/// Whether a stored document is offered as a body template: it lives under
/// the configured templates folder.
#[must_use]
pub fn is_body_template(path: &str, templates_folder: &str) -> bool {
    path.starts_with(templates_folder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::MomentFormatter;
    use chrono::TimeZone;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 2, 10, 9, 15, 30)
            .unwrap()
    }

    fn render(content: &str, date_format: &str, time_format: &str) -> String {
        let ctx = RenderContext {
            now: now(),
            date_format,
            time_format,
        };
        render_body(content, &ctx, &MomentFormatter)
    }

    // === parse ===

    #[test]
    fn parse_splits_text_and_placeholders() {
        assert_eq!(
            parse("a {{date}} b {{time:HH}}"),
            vec![
                Piece::Text("a "),
                Piece::Date(None),
                Piece::Text(" b "),
                Piece::Time(Some("HH")),
            ]
        );
    }

    #[test]
    fn unknown_and_unterminated_placeholders_stay_literal() {
        assert_eq!(parse("{{title}}"), vec![Piece::Text("{{title}}")]);
        assert_eq!(parse("{{date:YYYY"), vec![Piece::Text("{{date:YYYY")]);
        assert_eq!(parse("{{{{date}}"), vec![Piece::Text("{{"), Piece::Date(None)]);
        assert_eq!(parse("{{{date}}"), vec![Piece::Text("{"), Piece::Date(None)]);
    }

    #[test]
    fn override_pattern_runs_to_first_close() {
        assert_eq!(
            parse("{{date:YYYY}}}}"),
            vec![Piece::Date(Some("YYYY")), Piece::Text("}}")]
        );
    }

    // === render_body ===

    #[test]
    fn defaults_substitute_with_no_leftover_tokens() {
        assert_eq!(render("{{date}}-{{time}}", "YYYY-MM-DD", "HH:mm"), "2025-02-10-09:15");
    }

    #[test]
    fn override_ignores_default_date_format() {
        assert_eq!(render("{{date:YYYY}}", "DD.MM.YYYY", "HH:mm"), "2025");
        assert_eq!(render("{{time:ss}}", "YYYY-MM-DD", "HH:mm"), "30");
    }

    #[test]
    fn every_occurrence_is_replaced() {
        let body = "# {{date}}\n\ncreated {{date}} at {{time}}\n";
        assert_eq!(
            render(body, "YYYY-MM-DD", "HH:mm"),
            "# 2025-02-10\n\ncreated 2025-02-10 at 09:15\n"
        );
    }

    #[test]
    fn overrides_with_identical_output_each_expand_in_place() {
        // Both format to "2025"; each is expanded exactly once where it stands.
        let body = "{{date:YYYY}} / {{date:Y}} / {{date:YYYY}}";
        assert_eq!(render(body, "YYYY-MM-DD", "HH:mm"), "2025 / 2025 / 2025");
    }

    #[test]
    fn empty_override_uses_default_format() {
        assert_eq!(render("{{date:}}", "YYYY-MM-DD", "HH:mm"), "2025-02-10");
    }

    #[test]
    fn body_without_placeholders_is_unchanged() {
        assert_eq!(render("plain {text}", "YYYY", "HH"), "plain {text}");
    }

    // === title templates ===

    #[test]
    fn title_template_formats_now() {
        assert_eq!(resolve_title(" YYYY-MM-DD ", &now(), &MomentFormatter), "2025-02-10");
        assert_eq!(
            resolve_title("[Standup] MMM Do", &now(), &MomentFormatter),
            "Standup Feb 10th"
        );
    }

    #[test]
    fn body_templates_live_under_the_templates_folder() {
        assert!(is_body_template("Templates/daily.md", "Templates"));
        assert!(!is_body_template("Notes/daily.md", "Templates"));
    }
}
