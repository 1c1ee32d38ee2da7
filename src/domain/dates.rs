//! Human-readable date formatting for article headers.

use time::{
    Date, OffsetDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

const HUMAN_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");

const CALENDAR_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Format an API date string as e.g. `January 5, 2025`.
///
/// The content API is loose about date encoding: full RFC 3339 timestamps and
/// bare `YYYY-MM-DD` both occur. Anything unparseable formats as the empty
/// string so a malformed date never takes down the page.
pub fn format_article_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let date = OffsetDateTime::parse(trimmed, &Rfc3339)
        .map(OffsetDateTime::date)
        .or_else(|_| Date::parse(trimmed, CALENDAR_DATE_FORMAT));

    match date {
        Ok(date) => date.format(HUMAN_DATE_FORMAT).unwrap_or_default(),
        Err(_) => String::new(),
    }
}
