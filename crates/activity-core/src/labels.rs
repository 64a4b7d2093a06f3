//! Label rendering for time frames.
//!
//! Translation is owned by the application; the core only asks for two
//! things: a translated message for a fixed label, and the display name of
//! a calendar month.

use chrono::NaiveDate;

/// msgid of the fixed recent-activity frame.
pub const LAST_7_DAYS: &str = "Last 7 days";

pub trait Labels {
    /// Translate a fixed label such as [`LAST_7_DAYS`].
    fn translate(&self, msgid: &str) -> String;

    /// Display name for a calendar month, `month` in `1..=12`.
    fn month_label(&self, year: i32, month: u32) -> String;
}

/// Untranslated English labels: msgids pass through, months render as
/// `"Mar 1968"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLabels;

impl Labels for EnglishLabels {
    fn translate(&self, msgid: &str) -> String {
        msgid.to_string()
    }

    fn month_label(&self, year: i32, month: u32) -> String {
        match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(date) => date.format("%b %Y").to_string(),
            None => format!("{month:02}/{year:04}"),
        }
    }
}
