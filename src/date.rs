use jiff::civil::{Date, Weekday};

use crate::args::Usage;

/// Represents a calendar date parsed from user input.
///
/// Everything in this tool is a civil calendar day. There are no instants
/// and no time zones; the only place the system time zone matters is for
/// determining what "today" is.
///
/// This type exists primarily as a target for trait impls for tailoring
/// behavior specific to `cadence`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct CalendarDate {
    date: Date,
}

impl CalendarDate {
    pub const ARG_START: Usage = Usage::arg(
        "<start>",
        "The start date, e.g., `2024-07-20` or `today`.",
        r#"
The start date of the range to generate dates in.

This is the anchor of the recurrence rule: it is the first candidate date,
and it supplies the day of the month (for monthly rules), the month and day
(for yearly rules) and the fallback weekday (for weekly rules without a day
set).

Dates are given in ISO 8601 format, e.g., `2024-07-20`. The special strings
`today`, `tomorrow` and `yesterday` are also accepted. When this argument is
omitted entirely, the current date is used, or if the `CADENCE_TODAY`
environment variable is set, that date is used instead.
"#,
    );

    pub const FLAG_END: Usage = Usage::flag(
        "-e/--end <date>",
        "Generate dates up to this date (inclusive).",
        r#"
Generate dates up to this date (inclusive).

The end date must not precede the start date. When no end date is given,
generation stops two years after the start date. Either way, generation
never runs more than five years past the start date.

Dates are given in ISO 8601 format, e.g., `2024-07-20`. The special strings
`today`, `tomorrow` and `yesterday` are also accepted.
"#,
    );

    /// Get the underlying Jiff civil date.
    pub fn get(&self) -> Date {
        self.date
    }
}

impl std::str::FromStr for CalendarDate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<CalendarDate> {
        let date = match &*s.to_lowercase() {
            "today" => *crate::TODAY,
            "yesterday" => crate::TODAY.yesterday()?,
            "tomorrow" => crate::TODAY.tomorrow()?,
            _ => s.parse::<Date>().map_err(|err| {
                anyhow::anyhow!("failed to parse `{s}` as a date: {err}")
            })?,
        };
        Ok(CalendarDate { date })
    }
}

/// Formats a date for human readable display, e.g., `Jul 20, 2024`.
pub fn display_date(date: Date) -> String {
    date.strftime("%b %d, %Y").to_string()
}

/// Returns the full English name of the given weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sunday => "Sunday",
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
    }
}

/// Renders a number with its English ordinal suffix, e.g., `2nd`.
pub fn ordinal(n: i8) -> String {
    let suffix = match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{n}{suffix}")
}
