use std::sync::Arc;

use {
    anyhow::Context,
    jiff::{
        Span, ToSpan,
        civil::{Date, Weekday},
    },
};

use crate::{
    args::Usage,
    date::{ordinal, weekday_name},
};

/// The default cap on the number of dates generated for a single rule.
pub const DEFAULT_MAX: usize = 100;

/// How far past the start date generation runs when no end date is given.
pub const SOFT_HORIZON_YEARS: i16 = 2;

/// The absolute cutoff past the start date, even when an end date is given.
///
/// This bounds the work done for rules that match rarely (or never), e.g.,
/// a day-of-month that only a few months have, combined with a far away
/// end date.
pub const SAFETY_HORIZON_YEARS: i16 = 5;

/// A recurrence rule for generating sequences of calendar dates.
///
/// A rule is the cadence (frequency and interval) plus an optional pattern
/// restricting which candidate dates are kept. The start and end dates live
/// in a [`DateRange`] passed to [`RecurrenceRule::dates`], so one rule can
/// be reused against different ranges.
#[derive(Clone, Debug)]
pub struct RecurrenceRule {
    inner: Arc<RecurrenceRuleInner>,
}

#[derive(Debug)]
struct RecurrenceRuleInner {
    freq: Frequency,
    interval: i32,
    /// One cadence step, i.e., the frequency's unit times the interval.
    step: Span,
    /// For weekly rules, the set of weekdays to keep. When empty, a
    /// candidate is kept when its weekday equals the start date's weekday.
    week_days: Box<[Weekday]>,
    /// For monthly rules, how a candidate within a month is chosen.
    monthly: MonthlyPattern,
    soft_horizon_years: i16,
    safety_horizon_years: i16,
}

impl RecurrenceRule {
    /// Returns a builder for constructing a `RecurrenceRule`.
    ///
    /// The frequency is the only thing required to create a rule.
    pub fn builder(freq: Frequency) -> RecurrenceRuleBuilder {
        RecurrenceRuleBuilder::new(freq)
    }

    /// Returns an iterator over the dates this rule generates in the given
    /// range.
    ///
    /// The iterator always terminates: it stops at the range's end date
    /// when one is set (otherwise at a soft horizon of
    /// `SOFT_HORIZON_YEARS` past the start), and never runs past the
    /// safety horizon of `SAFETY_HORIZON_YEARS` past the start. Callers
    /// that want fewer dates should use `take(N)` or
    /// [`RecurrenceRule::generate`].
    pub fn dates(&self, range: &DateRange) -> Dates<'_> {
        let start = range.start();
        let soft = match range.end() {
            Some(end) => end,
            None => start
                .checked_add(i64::from(self.inner.soft_horizon_years).years())
                .unwrap_or(Date::MAX),
        };
        let safety = start
            .checked_add(i64::from(self.inner.safety_horizon_years).years())
            .unwrap_or(Date::MAX);
        Dates {
            rule: self,
            start,
            stop: soft.min(safety),
            cur: Some((0, start)),
        }
    }

    /// Generates at most `max` dates for this rule in the given range.
    ///
    /// When `max` is `None`, a default cap of `DEFAULT_MAX` is used. A rule
    /// that matches nothing before the range's bound produces an empty
    /// vector. That's intentionally not an error: an in-progress rule edit
    /// legitimately matches nothing.
    pub fn generate(&self, range: &DateRange, max: Option<usize>) -> Vec<Date> {
        self.dates(range).take(max.unwrap_or(DEFAULT_MAX)).collect()
    }

    /// Returns a short human readable description of this rule, e.g.,
    /// `every 2 weeks on Monday, Friday`.
    ///
    /// The anchor is the start date of the range the rule is applied to.
    /// It supplies the day of the month, the month and the fallback weekday
    /// for rules that are anchored rather than explicitly configured.
    pub fn describe(&self, anchor: Date) -> String {
        let inner = &self.inner;
        let every = match inner.interval {
            1 => format!("every {}", inner.freq.unit_str()),
            n => format!("every {n} {}s", inner.freq.unit_str()),
        };
        match inner.freq {
            Frequency::Daily => every,
            Frequency::Weekly => {
                let days: Vec<Weekday> = if inner.week_days.is_empty() {
                    vec![anchor.weekday()]
                } else {
                    inner.week_days.to_vec()
                };
                let names = days
                    .iter()
                    .map(|&wd| weekday_name(wd))
                    .collect::<Vec<&str>>()
                    .join(", ");
                format!("{every} on {names}")
            }
            Frequency::Monthly => match inner.monthly {
                MonthlyPattern::OnDay => {
                    format!("{every} on day {}", anchor.day())
                }
                MonthlyPattern::OnNthWeekday { nth, weekday } => {
                    format!(
                        "{every} on the {} {}",
                        ordinal(nth),
                        weekday_name(weekday),
                    )
                }
            },
            Frequency::Yearly => {
                format!(
                    "{every} on {} {}",
                    anchor.strftime("%B"),
                    anchor.day(),
                )
            }
        }
    }
}

impl RecurrenceRuleInner {
    /// Returns true if the given candidate date should be part of the
    /// generated sequence.
    ///
    /// The anchor is the start date of the range being generated. Daily
    /// rules keep every candidate, since the cadence stepping already
    /// encodes their spacing.
    fn matches(&self, date: Date, anchor: Date) -> bool {
        match self.freq {
            Frequency::Daily => true,
            Frequency::Weekly => {
                if self.week_days.is_empty() {
                    date.weekday() == anchor.weekday()
                } else {
                    self.week_days.contains(&date.weekday())
                }
            }
            Frequency::Monthly => match self.monthly {
                MonthlyPattern::OnDay => date.day() == anchor.day(),
                MonthlyPattern::OnNthWeekday { nth, weekday } => {
                    is_nth_weekday(date, nth, weekday)
                }
            },
            Frequency::Yearly => {
                date.month() == anchor.month() && date.day() == anchor.day()
            }
        }
    }

    /// Returns true when candidates are pinned to the start date's day of
    /// the month, i.e., when a clamped day number means "this month has no
    /// candidate" rather than "use the nearest day."
    fn day_anchored(&self) -> bool {
        match self.freq {
            Frequency::Monthly => {
                matches!(self.monthly, MonthlyPattern::OnDay)
            }
            Frequency::Yearly => true,
            Frequency::Daily | Frequency::Weekly => false,
        }
    }
}

/// Returns true if `date` is the `nth` occurrence of `weekday` within its
/// own month.
///
/// `nth` is expected to be in `1..=5`. A month that has no `nth` occurrence
/// of the weekday (only some months have a 5th) matches nothing; the
/// occurrence never spills into the next month.
fn is_nth_weekday(date: Date, nth: i8, weekday: Weekday) -> bool {
    if date.weekday() != weekday {
        return false;
    }
    // `nth_weekday_of_month` fails when the occurrence doesn't exist, which
    // is exactly the "5th Friday of a four-Friday month" case.
    date.nth_weekday_of_month(nth, weekday).map_or(false, |nthday| nthday == date)
}

/// The date range a recurrence rule is applied to.
///
/// The start date doubles as the rule's anchor: it is the first candidate
/// date, and anchored patterns (day of the month, month of the year, the
/// weekly fallback weekday) are derived from it.
#[derive(Clone, Copy, Debug)]
pub struct DateRange {
    start: Date,
    end: Option<Date>,
}

impl DateRange {
    /// Create a new date range.
    ///
    /// When `end` is present, it must not precede `start`.
    pub fn new(start: Date, end: Option<Date>) -> anyhow::Result<DateRange> {
        if let Some(end) = end {
            anyhow::ensure!(
                end >= start,
                "end date `{end}` precedes start date `{start}`",
            );
        }
        Ok(DateRange { start, end })
    }

    /// The first candidate date and anchor for the rule's patterns.
    pub fn start(&self) -> Date {
        self.start
    }

    /// The inclusive end bound, if one was set.
    pub fn end(&self) -> Option<Date> {
        self.end
    }
}

/// How a monthly rule chooses its candidate within each month.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MonthlyPattern {
    /// Match the start date's day of the month. Months too short for that
    /// day (say, February against a day of 31) are skipped entirely.
    #[default]
    OnDay,
    /// Match the `nth` occurrence of `weekday` within the month, e.g., the
    /// 2nd Tuesday.
    OnNthWeekday { nth: i8, weekday: Weekday },
}

/// An iterator over the dates generated by a recurrence rule in a range.
///
/// Candidates are computed as `start + n * step` rather than by repeatedly
/// adding the step to the previous candidate. Jiff clamps additions that
/// land on a day a month doesn't have (`2024-01-31 + 1 month` is
/// `2024-02-29`), and clamping the running cursor would be sticky: once at
/// `02-29`, a further month lands on `03-29` instead of `03-31`.
/// Multiplying from the anchor keeps every candidate pinned to the start
/// date.
#[derive(Clone, Debug)]
pub struct Dates<'r> {
    rule: &'r RecurrenceRule,
    /// The anchor, i.e., the start of the range being generated.
    start: Date,
    /// The last date (inclusive) that may be emitted. This is the range's
    /// end bound (or the soft horizon), already capped by the safety
    /// horizon.
    stop: Date,
    /// The cadence step index along with the current candidate date.
    ///
    /// When this is `None`, iteration has ceased.
    cur: Option<(i64, Date)>,
}

impl<'r> Dates<'r> {
    fn increment(&self) -> Option<(i64, Date)> {
        let (mut attempt, _) = self.cur?;
        let step = self.rule.inner.step;
        loop {
            attempt = attempt.checked_add(1)?;
            let span = step.checked_mul(attempt).ok()?;
            let next = self.start.checked_add(span).ok()?;
            // A candidate whose day number was clamped is not a real
            // occurrence for day-anchored patterns. Skip it and go on to
            // the next step; the following candidates are unaffected since
            // each one is computed from the anchor.
            let clamped = next.day() != self.start.day();
            if clamped && self.rule.inner.day_anchored() {
                continue;
            }
            return Some((attempt, next));
        }
    }
}

impl<'r> Iterator for Dates<'r> {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        loop {
            let (_, cur) = self.cur?;
            if cur > self.stop {
                self.cur = None;
                return None;
            }
            let hit = self.rule.inner.matches(cur, self.start);
            self.cur = self.increment();
            if hit {
                return Some(cur);
            }
        }
    }
}

impl<'r> std::iter::FusedIterator for Dates<'r> {}

/// A builder for constructing a valid recurrence rule.
#[derive(Clone, Debug)]
pub struct RecurrenceRuleBuilder {
    freq: Frequency,
    interval: i32,
    week_days: Vec<Weekday>,
    monthly: MonthlyPattern,
    soft_horizon_years: i16,
    safety_horizon_years: i16,
}

impl RecurrenceRuleBuilder {
    fn new(freq: Frequency) -> RecurrenceRuleBuilder {
        RecurrenceRuleBuilder {
            freq,
            interval: 1,
            week_days: vec![],
            monthly: MonthlyPattern::OnDay,
            soft_horizon_years: SOFT_HORIZON_YEARS,
            safety_horizon_years: SAFETY_HORIZON_YEARS,
        }
    }

    pub fn build(&self) -> anyhow::Result<RecurrenceRule> {
        // An interval below one is treated as one instead of being
        // rejected. A preview of a rule mid-edit should degrade, not fail.
        let interval = if self.interval < 1 {
            log::warn!(
                "interval value of `{}` is invalid, treating it as `1`",
                self.interval,
            );
            1
        } else {
            self.interval
        };
        anyhow::ensure!(
            self.week_days.is_empty()
                || matches!(self.freq, Frequency::Weekly),
            "a weekly day set can only be used with weekly frequency",
        );
        if let MonthlyPattern::OnNthWeekday { nth, .. } = self.monthly {
            anyhow::ensure!(
                matches!(self.freq, Frequency::Monthly),
                "an 'nth weekday' pattern can only be used with \
                 monthly frequency",
            );
            anyhow::ensure!(
                1 <= nth && nth <= 5,
                "invalid 'nth weekday' value `{nth}` \
                 (values must be in range 1..=5)",
            );
        }
        anyhow::ensure!(
            self.soft_horizon_years >= 1,
            "soft horizon of `{}` years is invalid \
             (must be at least 1 year)",
            self.soft_horizon_years,
        );
        anyhow::ensure!(
            self.safety_horizon_years >= 1,
            "safety horizon of `{}` years is invalid \
             (must be at least 1 year)",
            self.safety_horizon_years,
        );

        let step = self.freq.to_span(interval).with_context(|| {
            format!(
                "could not convert {freq} interval of `{interval}` to \
                 time span",
                freq = self.freq.as_str(),
            )
        })?;
        let mut week_days = self.week_days.clone();
        week_days.sort_by_key(|wd| wd.to_sunday_zero_offset());
        week_days.dedup();
        let inner = Arc::new(RecurrenceRuleInner {
            freq: self.freq,
            interval,
            step,
            week_days: week_days.into_boxed_slice(),
            monthly: self.monthly,
            soft_horizon_years: self.soft_horizon_years,
            safety_horizon_years: self.safety_horizon_years,
        });
        Ok(RecurrenceRule { inner })
    }

    pub fn interval(&mut self, interval: i32) -> &mut RecurrenceRuleBuilder {
        self.interval = interval;
        self
    }

    pub fn week_days<I: IntoIterator<Item = Weekday>>(
        &mut self,
        days: I,
    ) -> &mut RecurrenceRuleBuilder {
        self.week_days.extend(days);
        self
    }

    pub fn on_nth_weekday(
        &mut self,
        nth: i8,
        weekday: Weekday,
    ) -> &mut RecurrenceRuleBuilder {
        self.monthly = MonthlyPattern::OnNthWeekday { nth, weekday };
        self
    }

    pub fn soft_horizon_years(
        &mut self,
        years: i16,
    ) -> &mut RecurrenceRuleBuilder {
        self.soft_horizon_years = years;
        self
    }

    pub fn safety_horizon_years(
        &mut self,
        years: i16,
    ) -> &mut RecurrenceRuleBuilder {
        self.safety_horizon_years = years;
        self
    }
}

/// The frequency at which a recurrence rule repeats.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const USAGE: Usage = Usage::arg(
        "<frequency>",
        "The frequency at which to repeat a sequence.",
        r#"
The frequency at which to repeat a sequence.

Valid values are:

yearly, year, yr, y

monthly, month, mo

weekly, week, wk, w

daily, day, d
"#,
    );

    fn to_span(&self, interval: i32) -> anyhow::Result<Span> {
        let base = match *self {
            Frequency::Yearly => 1.year(),
            Frequency::Monthly => 1.month(),
            Frequency::Weekly => 1.week(),
            Frequency::Daily => 1.day(),
        };
        Ok(base.checked_mul(i64::from(interval))?)
    }

    fn as_str(&self) -> &'static str {
        match *self {
            Frequency::Yearly => "yearly",
            Frequency::Monthly => "monthly",
            Frequency::Weekly => "weekly",
            Frequency::Daily => "daily",
        }
    }

    /// The singular unit, for rendering descriptions like `every 2 weeks`.
    fn unit_str(&self) -> &'static str {
        match *self {
            Frequency::Yearly => "year",
            Frequency::Monthly => "month",
            Frequency::Weekly => "week",
            Frequency::Daily => "day",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Frequency> {
        use self::Frequency::*;

        let freq = match &*s.to_lowercase() {
            "yearly" | "year" | "yr" | "y" => Yearly,
            "monthly" | "month" | "mo" => Monthly,
            "weekly" | "week" | "wk" | "w" => Weekly,
            "daily" | "day" | "d" => Daily,
            unk => anyhow::bail!("unrecognized frequency: `{unk}`"),
        };
        Ok(freq)
    }
}
