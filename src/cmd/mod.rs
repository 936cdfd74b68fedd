use anyhow::Context;

use crate::{
    args::{self, Configurable, Usage, flags},
    date::CalendarDate,
    parse::OsStrExt,
    recur::{DateRange, Frequency, RecurrenceRule},
};

mod grid;
mod preview;
mod seq;

/// The cap used by the preview-oriented renderers (`preview` and `grid`).
///
/// The raw `seq` command uses `recur::DEFAULT_MAX` instead.
const PREVIEW_MAX: usize = 50;

const USAGE: &'static str = "\
A utility for previewing recurring calendar date patterns.

USAGE:
    cadence <command> ...

COMMANDS:
    grid     Render matching dates on a month calendar grid
    preview  Summarize the first dates a recurrence rule produces
    seq      Generate the full sequence of matching dates
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    // For convenience, running `cadence` with no arguments prints the
    // current date in its display format.
    if p.try_raw_args().map_or(false, |args| args.as_slice().is_empty()) {
        use std::io::Write;

        writeln!(
            std::io::stdout(),
            "{}",
            crate::date::display_date(*crate::TODAY)
        )?;
        return Ok(());
    }

    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "grid" => grid::run(p),
        "preview" => preview::run(p),
        "seq" => seq::run(p),
        unk => anyhow::bail!("unrecognized command '{}'", unk),
    }
}

/// The CLI parsing configuration shared by every command that takes a
/// recurrence rule: the frequency and start date positionals, plus the
/// flags that shape the rule and its range.
#[derive(Debug, Default)]
pub struct RuleConfig {
    freq: Option<Frequency>,
    start: Option<CalendarDate>,
    end: Option<CalendarDate>,
    interval: Option<i32>,
    week_days: Vec<flags::CommaSequence<flags::Weekday>>,
    nth: Option<flags::NthWeekday>,
    horizon: Option<i16>,
    safety_horizon: Option<i16>,
}

impl RuleConfig {
    /// Returns the date range to generate dates in.
    ///
    /// The start date defaults to the current date when none was given.
    pub fn date_range(&self) -> anyhow::Result<DateRange> {
        let start =
            self.start.map(|d| d.get()).unwrap_or_else(|| *crate::TODAY);
        DateRange::new(start, self.end.map(|d| d.get()))
    }

    /// Builds the recurrence rule described by the parsed flags.
    pub fn recurrence_rule(&self) -> anyhow::Result<RecurrenceRule> {
        let mut b = RecurrenceRule::builder(self.freq()?);
        b.interval(self.interval.unwrap_or(1));
        b.week_days(self.week_days.iter().flatten().map(|wd| wd.get()));
        if let Some(nth) = self.nth {
            b.on_nth_weekday(nth.nth(), nth.weekday());
        }
        if let Some(years) = self.horizon {
            b.soft_horizon_years(years);
        }
        if let Some(years) = self.safety_horizon {
            b.safety_horizon_years(years);
        }
        b.build()
    }

    fn freq(&self) -> anyhow::Result<Frequency> {
        self.freq.context("missing required <frequency>")
    }
}

impl Configurable for RuleConfig {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        use lexopt::Arg::*;

        match *arg {
            Value(ref v) => {
                if self.freq.is_none() {
                    self.freq = Some(v.to_str()?.parse()?);
                    return Ok(true);
                }
                if self.start.is_none() {
                    self.start = Some(v.to_str()?.parse()?);
                    return Ok(true);
                }
                return Ok(false);
            }
            Short('e') | Long("end") => {
                self.end = Some(args::parse(p, "-e/--end")?);
            }
            Short('i') | Long("interval") => {
                self.interval = Some(args::parse(p, "-i/--interval")?);
            }
            Short('w') | Long("week-day") => {
                self.week_days.push(args::parse(p, "-w/--week-day")?);
            }
            Short('n') | Long("nth") => {
                self.nth = Some(args::parse(p, "-n/--nth")?);
            }
            Long("horizon") => {
                self.horizon = Some(args::parse(p, "--horizon")?);
            }
            Long("safety-horizon") => {
                self.safety_horizon =
                    Some(args::parse(p, "--safety-horizon")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const INTERVAL: Usage = Usage::flag(
            "-i/--interval <number>",
            "Sets the interval at which the sequence repeats.",
            r#"
Sets the interval at which the sequence repeats.

For example, a weekly frequency with an interval of 2 repeats every other
week. The default is 1. Values below 1 are treated as 1.
"#,
        );
        const WEEK_DAY: Usage = Usage::flag(
            "-w/--week-day <weekday-list>",
            "Keep only candidates on these days of the week.",
            r#"
Keep only candidates on these days of the week.

Any day of the week may be given by name, e.g., `sun`, `Monday` or `TUE`.
Multiple days can be specified with repeated use of this flag, or by
separating values with a comma, e.g., `mon,wed,fri`.

Candidates are visited one week (times the interval) at a time starting at
the start date, so every candidate shares the start date's weekday. This
set keeps or drops those candidates: when the set does not contain the
start date's weekday, no date ever matches and the sequence is empty.

When this flag is absent, a candidate is kept when its weekday equals the
start date's weekday.

This flag can only be used with weekly frequency.
"#,
        );
        const HORIZON: Usage = Usage::flag(
            "--horizon <years>",
            "How many years to generate for when no end date is given.",
            r#"
How many years to generate for when no end date is given.

The default is 2. This flag has no effect when `-e/--end` is given.
"#,
        );
        const SAFETY_HORIZON: Usage = Usage::flag(
            "--safety-horizon <years>",
            "The absolute cutoff on generation, in years (default 5).",
            r#"
The absolute cutoff on generation, in years past the start date.

The default is 5. Generation never runs past this point, even when
`-e/--end` asks for more. This bounds the work done for rules that match
rarely or never.
"#,
        );

        &[
            Frequency::USAGE,
            CalendarDate::ARG_START,
            CalendarDate::FLAG_END,
            INTERVAL,
            WEEK_DAY,
            flags::NthWeekday::USAGE,
            HORIZON,
            SAFETY_HORIZON,
        ]
    }
}
