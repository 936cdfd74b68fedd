use std::{collections::BTreeSet, io::Write};

use jiff::{ToSpan, civil::Date};

use crate::{
    args::{self, Usage},
    cmd::RuleConfig,
    recur::DateRange,
    style::Theme,
};

/// The rendered width of one month panel: seven three-column day cells
/// with single space separators.
const PANEL_WIDTH: usize = 27;

const USAGE: &'static str = r#"
Render the dates matching a recurrence rule on a month calendar grid.

Each month is rendered as a Sunday-first grid. The start date is marked
with `>`, the end date (when one was given) with `<`, and every other
matching date with `*`. When printing to a terminal, the marked cells are
colored as well. At most fifty dates are generated for the preview; a
trailing summary line says how many matched.

USAGE:
    cadence grid <frequency> [<start>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    The 15th of the month, for a quarter:

        $ cadence grid monthly -e 2024-09-30 2024-07-15
                 July 2024
        Sun Mon Tue Wed Thu Fri Sat
             1   2   3   4   5   6
         7   8   9  10  11  12  13
        14  15> 16  17  18  19  20
        21  22  23  24  25  26  27
        28  29  30  31

                August 2024
        Sun Mon Tue Wed Thu Fri Sat
                         1   2   3
         4   5   6   7   8   9  10
        11  12  13  14  15* 16  17
        18  19  20  21  22  23  24
        25  26  27  28  29  30  31

              September 2024
        Sun Mon Tue Wed Thu Fri Sat
         1   2   3   4   5   6   7
         8   9  10  11  12  13  14
        15* 16  17  18  19  20  21
        22  23  24  25  26  27  28
        29  30<

        > start date    < end date    * recurring date
        Showing 3 recurring dates

REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    let mut rule_config = RuleConfig::default();
    args::configure(p, USAGE, &mut [&mut config, &mut rule_config])?;

    let months = config.months();
    anyhow::ensure!(months >= 1, "the --months value must be at least 1");

    let range = rule_config.date_range()?;
    let rule = rule_config.recurrence_rule()?;
    let dates = rule.generate(&range, Some(super::PREVIEW_MAX));
    let matched: BTreeSet<Date> = dates.iter().copied().collect();

    let mut wtr = std::io::stdout().lock();
    let mut first = range.start().first_of_month();
    for i in 0..months {
        if i > 0 {
            writeln!(wtr)?;
        }
        render_month(&mut wtr, first, &matched, &range)?;
        first = first.checked_add(1.month())?;
    }

    let theme = Theme::stdout();
    let mut legend = vec![format!("{} start date", theme.start(">"))];
    if range.end().is_some() {
        legend.push(format!("{} end date", theme.end("<")));
    }
    legend.push(format!("{} recurring date", theme.recurring("*")));
    writeln!(wtr)?;
    writeln!(wtr, "{}", legend.join("    "))?;

    let mut summary = format!("Showing {} recurring dates", dates.len());
    if dates.len() >= super::PREVIEW_MAX {
        summary.push_str(&format!(
            " (limited to {} for preview)",
            super::PREVIEW_MAX,
        ));
    }
    writeln!(wtr, "{summary}")?;
    Ok(())
}

/// Renders one month panel, given the first day of the month to render.
///
/// Cells for days belonging to adjacent months are left blank so that each
/// date appears in exactly one panel.
fn render_month<W: Write>(
    wtr: &mut W,
    first: Date,
    matched: &BTreeSet<Date>,
    range: &DateRange,
) -> anyhow::Result<()> {
    let theme = Theme::stdout();
    let title = first.strftime("%B %Y").to_string();
    let pad = PANEL_WIDTH.saturating_sub(title.len()) / 2;
    writeln!(wtr, "{}{}", " ".repeat(pad), theme.heading(&title))?;
    writeln!(wtr, "Sun Mon Tue Wed Thu Fri Sat")?;

    let last = first.last_of_month();
    let mut week = first.checked_sub(
        i64::from(first.weekday().to_sunday_zero_offset()).days(),
    )?;
    while week <= last {
        let mut line = String::new();
        for i in 0..7i64 {
            let day = week.checked_add(i.days())?;
            if i > 0 {
                line.push(' ');
            }
            if day.month() != first.month() || day.year() != first.year() {
                line.push_str("   ");
            } else if day == range.start() {
                let cell = format!("{:>2}>", day.day());
                line.push_str(&theme.start(cell).to_string());
            } else if range.end() == Some(day) {
                let cell = format!("{:>2}<", day.day());
                line.push_str(&theme.end(cell).to_string());
            } else if matched.contains(&day) {
                let cell = format!("{:>2}*", day.day());
                line.push_str(&theme.recurring(cell).to_string());
            } else {
                line.push_str(&format!("{:>2} ", day.day()));
            }
        }
        writeln!(wtr, "{}", line.trim_end())?;
        week = week.checked_add(1.week())?;
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    months: Option<usize>,
}

impl Config {
    fn months(&self) -> usize {
        self.months.unwrap_or(3)
    }
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        use lexopt::Arg::*;

        match *arg {
            Short('m') | Long("months") => {
                self.months = Some(args::parse(p, "-m/--months")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const MONTHS: Usage = Usage::flag(
            "-m/--months <number>",
            "How many month panels to render (default 3).",
            r#"
How many month panels to render.

Panels start at the month containing the start date and are rendered
consecutively, whether or not they contain any matching dates. The default
is 3.
"#,
        );

        &[MONTHS]
    }
}
