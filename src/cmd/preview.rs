use std::io::Write;

use crate::{args, cmd::RuleConfig, date::display_date};

/// How many dates are listed individually before the `+N more` summary.
const LIST_MAX: usize = 20;

const USAGE: &'static str = r#"
Summarize the first dates a recurrence rule produces.

This renders what a scheduling UI would show next to the rule being edited:
a one line description of the rule, the first twenty matching dates in a
human readable format, and a count of how many more there are. At most
fifty dates are generated for a preview.

A rule that matches nothing produces an empty preview, not an error. In
particular, a weekly day set that does not contain the start date's weekday
matches nothing.

USAGE:
    cadence preview <frequency> [<start>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Preview a birthday that only exists in leap years:

        $ cadence preview yearly -e 2032-03-01 2024-02-29
        Preview (2 dates): every year on February 29
        Feb 29, 2024
        Feb 29, 2028

    %snip-start%

    Preview an every-other-week rule:

        $ cadence preview weekly -i2 2024-01-01
        Preview (50 dates): every 2 weeks on Monday
        Jan 01, 2024
        Jan 15, 2024
        Jan 29, 2024
        ...
        +30 more

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut rule_config = RuleConfig::default();
    args::configure(p, USAGE, &mut [&mut rule_config])?;

    let range = rule_config.date_range()?;
    let rule = rule_config.recurrence_rule()?;
    let dates = rule.generate(&range, Some(super::PREVIEW_MAX));

    let mut wtr = std::io::stdout().lock();
    writeln!(
        wtr,
        "Preview ({} dates): {}",
        dates.len(),
        rule.describe(range.start()),
    )?;
    for &date in dates.iter().take(LIST_MAX) {
        writeln!(wtr, "{}", display_date(date))?;
    }
    if dates.len() > LIST_MAX {
        writeln!(wtr, "+{} more", dates.len() - LIST_MAX)?;
    }
    Ok(())
}
