use std::io::Write;

use crate::{
    args::{self, Usage},
    cmd::RuleConfig,
    recur,
};

const USAGE: &'static str = r#"
Generate the sequence of calendar dates matching a recurrence rule.

Dates are generated in chronological order starting at the given start date.
If a start date is not given, then the current date is used.

Generation stops at the end date given via `-e/--end`, or two years past the
start date when there is none. It never runs more than five years past the
start date, and never produces more than `-c/--count` dates.

USAGE:
    cadence seq <frequency> [<start>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Print a week of daily dates:

        $ cadence seq daily -c7 2024-07-20
        2024-07-20
        2024-07-21
        2024-07-22
        2024-07-23
        2024-07-24
        2024-07-25
        2024-07-26

    Payday lands on the 31st; months without a 31st are skipped:

        $ cadence seq monthly -e 2024-12-31 2024-01-31
        2024-01-31
        2024-03-31
        2024-05-31
        2024-07-31
        2024-08-31
        2024-10-31
        2024-12-31

    %snip-start%

    Team sync on the first Monday of the month, i.e., in months that
    begin on a Monday:

        $ cadence seq monthly -n 1-mon -e 2024-12-31 2024-01-01
        2024-01-01
        2024-04-01
        2024-07-01

    Produce a JSON array for machine consumers:

        $ cadence seq daily -i3 -c3 --json 2024-01-01
        ["2024-01-01","2024-01-04","2024-01-07"]

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    let mut rule_config = RuleConfig::default();
    args::configure(p, USAGE, &mut [&mut config, &mut rule_config])?;

    let range = rule_config.date_range()?;
    let rule = rule_config.recurrence_rule()?;
    let mut wtr = std::io::stdout().lock();
    if config.json {
        let dates = rule.generate(&range, Some(config.count()));
        serde_json::to_writer(&mut wtr, &dates)?;
        writeln!(wtr)?;
    } else {
        for date in rule.dates(&range).take(config.count()) {
            writeln!(wtr, "{date}")?;
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    count: Option<usize>,
    json: bool,
}

impl Config {
    fn count(&self) -> usize {
        self.count.unwrap_or(recur::DEFAULT_MAX)
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
            Short('c') | Long("count") => {
                self.count = Some(args::parse(p, "-c/--count")?);
            }
            Long("json") => {
                self.json = true;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const COUNT: Usage = Usage::flag(
            "-c/--count <number>",
            "Generate at most this number of dates (default 100).",
            r#"
Generate at most this number of dates.

The default is 100. Zero is a legal value, but always results in an empty
sequence. Note that the end date (or the default two year horizon) may cut
the sequence off before this count is reached.
"#,
        );
        const JSON: Usage = Usage::flag(
            "--json",
            "Print the dates as a JSON array instead of one per line.",
            r#"
Print the dates as a JSON array instead of one per line.

Each date is rendered as an ISO 8601 string, e.g., `"2024-07-20"`.
"#,
        );

        &[COUNT, JSON]
    }
}
