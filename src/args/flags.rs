use std::str::FromStr;

use {anyhow::Context, jiff::civil};

use crate::args::Usage;

/// Provides parsing for Jiff's civil `Weekday` type.
#[derive(Clone, Copy, Debug)]
pub struct Weekday {
    weekday: civil::Weekday,
}

impl Weekday {
    /// Return the parsed weekday.
    pub fn get(&self) -> civil::Weekday {
        self.weekday
    }
}

impl std::str::FromStr for Weekday {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Weekday> {
        use jiff::civil::Weekday::*;

        let weekday = match &*s.to_lowercase() {
            "sunday" | "sun" | "su" => Sunday,
            "monday" | "mon" | "mo" => Monday,
            "tuesday" | "tues" | "tue" | "tu" => Tuesday,
            "wednesday" | "wed" | "we" => Wednesday,
            "thursday" | "thurs" | "thu" | "th" => Thursday,
            "friday" | "fri" | "fr" => Friday,
            "saturday" | "sat" | "sa" => Saturday,
            unk => anyhow::bail!("unrecognized weekday: `{unk}`"),
        };
        Ok(Weekday { weekday })
    }
}

/// A scrappy comma delimited sequence of values.
///
/// This type doesn't have any requirements on `T` other than that it can be
/// parsed and printed. It also requires that `,` cannot appear within the
/// parse format of `T` (since this will try to split the sequence on `,`).
/// That is, there's no support for quoting or escaping the commas.
///
/// This does not impose any requirements on the order of the sequence. It
/// does require that the sequence is not empty though.
#[derive(Clone, Debug)]
pub struct CommaSequence<T>(Vec<T>);

impl<'a, T> IntoIterator for &'a CommaSequence<T> {
    type IntoIter = std::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> std::slice::Iter<'a, T> {
        self.0.iter()
    }
}

impl<T, E> std::str::FromStr for CommaSequence<T>
where
    T: std::str::FromStr<Err = E>,
    Result<T, E>: Context<T, E>,
    E: std::fmt::Display,
{
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<CommaSequence<T>> {
        let mut seq = vec![];
        for item in s.split(",") {
            seq.push(item.parse::<T>().map_err(|err| {
                anyhow::Error::msg(format!(
                    "failed to parse `{item}` \
                     within sequence `{s}`: {err}",
                ))
            })?);
        }
        anyhow::ensure!(!seq.is_empty(), "empty sequences are not allowed",);
        Ok(CommaSequence(seq))
    }
}

/// A numbered weekday within a month, e.g., `2-tue` for the 2nd Tuesday.
///
/// The number must come first so that `1-mon` and friends are unambiguous.
/// Bounds on the number are checked when the recurrence rule is built, not
/// here, so that all range errors are reported in one place.
#[derive(Clone, Copy, Debug)]
pub struct NthWeekday {
    nth: i8,
    weekday: civil::Weekday,
}

impl NthWeekday {
    pub const USAGE: Usage = Usage::flag(
        "-n/--nth <nth-weekday>",
        "Match the Nth weekday of each month, e.g., `2-tue`.",
        r#"
Match the Nth weekday of each month.

The value is a number from 1 to 5 and a weekday, separated by a dash. For
example, `1-mon` is the first Monday of a month and `5-fri` is the fifth
Friday of a month (which only some months have).

This pattern can only be used with monthly frequency. When it is given, it
replaces the default monthly pattern of matching the start date's day of the
month.

A date only matches when it is itself the Nth such weekday of its month. In
particular, months where the generated candidate date does not land on the
requested weekday produce no date rather than shifting to one.
"#,
    );

    /// The occurrence number, expected to be in `1..=5`.
    pub fn nth(&self) -> i8 {
        self.nth
    }

    /// The weekday whose occurrence is counted.
    pub fn weekday(&self) -> civil::Weekday {
        self.weekday
    }
}

impl FromStr for NthWeekday {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<NthWeekday> {
        let Some((nth, weekday)) = s.split_once("-") else {
            anyhow::bail!(
                "invalid numbered weekday `{s}` \
                 (expected a form like `2-tue`)",
            )
        };
        let nth = nth.parse::<i8>().with_context(|| {
            format!("failed to parse `{nth}` as an integer weekday number")
        })?;
        let weekday = weekday.parse::<Weekday>()?.get();
        Ok(NthWeekday { nth, weekday })
    }
}
