use crate::command::assert_cmd_snapshot;

fn preview() -> crate::command::Command {
    crate::cadence(["preview"])
}

#[test]
fn daily() {
    assert_cmd_snapshot!(
        preview().args(["daily"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Preview (50 dates): every day
    Jul 20, 2024
    Jul 21, 2024
    Jul 22, 2024
    Jul 23, 2024
    Jul 24, 2024
    Jul 25, 2024
    Jul 26, 2024
    Jul 27, 2024
    Jul 28, 2024
    Jul 29, 2024
    Jul 30, 2024
    Jul 31, 2024
    Aug 01, 2024
    Aug 02, 2024
    Aug 03, 2024
    Aug 04, 2024
    Aug 05, 2024
    Aug 06, 2024
    Aug 07, 2024
    Aug 08, 2024
    +30 more

    ----- stderr -----
    ",
    );
}

#[test]
fn weekly_day_set() {
    // The start date is a Saturday, so weekly candidates are Saturdays and
    // the set keeps all of them.
    assert_cmd_snapshot!(
        preview().args(["weekly", "-w", "sun,sat"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Preview (50 dates): every week on Sunday, Saturday
    Jul 20, 2024
    Jul 27, 2024
    Aug 03, 2024
    Aug 10, 2024
    Aug 17, 2024
    Aug 24, 2024
    Aug 31, 2024
    Sep 07, 2024
    Sep 14, 2024
    Sep 21, 2024
    Sep 28, 2024
    Oct 05, 2024
    Oct 12, 2024
    Oct 19, 2024
    Oct 26, 2024
    Nov 02, 2024
    Nov 09, 2024
    Nov 16, 2024
    Nov 23, 2024
    Nov 30, 2024
    +30 more

    ----- stderr -----
    ",
    );
}

#[test]
fn monthly_nth_weekday() {
    // 2024-07-09 is the 2nd Tuesday of July 2024. The only other matches
    // before the horizon are the months where the 9th lands on a Tuesday.
    assert_cmd_snapshot!(
        preview().args(["monthly", "-n", "2-tue", "2024-07-09"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Preview (4 dates): every month on the 2nd Tuesday
    Jul 09, 2024
    Sep 09, 2025
    Dec 09, 2025
    Jun 09, 2026

    ----- stderr -----
    ",
    );
}

#[test]
fn yearly_leap_day() {
    // The end date asks for more, but the safety horizon stops generation
    // five years past the start.
    assert_cmd_snapshot!(
        preview().args(["yearly", "-e", "2032-03-01", "2024-02-29"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Preview (2 dates): every year on February 29
    Feb 29, 2024
    Feb 29, 2028

    ----- stderr -----
    ",
    );
}

#[test]
fn empty_preview_is_not_an_error() {
    assert_cmd_snapshot!(
        preview().args(["weekly", "-w", "tue", "-e", "2024-03-31", "2024-01-01"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Preview (0 dates): every week on Tuesday

    ----- stderr -----
    ",
    );
}
