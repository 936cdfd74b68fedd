use crate::command::assert_cmd_snapshot;

fn grid() -> crate::command::Command {
    crate::cadence(["grid"])
}

#[test]
fn monthly_with_end_date() {
    assert_cmd_snapshot!(
        grid().args(["monthly", "-e", "2024-09-30", "2024-07-15"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
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

    ----- stderr -----
    ",
    );
}

#[test]
fn daily_interval_three() {
    assert_cmd_snapshot!(
        grid().args(["daily", "-i3"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
             July 2024
    Sun Mon Tue Wed Thu Fri Sat
         1   2   3   4   5   6
     7   8   9  10  11  12  13
    14  15  16  17  18  19  20>
    21  22  23* 24  25  26* 27
    28  29* 30  31

            August 2024
    Sun Mon Tue Wed Thu Fri Sat
                     1*  2   3
     4*  5   6   7*  8   9  10*
    11  12  13* 14  15  16* 17
    18  19* 20  21  22* 23  24
    25* 26  27  28* 29  30  31*

          September 2024
    Sun Mon Tue Wed Thu Fri Sat
     1   2   3*  4   5   6*  7
     8   9* 10  11  12* 13  14
    15* 16  17  18* 19  20  21*
    22  23  24* 25  26  27* 28
    29  30*

    > start date    * recurring date
    Showing 50 recurring dates (limited to 50 for preview)

    ----- stderr -----
    ",
    );
}

#[test]
fn weekly_two_months() {
    assert_cmd_snapshot!(
        grid().args(["weekly", "-m2"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
             July 2024
    Sun Mon Tue Wed Thu Fri Sat
         1   2   3   4   5   6
     7   8   9  10  11  12  13
    14  15  16  17  18  19  20>
    21  22  23  24  25  26  27*
    28  29  30  31

            August 2024
    Sun Mon Tue Wed Thu Fri Sat
                     1   2   3*
     4   5   6   7   8   9  10*
    11  12  13  14  15  16  17*
    18  19  20  21  22  23  24*
    25  26  27  28  29  30  31*

    > start date    * recurring date
    Showing 50 recurring dates (limited to 50 for preview)

    ----- stderr -----
    ",
    );
}

#[test]
fn monthly_nth_weekday_single_panel() {
    assert_cmd_snapshot!(
        grid().args(["monthly", "-n", "1-mon", "-m1", "2024-07-01"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
             July 2024
    Sun Mon Tue Wed Thu Fri Sat
         1>  2   3   4   5   6
     7   8   9  10  11  12  13
    14  15  16  17  18  19  20
    21  22  23  24  25  26  27
    28  29  30  31

    > start date    * recurring date
    Showing 4 recurring dates

    ----- stderr -----
    ",
    );
}

#[test]
fn months_must_be_positive() {
    assert_cmd_snapshot!(
        grid().args(["daily", "-m0"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    the --months value must be at least 1
    ",
    );
}
