//! Japanese public holidays under the rules in force since 2020.
//!
//! Besides the named holidays this covers the substitute holiday (a holiday on a Sunday moves
//! to the next day that is not a holiday) and the citizens' holiday (a day squeezed between two
//! holidays). Dates before 2020 are never holidays here.

use chrono::{Datelike, NaiveDate, Weekday};

pub const FIRST_YEAR: i32 = 2020;

const SUBSTITUTE_HOLIDAY: &str = "振替休日";
const CITIZENS_HOLIDAY: &str = "国民の休日";

/// Name of the holiday on `date`, if it is one.
pub fn public_holiday(date: NaiveDate) -> Option<&'static str> {
    if let Some(name) = named_holiday(date) {
        return Some(name);
    }
    if is_substitute(date) {
        return Some(SUBSTITUTE_HOLIDAY);
    }
    let squeezed = date.weekday() != Weekday::Sun
        && date.pred_opt().and_then(named_holiday).is_some()
        && date.succ_opt().and_then(named_holiday).is_some();
    squeezed.then_some(CITIZENS_HOLIDAY)
}

/// Every named holiday of `year`, in calendar order. Empty before [`FIRST_YEAR`].
pub fn named_holidays(year: i32) -> Vec<(NaiveDate, &'static str)> {
    if year < FIRST_YEAR {
        return Vec::new();
    }

    // The 2020 and 2021 Olympics moved three holidays
    let (marine, mountain, sports) = match year {
        2020 => (ymd(2020, 7, 23), ymd(2020, 8, 10), ymd(2020, 7, 24)),
        2021 => (ymd(2021, 7, 22), ymd(2021, 8, 8), ymd(2021, 7, 23)),
        _ => (
            nth_monday(year, 7, 3),
            ymd(year, 8, 11),
            nth_monday(year, 10, 2),
        ),
    };

    let mut holidays: Vec<(NaiveDate, &'static str)> = [
        (ymd(year, 1, 1), "元日"),
        (nth_monday(year, 1, 2), "成人の日"),
        (ymd(year, 2, 11), "建国記念の日"),
        (ymd(year, 2, 23), "天皇誕生日"),
        (ymd(year, 3, equinox_day(year, 20.8431)), "春分の日"),
        (ymd(year, 4, 29), "昭和の日"),
        (ymd(year, 5, 3), "憲法記念日"),
        (ymd(year, 5, 4), "みどりの日"),
        (ymd(year, 5, 5), "こどもの日"),
        (marine, "海の日"),
        (mountain, "山の日"),
        (nth_monday(year, 9, 3), "敬老の日"),
        (ymd(year, 9, equinox_day(year, 23.2488)), "秋分の日"),
        (sports, "スポーツの日"),
        (ymd(year, 11, 3), "文化の日"),
        (ymd(year, 11, 23), "勤労感謝の日"),
    ]
    .into_iter()
    .filter_map(|(date, name)| date.map(|date| (date, name)))
    .collect();
    holidays.sort_by_key(|(date, _)| *date);
    holidays
}

fn named_holiday(date: NaiveDate) -> Option<&'static str> {
    named_holidays(date.year())
        .into_iter()
        .find(|(holiday, _)| *holiday == date)
        .map(|(_, name)| name)
}

/// Walks back over the run of holidays right before `date`; one of them on a Sunday makes
/// `date` its substitute.
fn is_substitute(date: NaiveDate) -> bool {
    let mut day = date.pred_opt();
    while let Some(previous) = day {
        if named_holiday(previous).is_none() {
            return false;
        }
        if previous.weekday() == Weekday::Sun {
            return true;
        }
        day = previous.pred_opt();
    }
    false
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn nth_monday(year: i32, month: u32, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Mon, n)
}

/// Day of month of the vernal (base 20.8431) or autumnal (base 23.2488) equinox. The
/// approximation holds until 2099.
fn equinox_day(year: i32, base: f64) -> u32 {
    let offset = year - 1980;
    (base + 0.242194 * f64::from(offset) - f64::from(offset / 4)).floor() as u32
}
