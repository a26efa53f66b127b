//! Age arithmetic on calendar dates.

use chrono::{Datelike, NaiveDate};

/// Completed years between `dob` and `on`.
///
/// Returns `None` when `on` is before the date of birth.
pub fn age_on(dob: NaiveDate, on: NaiveDate) -> Option<u32> {
    let mut years = on.year() - dob.year();
    if (on.month(), on.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// The age the person turns on their next birthday after `today`.
pub fn age_next_birthday(dob: NaiveDate, today: NaiveDate) -> Option<u32> {
    age_on(dob, today).map(|age| age + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_before_and_on_birthday() {
        let dob = date(1955, 6, 15);
        assert_eq!(age_on(dob, date(2025, 6, 14)), Some(69));
        assert_eq!(age_on(dob, date(2025, 6, 15)), Some(70));
    }

    #[test]
    fn next_birthday_age_is_one_more() {
        let dob = date(1955, 6, 15);
        assert_eq!(age_next_birthday(dob, date(2025, 6, 14)), Some(70));
        assert_eq!(age_next_birthday(dob, date(2025, 6, 15)), Some(71));
    }

    #[test]
    fn leap_day_birthday_counts_from_march_in_common_years() {
        let dob = date(1956, 2, 29);
        assert_eq!(age_on(dob, date(2025, 2, 28)), Some(68));
        assert_eq!(age_on(dob, date(2025, 3, 1)), Some(69));
    }

    #[test]
    fn date_before_birth_has_no_age() {
        assert_eq!(age_on(date(2000, 1, 2), date(2000, 1, 1)), None);
    }
}
