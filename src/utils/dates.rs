use time::OffsetDateTime;

/// Whole years between `date_of_birth` and `now`.
///
/// The year difference is reduced by one while this year's birthday is still
/// ahead of `now`. Instants are compared, so offsets are honoured.
pub fn age_at(date_of_birth: OffsetDateTime, now: OffsetDateTime) -> i32 {
    let mut age = now.year() - date_of_birth.year();
    if now < add_years(date_of_birth, age) {
        age -= 1;
    }
    age
}

fn add_years(date: OffsetDateTime, years: i32) -> OffsetDateTime {
    let year = date.year() + years;
    date.replace_year(year).unwrap_or_else(|_| {
        // 29 February in a non-leap year becomes 28 February.
        date.replace_day(28)
            .and_then(|date| date.replace_year(year))
            .unwrap_or(date)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn birthday_not_reached_yet() {
        let born = datetime!(2000-06-15 0:00 UTC);
        assert_eq!(age_at(born, datetime!(2024-06-14 0:00 UTC)), 23);
    }

    #[test]
    fn birthday_already_passed() {
        let born = datetime!(2000-06-15 0:00 UTC);
        assert_eq!(age_at(born, datetime!(2024-06-16 0:00 UTC)), 24);
    }

    #[test]
    fn birthday_today_counts() {
        let born = datetime!(2000-06-15 0:00 UTC);
        assert_eq!(age_at(born, datetime!(2024-06-15 0:00 UTC)), 24);
    }

    #[test]
    fn offsets_are_compared_as_instants() {
        // 2000-06-15 00:00 at +02:00 is 2000-06-14 22:00 UTC.
        let born = datetime!(2000-06-15 0:00 +2);
        assert_eq!(age_at(born, datetime!(2024-06-14 23:00 UTC)), 24);
        assert_eq!(age_at(born, datetime!(2024-06-14 21:00 UTC)), 23);
    }

    #[test]
    fn leap_day_birthdays_roll_back_to_28_february() {
        let born = datetime!(2004-02-29 0:00 UTC);
        assert_eq!(age_at(born, datetime!(2023-02-27 12:00 UTC)), 18);
        assert_eq!(age_at(born, datetime!(2023-02-28 12:00 UTC)), 19);
        assert_eq!(age_at(born, datetime!(2024-02-29 0:00 UTC)), 20);
    }
}
