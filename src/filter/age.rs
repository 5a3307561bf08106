use chrono::{Datelike, NaiveDate};

/// Convert a whole-year age into a date-of-birth cutoff.
///
/// The cutoff is January 1st of `currentYear - age`, which makes the
/// conversion deterministic for a given current date. Returns `None` only
/// for ages that underflow the calendar.
pub fn cutoff_from_age(age: i32, today: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(today.year() - age, 1, 1)
}

/// Calendar age at `today` for someone born on `dob`.
///
/// The year difference is decremented when the birthday has not occurred
/// yet this year. The birthday itself counts as occurred: the comparison on
/// the month/day pair is strict, so a person is their full age on the day.
pub fn age_from_dob(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Human-readable lifespan line for a detail page.
pub fn lifespan_display(dob: NaiveDate, dod: Option<NaiveDate>, today: NaiveDate) -> String {
    match dod {
        Some(dod) => format!("{} - {} (aged {})", dob, dod, age_from_dob(dob, dod)),
        None => format!("{} (age {} years)", dob, age_from_dob(dob, today)),
    }
}
