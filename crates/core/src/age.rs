//! Age calculation from `MMDDYYYY` birth and death dates.
//!
//! Dates may be partial: `00` in the month or day position means the
//! value is unknown. With a partial date only the year difference is
//! meaningful, so that is what gets returned.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::CoreError;

/// Accepted shape of a birth or death date.
///
/// Month `01`-`12` or `00`, day `01`-`31` or `00`, year `17xx`-`20xx`.
pub const LEGACY_DATE_PATTERN: &str =
    r"^(0[1-9]|1[0-2]|00)(0[1-9]|[12][0-9]|3[01]|00)(1[7-9]|20)\d{2}$";

static LEGACY_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LEGACY_DATE_PATTERN).expect("valid regex"));

/// Largest age the form and the API accept.
pub const MAX_AGE: i32 = 150;

/// A parsed `MMDDYYYY` date. `month` and `day` are zero when unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyDate {
    pub month: u32,
    pub day: u32,
    pub year: i32,
}

impl LegacyDate {
    /// True when the month or the day is unknown.
    pub fn is_partial(&self) -> bool {
        self.month == 0 || self.day == 0
    }

    /// Calendar date, or `None` for partial dates and impossible
    /// combinations such as February 30th.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        if self.is_partial() {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl FromStr for LegacyDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_legacy_date(s) {
            return Err(CoreError::InvalidDate(s.to_string()));
        }
        // The pattern guarantees eight ASCII digits.
        let num = |range: std::ops::Range<usize>| -> Result<u32, CoreError> {
            s[range]
                .parse()
                .map_err(|_| CoreError::InvalidDate(s.to_string()))
        };
        Ok(Self {
            month: num(0..2)?,
            day: num(2..4)?,
            year: num(4..8)? as i32,
        })
    }
}

/// Whether `s` matches [`LEGACY_DATE_PATTERN`] exactly (no trimming).
pub fn is_legacy_date(s: &str) -> bool {
    LEGACY_DATE_RE.is_match(s)
}

/// Parse a trimmed `MMDDYYYY` string. Returns `None` for blank or
/// malformed input.
pub fn parse_legacy_date(s: &str) -> Option<LegacyDate> {
    s.trim().parse().ok()
}

/// Compute the age at death in whole years.
///
/// Returns `None` when either date is missing or malformed, when death
/// precedes birth, when a full date does not exist on the calendar, or
/// when the result falls outside `0..=150`.
///
/// ```
/// use obitpub_core::calculate_age;
///
/// assert_eq!(calculate_age("06151980", "06142020"), Some(39));
/// assert_eq!(calculate_age("06151980", "06152020"), Some(40));
/// assert_eq!(calculate_age("00001950", "00002020"), Some(70));
/// assert_eq!(calculate_age("06152020", "06151980"), None);
/// ```
pub fn calculate_age(dob: &str, dod: &str) -> Option<u8> {
    let birth = parse_legacy_date(dob)?;
    let death = parse_legacy_date(dod)?;

    if birth.is_partial() || death.is_partial() {
        return within_range(death.year - birth.year);
    }

    let birth_date = birth.to_naive_date()?;
    let death_date = death.to_naive_date()?;
    if death_date < birth_date {
        return None;
    }

    let mut age = death.year - birth.year;
    if (death.month, death.day) < (birth.month, birth.day) {
        age -= 1;
    }
    within_range(age)
}

fn within_range(age: i32) -> Option<u8> {
    if (0..=MAX_AGE).contains(&age) {
        u8::try_from(age).ok()
    } else {
        None
    }
}
