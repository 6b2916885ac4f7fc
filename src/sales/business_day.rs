use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};

/// The shop's business day runs on Bolivia time, a fixed UTC-4 offset with
/// no daylight saving. Sales are bucketed in this offset no matter how the
/// host clock is configured, so reports agree across devices.
pub fn shop_offset() -> FixedOffset {
    FixedOffset::west_opt(4 * 3600).expect("valid offset")
}

/// The business day an instant falls on
pub fn business_day(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&shop_offset()).date_naive()
}

/// Today's business day
pub fn business_today() -> NaiveDate {
    business_day(Utc::now())
}

/// The business day before the one an instant falls on
pub fn yesterday_of(instant: DateTime<Utc>) -> NaiveDate {
    let today = business_day(instant);
    today.checked_sub_signed(Duration::days(1)).unwrap_or(today)
}
