use time::{format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime};

pub(crate) fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

pub(crate) fn format_rfc3339(value: OffsetDateTime) -> String {
    value.format(&Rfc3339).unwrap_or_else(|_| value.to_string())
}

/// Calendar day key used for per-day trend buckets, e.g. `2025-01-02`.
pub(crate) fn format_day(value: OffsetDateTime) -> String {
    value
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| value.date().to_string())
}

/// Sunday-based week label, e.g. `Week 07`. Days before the year's first
/// Sunday fall into week 00.
pub(crate) fn format_week(value: OffsetDateTime) -> String {
    format!("Week {:02}", value.sunday_based_week())
}
