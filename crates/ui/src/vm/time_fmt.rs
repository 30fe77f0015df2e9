use chrono::{DateTime, Utc};

/// Day-level date in the `dd.mm.yyyy` form used across the pages.
#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%d.%m.%Y").to_string()
}
