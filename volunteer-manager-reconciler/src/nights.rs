use std::collections::BTreeSet;

use chrono::NaiveDate;
use itertools::Itertools;

/// Every night of a stay: from check-in (inclusive) to check-out (exclusive).
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    check_in.iter_days().take_while(move |night| *night < check_out)
}

#[must_use]
pub fn format_nights(nights: &BTreeSet<NaiveDate>) -> String {
    nights
        .iter()
        .map(|night| night.format("%Y-%m-%d"))
        .join(", ")
}
