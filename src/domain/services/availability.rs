use chrono::NaiveDate;

/// True when the two date ranges share at least one occupied day.
///
/// Bounds are inclusive on both sides, so a stay ending on the 12th
/// conflicts with a stay starting on the 12th. Checkout day is treated
/// as occupied; back-to-back bookings need a one-day gap.
pub fn overlaps(
    existing_start: NaiveDate,
    existing_end: NaiveDate,
    requested_start: NaiveDate,
    requested_end: NaiveDate,
) -> bool {
    existing_start <= requested_end && existing_end >= requested_start
}

/// Number of charged nights. The end date itself is not charged:
/// 10th to 12th is two nights.
pub fn nights(start_date: NaiveDate, end_date: NaiveDate) -> i64 {
    (end_date - start_date).num_days()
}

pub fn total_price(price_per_day: f64, start_date: NaiveDate, end_date: NaiveDate) -> f64 {
    price_per_day * nights(start_date, end_date) as f64
}
