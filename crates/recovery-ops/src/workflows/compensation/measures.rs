use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Whole minutes from `start` to `end`. `None` when either instant is unknown or
/// the interval runs backwards.
pub fn minutes_between(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Option<i64> {
    let (start, end) = (start?, end?);
    if end < start {
        return None;
    }
    Some((end - start).num_minutes())
}

/// Kilometres between two odometer readings. A reading that went backwards is
/// returned as a negative distance; callers decide what to do with it.
///
/// `None` when a reading is missing or the difference does not fit in a `Decimal`.
pub fn distance(odometer_start: Option<Decimal>, odometer_end: Option<Decimal>) -> Option<Decimal> {
    odometer_end?.checked_sub(odometer_start?)
}

/// Billable amount for the part of `quantity` above the free allowance.
/// A quantity equal to the allowance is fully covered. `None` on overflow.
pub fn overage(quantity: Decimal, free_allowance: Decimal, unit_rate: Decimal) -> Option<Decimal> {
    quantity
        .checked_sub(free_allowance)?
        .max(Decimal::ZERO)
        .checked_mul(unit_rate)
}

/// Converts elapsed minutes into fractional hours.
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(60)
}
