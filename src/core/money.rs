//! Whole-unit money helpers shared by every view.

use crate::domain::{Amount, Trip};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Sums `field` over the trips accepted by `predicate`; absent values count as 0.
/// Saturates at the `Amount` bounds.
pub fn sum<'a, I, P, F>(trips: I, predicate: P, field: F) -> Amount
where
    I: IntoIterator<Item = &'a Trip>,
    P: Fn(&Trip) -> bool,
    F: Fn(&Trip) -> Option<Amount>,
{
    trips
        .into_iter()
        .filter(|trip| predicate(*trip))
        .map(|trip| field(trip).unwrap_or(0))
        .fold(0, Amount::saturating_add)
}

/// Field selectors for [`sum`].
pub fn total(trip: &Trip) -> Option<Amount> {
    Some(trip.total_amount)
}

pub fn advance(trip: &Trip) -> Option<Amount> {
    trip.advance_amount
}

pub fn balance(trip: &Trip) -> Option<Amount> {
    Some(trip.balance())
}

/// Renders an amount with a fixed symbol prefix and no grouping.
pub fn format_amount(symbol: &str, amount: Amount) -> String {
    if amount < 0 {
        format!("-{symbol}{}", amount.unsigned_abs())
    } else {
        format!("{symbol}{amount}")
    }
}
