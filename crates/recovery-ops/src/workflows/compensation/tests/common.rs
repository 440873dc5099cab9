use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::workflows::compensation::domain::{ExpenseEntry, FallbackRates, OccurrenceFacts};
use crate::workflows::compensation::CompensationEngine;

pub(super) fn engine() -> CompensationEngine {
    CompensationEngine::standard()
}

pub(super) fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 6)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid timestamp")
}

pub(super) fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub(super) fn km(value: i64) -> Decimal {
    Decimal::from(value)
}

pub(super) fn provider_rates() -> FallbackRates {
    FallbackRates {
        base_fee: money(17500),
        hourly_rate: money(2500),
        km_rate: money(90),
    }
}

/// Roubo in the capital, 10:00 -> 14:30, 100 -> 180 km, one R$ 50,00 expense.
pub(super) fn capital_theft() -> OccurrenceFacts {
    OccurrenceFacts {
        type_label: "Roubo".to_string(),
        state_label: "SP".to_string(),
        city_label: "São Paulo".to_string(),
        outcome_label: "RECUPERADO".to_string(),
        sub_outcome_label: None,
        arrived_at: Some(at(10, 0)),
        completed_at: Some(at(14, 30)),
        odometer_start: Some(km(100)),
        odometer_end: Some(km(180)),
        expenses: vec![ExpenseEntry::new("Pedágio", money(5000))],
        raw_fallback: provider_rates(),
    }
}

pub(super) fn facts_for(type_label: &str, state: &str, city: &str, outcome: &str) -> OccurrenceFacts {
    OccurrenceFacts {
        type_label: type_label.to_string(),
        state_label: state.to_string(),
        city_label: city.to_string(),
        outcome_label: outcome.to_string(),
        raw_fallback: provider_rates(),
        ..OccurrenceFacts::default()
    }
}
