//! Provider compensation: classify an occurrence, pick its rate card and add
//! the hour, kilometre and expense components on top of the activation fee.
//!
//! Every step is a pure function of the occurrence facts. Incomplete records
//! still price; what could not be charged is reported as a
//! [`DataQualityWarning`] instead of an error.

pub mod classification;
pub mod domain;
mod engine;
mod expenses;
pub mod measures;
mod normalizer;
pub mod rate_table;
pub mod report;

#[cfg(test)]
mod tests;

pub use classification::{
    classify_occurrence_type, classify_outcome, classify_region, state_code, Classification,
};
pub use domain::{
    BreakdownComponent, CompensationBreakdown, ExpenseEntry, FallbackRates, MacroRegion,
    OccurrenceFacts, OutcomeBucket, RateCard, TypeCategory,
};
pub use engine::{
    compute, CompensationAssessment, CompensationEngine, DataQualityWarning, PricingSource,
};
pub use expenses::sum_expenses;
pub use measures::{distance, minutes_between, overage};
pub use normalizer::normalize;
pub use rate_table::{OutcomeScope, RateRule, RateTable, RateTableError, RegionScope};
pub use report::views::{CompensationReportSummary, RegionTotalEntry, TypeTotalEntry};
pub use report::CompensationReport;
