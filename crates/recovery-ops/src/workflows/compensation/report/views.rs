use super::super::domain::{CompensationBreakdown, MacroRegion, TypeCategory};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RegionTotalEntry {
    pub region: MacroRegion,
    pub region_label: &'static str,
    pub occurrences: usize,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeTotalEntry {
    pub category: TypeCategory,
    pub category_label: &'static str,
    pub occurrences: usize,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompensationReportSummary {
    pub occurrences: usize,
    pub priced_by_rule: usize,
    pub priced_by_fallback: usize,
    pub with_warnings: usize,
    pub totals: CompensationBreakdown,
    pub by_region: Vec<RegionTotalEntry>,
    pub by_type: Vec<TypeTotalEntry>,
}
