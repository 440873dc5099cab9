use super::super::domain::{CompensationBreakdown, MacroRegion, TypeCategory};
use super::super::engine::{CompensationAssessment, PricingSource};
use super::views::{CompensationReportSummary, RegionTotalEntry, TypeTotalEntry};
use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
struct Subtotal {
    occurrences: usize,
    total: Decimal,
}

impl Subtotal {
    fn add(&mut self, amount: Decimal) {
        self.occurrences += 1;
        self.total = self.total.saturating_add(amount);
    }
}

/// Column totals over a batch of priced occurrences, as shown on the
/// financial report screens. Sums saturate at `Decimal::MAX`.
#[derive(Debug, Default)]
pub struct CompensationReport {
    totals: CompensationBreakdown,
    occurrences: usize,
    priced_by_fallback: usize,
    with_warnings: usize,
    by_region: HashMap<MacroRegion, Subtotal>,
    by_type: HashMap<TypeCategory, Subtotal>,
}

impl CompensationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_assessments<'a, I>(assessments: I) -> Self
    where
        I: IntoIterator<Item = &'a CompensationAssessment>,
    {
        let mut report = Self::new();
        for assessment in assessments {
            report.record(assessment);
        }
        report
    }

    pub fn record(&mut self, assessment: &CompensationAssessment) {
        let breakdown = &assessment.breakdown;
        self.occurrences += 1;
        let totals = &mut self.totals;
        totals.base_fee = totals.base_fee.saturating_add(breakdown.base_fee);
        totals.hour_overage_amount = totals
            .hour_overage_amount
            .saturating_add(breakdown.hour_overage_amount);
        totals.km_overage_amount = totals
            .km_overage_amount
            .saturating_add(breakdown.km_overage_amount);
        totals.expenses_total = totals
            .expenses_total
            .saturating_add(breakdown.expenses_total);
        totals.total = totals.total.saturating_add(breakdown.total);

        if assessment.pricing == PricingSource::ProviderFallback {
            self.priced_by_fallback += 1;
        }
        if !assessment.warnings.is_empty() {
            self.with_warnings += 1;
        }

        self.by_region
            .entry(assessment.classification.region)
            .or_default()
            .add(breakdown.total);
        self.by_type
            .entry(assessment.classification.category)
            .or_default()
            .add(breakdown.total);
    }

    pub fn totals(&self) -> &CompensationBreakdown {
        &self.totals
    }

    pub fn summary(&self) -> CompensationReportSummary {
        let by_region = MacroRegion::ordered()
            .into_iter()
            .filter_map(|region| {
                self.by_region.get(&region).map(|subtotal| RegionTotalEntry {
                    region,
                    region_label: region.label(),
                    occurrences: subtotal.occurrences,
                    total: subtotal.total,
                })
            })
            .collect();

        let by_type = TypeCategory::ordered()
            .into_iter()
            .filter_map(|category| {
                self.by_type.get(&category).map(|subtotal| TypeTotalEntry {
                    category,
                    category_label: category.label(),
                    occurrences: subtotal.occurrences,
                    total: subtotal.total,
                })
            })
            .collect();

        CompensationReportSummary {
            occurrences: self.occurrences,
            priced_by_rule: self.occurrences - self.priced_by_fallback,
            priced_by_fallback: self.priced_by_fallback,
            with_warnings: self.with_warnings,
            totals: self.totals,
            by_region,
            by_type,
        }
    }
}
