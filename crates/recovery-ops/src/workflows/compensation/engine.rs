use super::classification::Classification;
use super::domain::{BreakdownComponent, CompensationBreakdown, OccurrenceFacts, RateCard};
use super::expenses::tally_expenses;
use super::measures::{distance, minutes_between, minutes_to_hours, overage};
use super::rate_table::RateTable;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{debug, warn};

static STANDARD_ENGINE: OnceLock<CompensationEngine> = OnceLock::new();

/// Prices an occurrence with the standard rate table.
pub fn compute(facts: &OccurrenceFacts) -> CompensationBreakdown {
    STANDARD_ENGINE
        .get_or_init(CompensationEngine::standard)
        .compute(facts)
}

/// Something about the input the caller should look at, even though a
/// breakdown was still produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityWarning {
    /// The odometer went backwards; no kilometre overage was charged.
    NegativeDistance { distance: Decimal },
    /// Completion was recorded before arrival; no hour overage was charged.
    CompletionBeforeArrival,
    /// An expense had no usable amount and was left out of the total.
    MalformedExpense { category: String },
    /// No rule priced the occurrence; the provider's registered rates were used.
    NoRateRule,
    /// The provider's registered activation fee is negative; nothing was charged for it.
    NegativeFallbackFee { base_fee: Decimal },
    /// Both odometer readings are present but their difference does not fit in a
    /// `Decimal`; the distance is treated as unknown.
    DistanceOutOfRange,
    /// A component could not be represented and was charged as zero.
    AmountOutOfRange { component: BreakdownComponent },
}

impl DataQualityWarning {
    pub fn summary(&self) -> String {
        match self {
            Self::NegativeDistance { distance } => {
                format!("odometer reading went backwards ({distance} km)")
            }
            Self::CompletionBeforeArrival => "completion recorded before arrival".to_string(),
            Self::MalformedExpense { category } => {
                format!("expense '{category}' has no usable amount")
            }
            Self::NoRateRule => "no rate rule matched; provider fallback rates used".to_string(),
            Self::NegativeFallbackFee { base_fee } => {
                format!("provider activation fee is negative ({base_fee}); charged as zero")
            }
            Self::DistanceOutOfRange => "odometer readings are out of range".to_string(),
            Self::AmountOutOfRange { component } => {
                format!("{} is out of range; charged as zero", component.label())
            }
        }
    }
}

/// Where the base fee came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PricingSource {
    RateRule { rule_id: String, card: RateCard },
    ProviderFallback,
}

/// Breakdown plus the trail that explains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationAssessment {
    pub classification: Classification,
    pub pricing: PricingSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<Decimal>,
    pub breakdown: CompensationBreakdown,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DataQualityWarning>,
}

/// Stateless calculator that applies a rate table to occurrence facts.
#[derive(Debug, Clone)]
pub struct CompensationEngine {
    table: RateTable,
}

impl CompensationEngine {
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }

    pub fn standard() -> Self {
        Self::new(RateTable::standard())
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    pub fn compute(&self, facts: &OccurrenceFacts) -> CompensationBreakdown {
        self.assess(facts).breakdown
    }

    pub fn assess(&self, facts: &OccurrenceFacts) -> CompensationAssessment {
        let classification = Classification::of(facts);
        let mut warnings = Vec::new();

        let elapsed_minutes = minutes_between(facts.arrived_at, facts.completed_at);
        if let (Some(arrived), Some(completed)) = (facts.arrived_at, facts.completed_at) {
            if completed < arrived {
                warnings.push(DataQualityWarning::CompletionBeforeArrival);
            }
        }

        let distance_km = distance(facts.odometer_start, facts.odometer_end);
        if distance_km.is_none() && facts.odometer_start.is_some() && facts.odometer_end.is_some() {
            warnings.push(DataQualityWarning::DistanceOutOfRange);
        }
        if let Some(km) = distance_km.filter(Decimal::is_sign_negative) {
            warnings.push(DataQualityWarning::NegativeDistance { distance: km });
        }

        let rule = self.table.matching_rule(
            classification.category,
            classification.region,
            classification.outcome,
        );

        let mut out_of_range = Vec::new();
        let (pricing, base_fee, hour_overage_amount, km_overage_amount) = match rule {
            Some(rule) => {
                let card = rule.card;
                let hours = elapsed_minutes
                    .map(|minutes| {
                        overage(
                            minutes_to_hours(minutes),
                            card.free_hours,
                            card.hourly_overage_rate,
                        )
                    })
                    .unwrap_or(Some(Decimal::ZERO))
                    .unwrap_or_else(|| {
                        out_of_range.push(BreakdownComponent::HourOverage);
                        Decimal::ZERO
                    });
                let km = distance_km
                    .map(|km| overage(km, card.free_km, card.km_overage_rate))
                    .unwrap_or(Some(Decimal::ZERO))
                    .unwrap_or_else(|| {
                        out_of_range.push(BreakdownComponent::KmOverage);
                        Decimal::ZERO
                    });
                let pricing = PricingSource::RateRule {
                    rule_id: rule.id.clone(),
                    card,
                };
                (pricing, card.base_fee, hours, km)
            }
            None => {
                warnings.push(DataQualityWarning::NoRateRule);
                let base_fee = facts.raw_fallback.base_fee;
                if base_fee.is_sign_negative() && !base_fee.is_zero() {
                    warnings.push(DataQualityWarning::NegativeFallbackFee { base_fee });
                }
                (
                    PricingSource::ProviderFallback,
                    base_fee,
                    Decimal::ZERO,
                    Decimal::ZERO,
                )
            }
        };

        let expenses = tally_expenses(&facts.expenses);
        warnings.extend(
            expenses
                .rejected
                .iter()
                .map(|entry| DataQualityWarning::MalformedExpense {
                    category: entry.category.clone(),
                }),
        );

        let (breakdown, dropped) = CompensationBreakdown::from_components(
            base_fee,
            hour_overage_amount,
            km_overage_amount,
            expenses.total,
        );
        out_of_range.extend(dropped);
        warnings.extend(
            out_of_range
                .into_iter()
                .map(|component| DataQualityWarning::AmountOutOfRange { component }),
        );

        debug!(
            category = ?classification.category,
            region = ?classification.region,
            outcome = ?classification.outcome,
            total = %breakdown.total,
            "occurrence priced"
        );
        for warning in &warnings {
            warn!(type_label = %facts.type_label, "{}", warning.summary());
        }

        CompensationAssessment {
            classification,
            pricing,
            elapsed_minutes,
            distance_km,
            breakdown,
            warnings,
        }
    }
}

impl Default for CompensationEngine {
    fn default() -> Self {
        Self::standard()
    }
}
