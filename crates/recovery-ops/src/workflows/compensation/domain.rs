use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Coarse pricing geography derived from the approach site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MacroRegion {
    Capital,
    GrandeSp,
    Interior,
    OutrosEstados,
}

impl MacroRegion {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Capital,
            Self::GrandeSp,
            Self::Interior,
            Self::OutrosEstados,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Capital => "Capital",
            Self::GrandeSp => "Grande SP",
            Self::Interior => "Interior",
            Self::OutrosEstados => "Outros Estados",
        }
    }

    /// Capital and its metropolitan ring share the metro price band.
    pub const fn is_sao_paulo_metro(self) -> bool {
        matches!(self, Self::Capital | Self::GrandeSp)
    }
}

/// Canonical occurrence type used for pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeCategory {
    Antenista,
    RouboFurto,
    Suspeita,
    Preservacao,
    Apropriacao,
    SimplesVerificacao,
    Outro,
}

impl TypeCategory {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Antenista,
            Self::RouboFurto,
            Self::Suspeita,
            Self::Preservacao,
            Self::Apropriacao,
            Self::SimplesVerificacao,
            Self::Outro,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Antenista => "Antenista",
            Self::RouboFurto => "Roubo/Furto",
            Self::Suspeita => "Suspeita",
            Self::Preservacao => "Preservação",
            Self::Apropriacao => "Apropriação",
            Self::SimplesVerificacao => "Simples Verificação",
            Self::Outro => "Outro",
        }
    }
}

/// Canonical result of an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeBucket {
    Recuperado,
    NaoRecuperado,
    Localizado,
    Cancelado,
    EmAndamento,
    Outro,
}

impl OutcomeBucket {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recuperado => "Recuperado",
            Self::NaoRecuperado => "Não Recuperado",
            Self::Localizado => "Localizado",
            Self::Cancelado => "Cancelado",
            Self::EmAndamento => "Em Andamento",
            Self::Outro => "Outro",
        }
    }
}

/// One itemized expense. `amount` is `None` when the operator typed something
/// that is not a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub category: String,
    pub amount: Option<Decimal>,
}

impl ExpenseEntry {
    pub fn new(category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            category: category.into(),
            amount: Some(amount),
        }
    }
}

/// Provider's registered default rates, used only when no rule prices the occurrence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackRates {
    pub base_fee: Decimal,
    pub hourly_rate: Decimal,
    pub km_rate: Decimal,
}

/// Everything the engine needs to know about a finished (or partially filled) occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceFacts {
    pub type_label: String,
    pub state_label: String,
    pub city_label: String,
    pub outcome_label: String,
    #[serde(default)]
    pub sub_outcome_label: Option<String>,
    #[serde(default)]
    pub arrived_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub odometer_start: Option<Decimal>,
    #[serde(default)]
    pub odometer_end: Option<Decimal>,
    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
    #[serde(default)]
    pub raw_fallback: FallbackRates,
}

/// Prices resolved for one occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCard {
    pub base_fee: Decimal,
    pub free_hours: Decimal,
    pub hourly_overage_rate: Decimal,
    pub free_km: Decimal,
    pub km_overage_rate: Decimal,
}

/// Amount owed to the provider, keyed the way the report screens and exports expect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationBreakdown {
    #[serde(rename = "valor_acionamento")]
    pub base_fee: Decimal,
    #[serde(rename = "valor_hora_adc")]
    pub hour_overage_amount: Decimal,
    #[serde(rename = "valor_km_adc")]
    pub km_overage_amount: Decimal,
    #[serde(rename = "despesas")]
    pub expenses_total: Decimal,
    pub total: Decimal,
}

/// A line of the breakdown, as named in warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownComponent {
    BaseFee,
    HourOverage,
    KmOverage,
    Expenses,
}

impl BreakdownComponent {
    pub const fn label(self) -> &'static str {
        match self {
            Self::BaseFee => "valor_acionamento",
            Self::HourOverage => "valor_hora_adc",
            Self::KmOverage => "valor_km_adc",
            Self::Expenses => "despesas",
        }
    }
}

impl CompensationBreakdown {
    /// Rounds each component to cents and derives the total from the rounded parts.
    ///
    /// A component that would carry the total past `Decimal::MAX` is charged as
    /// zero and returned in the second element so the caller can report it.
    pub fn from_components(
        base_fee: Decimal,
        hour_overage_amount: Decimal,
        km_overage_amount: Decimal,
        expenses_total: Decimal,
    ) -> (Self, Vec<BreakdownComponent>) {
        let mut breakdown = Self::default();
        let mut dropped = Vec::new();

        let components = [
            (BreakdownComponent::BaseFee, base_fee),
            (BreakdownComponent::HourOverage, hour_overage_amount),
            (BreakdownComponent::KmOverage, km_overage_amount),
            (BreakdownComponent::Expenses, expenses_total),
        ];
        for (component, amount) in components {
            let amount = to_cents(amount);
            let Some(total) = breakdown.total.checked_add(amount) else {
                dropped.push(component);
                continue;
            };
            breakdown.total = total;
            match component {
                BreakdownComponent::BaseFee => breakdown.base_fee = amount,
                BreakdownComponent::HourOverage => breakdown.hour_overage_amount = amount,
                BreakdownComponent::KmOverage => breakdown.km_overage_amount = amount,
                BreakdownComponent::Expenses => breakdown.expenses_total = amount,
            }
        }

        (breakdown, dropped)
    }
}

fn to_cents(amount: Decimal) -> Decimal {
    amount
        .max(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_are_rounded_before_summing() {
        let (breakdown, dropped) = CompensationBreakdown::from_components(
            Decimal::new(15000, 2),
            Decimal::new(58333, 4),
            Decimal::new(-1, 0),
            Decimal::new(12345, 3),
        );

        assert!(dropped.is_empty());
        assert_eq!(breakdown.hour_overage_amount, Decimal::new(583, 2));
        assert_eq!(breakdown.km_overage_amount, Decimal::ZERO);
        assert_eq!(breakdown.expenses_total, Decimal::new(1235, 2));
        assert_eq!(breakdown.total, Decimal::new(16818, 2));
    }

    #[test]
    fn component_past_the_decimal_range_is_dropped() {
        let (breakdown, dropped) = CompensationBreakdown::from_components(
            Decimal::new(15000, 2),
            Decimal::ZERO,
            Decimal::from(10),
            Decimal::MAX,
        );

        assert_eq!(dropped, vec![BreakdownComponent::Expenses]);
        assert_eq!(breakdown.expenses_total, Decimal::ZERO);
        assert_eq!(breakdown.total, Decimal::new(16000, 2));
    }
}
