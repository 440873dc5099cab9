use super::domain::{MacroRegion, OutcomeBucket, RateCard, TypeCategory};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Which macro-regions a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionScope {
    Any,
    /// Capital and Grande SP.
    SaoPauloMetro,
    /// Interior and other states.
    Elsewhere,
}

impl RegionScope {
    pub fn admits(self, region: MacroRegion) -> bool {
        match self {
            Self::Any => true,
            Self::SaoPauloMetro => region.is_sao_paulo_metro(),
            Self::Elsewhere => !region.is_sao_paulo_metro(),
        }
    }
}

/// Which outcomes a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", content = "outcomes", rename_all = "snake_case")]
pub enum OutcomeScope {
    Any,
    OneOf(Vec<OutcomeBucket>),
    NoneOf(Vec<OutcomeBucket>),
}

impl OutcomeScope {
    pub fn admits(&self, outcome: OutcomeBucket) -> bool {
        match self {
            Self::Any => true,
            Self::OneOf(outcomes) => outcomes.contains(&outcome),
            Self::NoneOf(outcomes) => !outcomes.contains(&outcome),
        }
    }
}

/// One row of the pricing matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRule {
    pub id: String,
    pub category: TypeCategory,
    pub regions: RegionScope,
    pub outcomes: OutcomeScope,
    pub card: RateCard,
}

impl RateRule {
    pub fn matches(&self, category: TypeCategory, region: MacroRegion, outcome: OutcomeBucket) -> bool {
        self.category == category && self.regions.admits(region) && self.outcomes.admits(outcome)
    }
}

#[derive(Debug, Error)]
pub enum RateTableError {
    #[error("failed to read rate table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rate table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rate table has no rules")]
    Empty,
    #[error("rate rule id '{0}' appears more than once")]
    DuplicateRule(String),
    #[error("rate rule '{0}' has a negative amount")]
    NegativeAmount(String),
}

/// Ordered pricing matrix; the first rule that admits a classification prices it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    rules: Vec<RateRule>,
}

impl RateTable {
    pub fn new(rules: Vec<RateRule>) -> Result<Self, RateTableError> {
        let table = Self { rules };
        table.validate()?;
        Ok(table)
    }

    /// The matrix the dispatch desk pays providers by.
    pub fn standard() -> Self {
        use OutcomeBucket::{Localizado, NaoRecuperado, Recuperado};
        use RegionScope::{Elsewhere, SaoPauloMetro};
        use TypeCategory::{
            Antenista, Apropriacao, Preservacao, RouboFurto, SimplesVerificacao, Suspeita,
        };

        let recovered_or_not = || OutcomeScope::OneOf(vec![Recuperado, NaoRecuperado]);

        let rules = vec![
            rule("antenista_sp_metro", Antenista, SaoPauloMetro, OutcomeScope::Any, 25000, 3000),
            rule("antenista_elsewhere", Antenista, Elsewhere, OutcomeScope::Any, 25000, 3500),
            rule("roubo_furto_sp_metro", RouboFurto, SaoPauloMetro, OutcomeScope::Any, 15000, 3000),
            rule("roubo_furto_elsewhere", RouboFurto, Elsewhere, recovered_or_not(), 20000, 3500),
            rule("suspeita_sp_metro", Suspeita, SaoPauloMetro, OutcomeScope::Any, 15000, 3000),
            rule("suspeita_elsewhere", Suspeita, Elsewhere, recovered_or_not(), 20000, 3500),
            rule("preservacao_sp_metro", Preservacao, SaoPauloMetro, OutcomeScope::Any, 20000, 3000),
            rule("preservacao_elsewhere", Preservacao, Elsewhere, OutcomeScope::Any, 20000, 3500),
            rule(
                "apropriacao_sp_metro_recuperado",
                Apropriacao,
                SaoPauloMetro,
                OutcomeScope::OneOf(vec![Recuperado]),
                20000,
                3000,
            ),
            rule(
                "apropriacao_sp_metro_outros",
                Apropriacao,
                SaoPauloMetro,
                OutcomeScope::NoneOf(vec![Recuperado]),
                10000,
                3000,
            ),
            rule(
                "apropriacao_elsewhere_recuperado",
                Apropriacao,
                Elsewhere,
                OutcomeScope::OneOf(vec![Recuperado]),
                25000,
                3500,
            ),
            rule(
                "apropriacao_elsewhere_nao_recuperado",
                Apropriacao,
                Elsewhere,
                OutcomeScope::OneOf(vec![NaoRecuperado, Localizado]),
                10000,
                3500,
            ),
            rule(
                "simples_verificacao_sp_metro",
                SimplesVerificacao,
                SaoPauloMetro,
                OutcomeScope::Any,
                10000,
                3000,
            ),
            rule(
                "simples_verificacao_elsewhere",
                SimplesVerificacao,
                Elsewhere,
                OutcomeScope::Any,
                10000,
                3500,
            ),
        ];

        Self { rules }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RateTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RateTableError> {
        let table: Self = serde_json::from_reader(reader)?;
        table.validate()?;
        Ok(table)
    }

    pub fn rules(&self) -> &[RateRule] {
        &self.rules
    }

    pub fn matching_rule(
        &self,
        category: TypeCategory,
        region: MacroRegion,
        outcome: OutcomeBucket,
    ) -> Option<&RateRule> {
        self.rules
            .iter()
            .find(|rule| rule.matches(category, region, outcome))
    }

    /// Rate card for the classification, or `None` when no rule prices it.
    pub fn resolve(
        &self,
        category: TypeCategory,
        region: MacroRegion,
        outcome: OutcomeBucket,
    ) -> Option<RateCard> {
        self.matching_rule(category, region, outcome)
            .map(|rule| rule.card)
    }

    fn validate(&self) -> Result<(), RateTableError> {
        if self.rules.is_empty() {
            return Err(RateTableError::Empty);
        }

        let mut seen = HashSet::with_capacity(self.rules.len());
        for rule in &self.rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(RateTableError::DuplicateRule(rule.id.clone()));
            }

            let card = &rule.card;
            let amounts = [
                card.base_fee,
                card.free_hours,
                card.hourly_overage_rate,
                card.free_km,
                card.km_overage_rate,
            ];
            if amounts.iter().any(Decimal::is_sign_negative) {
                return Err(RateTableError::NegativeAmount(rule.id.clone()));
            }
        }

        Ok(())
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Every standard rule shares the 3 h / 50 km franchise and R$ 1,00 per extra km.
fn rule(
    id: &str,
    category: TypeCategory,
    regions: RegionScope,
    outcomes: OutcomeScope,
    base_fee_cents: i64,
    hourly_rate_cents: i64,
) -> RateRule {
    RateRule {
        id: id.to_string(),
        category,
        regions,
        outcomes,
        card: RateCard {
            base_fee: Decimal::new(base_fee_cents, 2),
            free_hours: Decimal::from(3),
            hourly_overage_rate: Decimal::new(hourly_rate_cents, 2),
            free_km: Decimal::from(50),
            km_overage_rate: Decimal::new(100, 2),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn standard_table_passes_validation() {
        let table = RateTable::standard();
        assert!(table.validate().is_ok());
        assert_eq!(table.rules().len(), 14);
    }

    #[test]
    fn standard_table_survives_json_round_trip() {
        let table = RateTable::standard();
        let json = serde_json::to_string(&table).expect("serialize table");
        let loaded = RateTable::from_reader(Cursor::new(json)).expect("load table");
        assert_eq!(loaded, table);
    }

    #[test]
    fn rejects_duplicate_rule_ids() {
        let mut rules = RateTable::standard().rules().to_vec();
        rules.push(rules[0].clone());
        match RateTable::new(rules) {
            Err(RateTableError::DuplicateRule(id)) => assert_eq!(id, "antenista_sp_metro"),
            other => panic!("expected duplicate rule error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_amounts_and_empty_tables() {
        let mut rules = RateTable::standard().rules().to_vec();
        rules[2].card.km_overage_rate = Decimal::new(-1, 0);
        assert!(matches!(
            RateTable::new(rules),
            Err(RateTableError::NegativeAmount(id)) if id == "roubo_furto_sp_metro"
        ));
        assert!(matches!(RateTable::new(Vec::new()), Err(RateTableError::Empty)));
    }

    #[test]
    fn loads_hand_written_json() {
        let json = r#"{
            "rules": [{
                "id": "custom",
                "category": "ROUBO_FURTO",
                "regions": "any",
                "outcomes": { "match": "one_of", "outcomes": ["RECUPERADO"] },
                "card": {
                    "base_fee": 180.0,
                    "free_hours": 2,
                    "hourly_overage_rate": 40.0,
                    "free_km": 30,
                    "km_overage_rate": 1.5
                }
            }]
        }"#;
        let table = RateTable::from_reader(Cursor::new(json)).expect("load custom table");
        let card = table
            .resolve(
                TypeCategory::RouboFurto,
                MacroRegion::Interior,
                OutcomeBucket::Recuperado,
            )
            .expect("custom rule matches");
        assert_eq!(card.base_fee, Decimal::from(180));
        assert_eq!(card.km_overage_rate, Decimal::new(15, 1));
        assert!(table
            .resolve(
                TypeCategory::RouboFurto,
                MacroRegion::Interior,
                OutcomeBucket::Cancelado,
            )
            .is_none());
    }
}
