mod occurrence_type;
mod outcome;
mod region;

pub use occurrence_type::classify_occurrence_type;
pub use outcome::classify_outcome;
pub use region::{classify_region, state_code};

use super::domain::{MacroRegion, OccurrenceFacts, OutcomeBucket, TypeCategory};
use serde::{Deserialize, Serialize};

/// The three categorical dimensions the rate table is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    pub category: TypeCategory,
    pub region: MacroRegion,
    pub outcome: OutcomeBucket,
}

impl Classification {
    pub fn of(facts: &OccurrenceFacts) -> Self {
        Self {
            region: classify_region(&facts.state_label, &facts.city_label),
            category: classify_occurrence_type(&facts.type_label),
            outcome: classify_outcome(&facts.outcome_label, facts.sub_outcome_label.as_deref()),
        }
    }
}
