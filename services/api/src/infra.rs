use metrics_exporter_prometheus::PrometheusHandle;
use recovery_ops::workflows::compensation::{
    CompensationAssessment, CompensationEngine, CompensationReport,
};
use recovery_ops::workflows::occurrences::OccurrenceRecord;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// One priced row of a batch, keyed by the occurrence id when there is one.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PricedOccurrence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,
    pub(crate) assessment: CompensationAssessment,
}

pub(crate) fn price_occurrence(
    engine: &CompensationEngine,
    record: OccurrenceRecord,
) -> PricedOccurrence {
    let id = record.id.clone();
    let assessment = engine.assess(&record.into_facts());
    PricedOccurrence { id, assessment }
}

pub(crate) fn price_batch(
    engine: &CompensationEngine,
    records: Vec<OccurrenceRecord>,
) -> (Vec<PricedOccurrence>, CompensationReport) {
    let priced: Vec<PricedOccurrence> = records
        .into_iter()
        .map(|record| price_occurrence(engine, record))
        .collect();
    let report = CompensationReport::from_assessments(priced.iter().map(|row| &row.assessment));
    (priced, report)
}
