use super::super::domain::OutcomeBucket;
use super::super::normalizer::normalize;

/// "nao recuperado" has to be tested before "recuperado", which it contains.
const OUTCOME_KEYWORDS: &[(&str, OutcomeBucket)] = &[
    ("nao recuperado", OutcomeBucket::NaoRecuperado),
    ("recuperado", OutcomeBucket::Recuperado),
    ("localizado", OutcomeBucket::Localizado),
    ("cancelado", OutcomeBucket::Cancelado),
];

/// Maps a result label and its optional qualifier to an outcome bucket.
///
/// The result label decides on its own when it is recognized. The qualifier is
/// only consulted when the result is blank or unrecognized; a blank result with
/// nothing usable in the qualifier means the occurrence is still open.
pub fn classify_outcome(outcome_label: &str, sub_outcome_label: Option<&str>) -> OutcomeBucket {
    let outcome = normalize(outcome_label);
    if let Some(bucket) = match_keywords(&outcome) {
        return bucket;
    }

    let sub_outcome = sub_outcome_label.map(normalize).unwrap_or_default();
    if let Some(bucket) = match_keywords(&sub_outcome) {
        return bucket;
    }

    if outcome.is_empty() {
        OutcomeBucket::EmAndamento
    } else {
        OutcomeBucket::Outro
    }
}

fn match_keywords(normalized: &str) -> Option<OutcomeBucket> {
    if normalized.is_empty() {
        return None;
    }

    OUTCOME_KEYWORDS
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
        .map(|(_, bucket)| *bucket)
}
