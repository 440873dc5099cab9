use super::super::domain::TypeCategory;
use super::super::normalizer::normalize;

/// Evaluated top to bottom; a label such as "Suspeita de roubo" must price as
/// roubo/furto, so the order of this table is part of the pricing rules.
const TYPE_KEYWORDS: &[(&str, TypeCategory)] = &[
    ("antenista", TypeCategory::Antenista),
    ("roubo", TypeCategory::RouboFurto),
    ("furto", TypeCategory::RouboFurto),
    ("suspeita", TypeCategory::Suspeita),
    ("preservacao", TypeCategory::Preservacao),
    ("apropriacao", TypeCategory::Apropriacao),
    ("simples verificacao", TypeCategory::SimplesVerificacao),
];

/// Maps an operator-entered occurrence type to its pricing category.
pub fn classify_occurrence_type(type_label: &str) -> TypeCategory {
    let normalized = normalize(type_label);

    TYPE_KEYWORDS
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(TypeCategory::Outro)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earlier_keywords_win_over_later_ones() {
        assert_eq!(
            classify_occurrence_type("Suspeita de Roubo"),
            TypeCategory::RouboFurto
        );
        assert_eq!(
            classify_occurrence_type("Antenista - preservação de local"),
            TypeCategory::Antenista
        );
    }

    #[test]
    fn keywords_match_regardless_of_accents_and_case() {
        assert_eq!(
            classify_occurrence_type("APROPRIAÇÃO INDÉBITA"),
            TypeCategory::Apropriacao
        );
        assert_eq!(
            classify_occurrence_type("Simples  Verificação"),
            TypeCategory::SimplesVerificacao
        );
        assert_eq!(classify_occurrence_type("furto"), TypeCategory::RouboFurto);
    }

    #[test]
    fn unknown_labels_fall_back_to_outro() {
        assert_eq!(classify_occurrence_type("Outro serviço"), TypeCategory::Outro);
        assert_eq!(classify_occurrence_type(""), TypeCategory::Outro);
    }
}
