use super::super::domain::MacroRegion;
use super::super::normalizer::{contains_words, normalize};
use std::collections::HashMap;
use std::sync::OnceLock;

static STATE_SYNONYMS: OnceLock<HashMap<String, &'static str>> = OnceLock::new();

const SAO_PAULO_UF: &str = "SP";
const CAPITAL_MARKER: &str = "sao paulo";

/// Municipalities of the São Paulo metropolitan region other than the capital,
/// already in normalized form. Matched as whole words inside the city label,
/// so "Sao Bernardo" and "São Bernardo do Campo" both count.
const METRO_MUNICIPALITIES: &[&str] = &[
    "aruja",
    "barueri",
    "biritiba mirim",
    "caieiras",
    "cajamar",
    "carapicuiba",
    "cotia",
    "diadema",
    "embu das artes",
    "embu guacu",
    "ferraz de vasconcelos",
    "francisco morato",
    "franco da rocha",
    "guararema",
    "guarulhos",
    "itapecerica da serra",
    "itapevi",
    "itaquaquecetuba",
    "jandira",
    "juquitiba",
    "mairipora",
    "maua",
    "mogi das cruzes",
    "osasco",
    "pirapora do bom jesus",
    "poa",
    "ribeirao pires",
    "rio grande da serra",
    "salesopolis",
    "santa isabel",
    "santana de parnaiba",
    "santo andre",
    "sao bernardo",
    "sao caetano",
    "sao lourenco da serra",
    "suzano",
    "taboao da serra",
    "vargem grande paulista",
];

/// Maps a free-text state and city pair to the pricing macro-region.
pub fn classify_region(state: &str, city: &str) -> MacroRegion {
    if state_code(state) != Some(SAO_PAULO_UF) {
        return MacroRegion::OutrosEstados;
    }

    let city = normalize(city);
    if city.contains(CAPITAL_MARKER) {
        return MacroRegion::Capital;
    }

    if METRO_MUNICIPALITIES
        .iter()
        .any(|municipality| contains_words(&city, municipality))
    {
        return MacroRegion::GrandeSp;
    }

    MacroRegion::Interior
}

/// Resolves a state label ("SP", "São Paulo", "Estado de São Paulo", "sao paulo - sp")
/// to its two-letter federative unit code.
pub fn state_code(state: &str) -> Option<&'static str> {
    let normalized = normalize(state);
    if normalized.is_empty() {
        return None;
    }

    let synonyms = state_synonyms();
    if let Some(code) = synonyms.get(&normalized) {
        return Some(code);
    }

    let stripped = ["estado de ", "estado do ", "estado da "]
        .iter()
        .find_map(|prefix| normalized.strip_prefix(prefix));
    if let Some(code) = stripped.and_then(|rest| synonyms.get(rest)) {
        return Some(code);
    }

    normalized
        .rsplit(' ')
        .next()
        .filter(|token| token.len() == 2)
        .and_then(|token| synonyms.get(token))
        .copied()
}

fn state_synonyms() -> &'static HashMap<String, &'static str> {
    STATE_SYNONYMS.get_or_init(|| {
        const UNITS: &[(&str, &str)] = &[
            ("AC", "Acre"),
            ("AL", "Alagoas"),
            ("AP", "Amapá"),
            ("AM", "Amazonas"),
            ("BA", "Bahia"),
            ("CE", "Ceará"),
            ("DF", "Distrito Federal"),
            ("ES", "Espírito Santo"),
            ("GO", "Goiás"),
            ("MA", "Maranhão"),
            ("MT", "Mato Grosso"),
            ("MS", "Mato Grosso do Sul"),
            ("MG", "Minas Gerais"),
            ("PA", "Pará"),
            ("PB", "Paraíba"),
            ("PR", "Paraná"),
            ("PE", "Pernambuco"),
            ("PI", "Piauí"),
            ("RJ", "Rio de Janeiro"),
            ("RN", "Rio Grande do Norte"),
            ("RS", "Rio Grande do Sul"),
            ("RO", "Rondônia"),
            ("RR", "Roraima"),
            ("SC", "Santa Catarina"),
            ("SP", "São Paulo"),
            ("SE", "Sergipe"),
            ("TO", "Tocantins"),
        ];

        let mut map = HashMap::with_capacity(UNITS.len() * 2);
        for (code, name) in UNITS {
            map.insert(normalize(code), *code);
            map.insert(normalize(name), *code);
        }
        map
    })
}
