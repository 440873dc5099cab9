use super::values::{empty_string_as_none, loose_datetime, loose_decimal, loose_string};
use crate::workflows::compensation::{ExpenseEntry, FallbackRates, OccurrenceFacts};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category recorded for an expense cell that could not be read at all.
pub(crate) const UNREADABLE_EXPENSES: &str = "despesas_detalhadas";

/// An occurrence as the operations desk stores it: Portuguese field names and
/// values that may be blank, numeric or free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceRecord {
    #[serde(default, alias = "id_ocorrencia", deserialize_with = "loose_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub estado: String,
    #[serde(default)]
    pub cidade: String,
    #[serde(default)]
    pub resultado: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sub_resultado: Option<String>,
    #[serde(default, deserialize_with = "loose_datetime")]
    pub chegada: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "loose_datetime")]
    pub termino: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "loose_decimal")]
    pub km_inicial: Option<Decimal>,
    #[serde(default, deserialize_with = "loose_decimal")]
    pub km_final: Option<Decimal>,
    #[serde(default, deserialize_with = "expense_items")]
    pub despesas_detalhadas: Vec<ExpenseItem>,
    #[serde(default, deserialize_with = "loose_decimal")]
    pub valor_acionamento: Option<Decimal>,
    #[serde(default, deserialize_with = "loose_decimal")]
    pub valor_hora_adc: Option<Decimal>,
    #[serde(default, deserialize_with = "loose_decimal")]
    pub valor_km_adc: Option<Decimal>,
}

/// One entry of `despesas_detalhadas`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseItem {
    #[serde(default, alias = "category", alias = "tipo", alias = "descricao")]
    pub categoria: String,
    #[serde(default, alias = "amount", deserialize_with = "loose_decimal")]
    pub valor: Option<Decimal>,
}

impl OccurrenceRecord {
    pub fn into_facts(self) -> OccurrenceFacts {
        OccurrenceFacts {
            type_label: self.tipo,
            state_label: self.estado,
            city_label: self.cidade,
            outcome_label: self.resultado,
            sub_outcome_label: self.sub_resultado,
            arrived_at: self.chegada,
            completed_at: self.termino,
            odometer_start: self.km_inicial,
            odometer_end: self.km_final,
            expenses: self
                .despesas_detalhadas
                .into_iter()
                .map(|item| ExpenseEntry {
                    category: item.categoria,
                    amount: item.valor,
                })
                .collect(),
            raw_fallback: FallbackRates {
                base_fee: self.valor_acionamento.unwrap_or_default(),
                hourly_rate: self.valor_hora_adc.unwrap_or_default(),
                km_rate: self.valor_km_adc.unwrap_or_default(),
            },
        }
    }
}

impl From<OccurrenceRecord> for OccurrenceFacts {
    fn from(record: OccurrenceRecord) -> Self {
        record.into_facts()
    }
}

/// JSON payloads carry the expenses as an array; CSV exports carry the same
/// array serialized into one cell. A cell that is not valid JSON becomes a
/// single unreadable entry so the engine reports it instead of dropping it.
fn expense_items<'de, D>(deserializer: D) -> Result<Vec<ExpenseItem>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ExpenseItemsVisitor)
}

struct ExpenseItemsVisitor;

impl<'de> Visitor<'de> for ExpenseItemsVisitor {
    type Value = Vec<ExpenseItem>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a list of expenses or a JSON-encoded list of expenses")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<ExpenseItem>()? {
            items.push(item);
        }
        Ok(items)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<ExpenseItem>>(trimmed) {
            Ok(items) => Ok(items),
            Err(err) => {
                tracing::warn!(error = %err, "unreadable despesas_detalhadas cell");
                Ok(vec![ExpenseItem {
                    categoria: UNREADABLE_EXPENSES.to_string(),
                    valor: None,
                }])
            }
        }
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        self.visit_str(&value)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn record_accepts_loosely_typed_json() {
        let json = r#"{
            "id": "OC-1042",
            "tipo": "Roubo",
            "estado": "SP",
            "cidade": "São Paulo",
            "resultado": "RECUPERADO",
            "sub_resultado": "",
            "chegada": "2024-05-06T10:00:00",
            "termino": "06/05/2024 14:30",
            "km_inicial": 100,
            "km_final": "180",
            "despesas_detalhadas": [
                { "categoria": "Pedágio", "valor": "50,00" },
                { "category": "Estacionamento", "amount": "?" }
            ],
            "valor_acionamento": "R$ 175,00",
            "valor_hora_adc": null
        }"#;

        let record: OccurrenceRecord = serde_json::from_str(json).expect("record parses");

        assert_eq!(record.id.as_deref(), Some("OC-1042"));
        assert_eq!(record.sub_resultado, None);
        assert_eq!(
            record.termino,
            NaiveDate::from_ymd_opt(2024, 5, 6).and_then(|date| date.and_hms_opt(14, 30, 0))
        );
        assert_eq!(record.km_inicial, Some(Decimal::from(100)));
        assert_eq!(record.km_final, Some(Decimal::from(180)));
        assert_eq!(record.despesas_detalhadas.len(), 2);
        assert_eq!(record.despesas_detalhadas[0].valor, Some(Decimal::new(5000, 2)));
        assert_eq!(record.despesas_detalhadas[1].categoria, "Estacionamento");
        assert_eq!(record.despesas_detalhadas[1].valor, None);
        assert_eq!(record.valor_acionamento, Some(Decimal::new(17500, 2)));
        assert_eq!(record.valor_hora_adc, None);
    }

    #[test]
    fn missing_fields_default_to_blank() {
        let record: OccurrenceRecord = serde_json::from_str("{}").expect("empty record parses");
        let facts = record.into_facts();

        assert!(facts.type_label.is_empty());
        assert!(facts.expenses.is_empty());
        assert_eq!(facts.raw_fallback, FallbackRates::default());
    }

    #[test]
    fn expenses_encoded_as_text_are_decoded() {
        let json = r#"{ "despesas_detalhadas": "[{\"categoria\": \"Pedágio\", \"valor\": 12.5}]" }"#;
        let record: OccurrenceRecord = serde_json::from_str(json).expect("record parses");
        assert_eq!(
            record.despesas_detalhadas,
            vec![ExpenseItem {
                categoria: "Pedágio".to_string(),
                valor: Some(Decimal::new(125, 1)),
            }]
        );

        let json = r#"{ "despesas_detalhadas": "pedágio 12" }"#;
        let record: OccurrenceRecord = serde_json::from_str(json).expect("record parses");
        assert_eq!(record.despesas_detalhadas[0].categoria, UNREADABLE_EXPENSES);
        assert_eq!(record.despesas_detalhadas[0].valor, None);
    }
}
