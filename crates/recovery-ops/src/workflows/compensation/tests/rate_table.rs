use super::common::*;
use crate::workflows::compensation::{
    MacroRegion, OutcomeBucket, RateCard, RateTable, TypeCategory,
};
use rust_decimal::Decimal;

use MacroRegion::{Capital, GrandeSp, Interior, OutrosEstados};
use OutcomeBucket::{Cancelado, EmAndamento, Localizado, NaoRecuperado, Outro, Recuperado};
use TypeCategory::{
    Antenista, Apropriacao, Preservacao, RouboFurto, SimplesVerificacao, Suspeita,
};

fn card(base_cents: i64, hourly_cents: i64) -> RateCard {
    RateCard {
        base_fee: money(base_cents),
        free_hours: Decimal::from(3),
        hourly_overage_rate: money(hourly_cents),
        free_km: Decimal::from(50),
        km_overage_rate: money(100),
    }
}

#[test]
fn theft_in_the_capital_uses_the_metro_card() {
    let table = RateTable::standard();
    assert_eq!(
        table.resolve(RouboFurto, Capital, Recuperado),
        Some(card(15000, 3000))
    );
}

#[test]
fn every_priced_combination_matches_the_matrix() {
    let table = RateTable::standard();
    let expectations = [
        (Antenista, Capital, Cancelado, card(25000, 3000)),
        (Antenista, Interior, EmAndamento, card(25000, 3500)),
        (RouboFurto, GrandeSp, Cancelado, card(15000, 3000)),
        (RouboFurto, Interior, Recuperado, card(20000, 3500)),
        (RouboFurto, OutrosEstados, NaoRecuperado, card(20000, 3500)),
        (Suspeita, Capital, Localizado, card(15000, 3000)),
        (Suspeita, OutrosEstados, Recuperado, card(20000, 3500)),
        (Preservacao, GrandeSp, Outro, card(20000, 3000)),
        (Preservacao, Interior, Cancelado, card(20000, 3500)),
        (Apropriacao, Capital, Recuperado, card(20000, 3000)),
        (Apropriacao, GrandeSp, NaoRecuperado, card(10000, 3000)),
        (Apropriacao, Capital, EmAndamento, card(10000, 3000)),
        (Apropriacao, Interior, Recuperado, card(25000, 3500)),
        (Apropriacao, OutrosEstados, NaoRecuperado, card(10000, 3500)),
        (Apropriacao, Interior, Localizado, card(10000, 3500)),
        (SimplesVerificacao, Capital, Outro, card(10000, 3000)),
        (SimplesVerificacao, OutrosEstados, Cancelado, card(10000, 3500)),
    ];

    for (category, region, outcome, expected) in expectations {
        assert_eq!(
            table.resolve(category, region, outcome),
            Some(expected),
            "{category:?} / {region:?} / {outcome:?}"
        );
    }
}

#[test]
fn unpriced_combinations_resolve_to_no_rule() {
    let table = RateTable::standard();
    let unpriced = [
        (TypeCategory::Outro, Capital, Recuperado),
        (TypeCategory::Outro, OutrosEstados, EmAndamento),
        (RouboFurto, Interior, Cancelado),
        (RouboFurto, OutrosEstados, Localizado),
        (Suspeita, Interior, EmAndamento),
        (Apropriacao, Interior, Cancelado),
        (Apropriacao, OutrosEstados, Outro),
    ];

    for (category, region, outcome) in unpriced {
        assert!(
            table.resolve(category, region, outcome).is_none(),
            "{category:?} / {region:?} / {outcome:?} should have no rule"
        );
    }
}

#[test]
fn matching_rule_exposes_the_rule_id() {
    let table = RateTable::standard();
    let rule = table
        .matching_rule(Apropriacao, GrandeSp, Cancelado)
        .expect("rule matches");
    assert_eq!(rule.id, "apropriacao_sp_metro_outros");
}
