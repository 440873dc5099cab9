use crate::infra::{price_batch, PricedOccurrence};
use clap::Args;
use recovery_ops::config::AppConfig;
use recovery_ops::error::AppError;
use recovery_ops::workflows::compensation::{
    CompensationEngine, CompensationReport, OutcomeBucket, OutcomeScope, PricingSource, RateTable,
    RegionScope,
};
use recovery_ops::workflows::occurrences::OccurrenceCsvImporter;
use std::io::Cursor;
use std::path::PathBuf;

const SAMPLE_EXPORT: &str = "\
id;tipo;estado;cidade;resultado;sub_resultado;chegada;termino;km_inicial;km_final;despesas_detalhadas;valor_acionamento;valor_hora_adc;valor_km_adc
OC-1001;Roubo;SP;São Paulo;Recuperado;;06/05/2024 10:00;06/05/2024 14:30;100;180;\"[{\"\"categoria\"\":\"\"Pedágio\"\",\"\"valor\"\":50}]\";;;
OC-1002;Apropriação indébita;Estado de São Paulo;Guarulhos;;Não recuperado;2024-05-06T08:00:00;2024-05-06T10:10:00;12300;12340;;;;
OC-1003;Antenista;MG;Uberlândia;Localizado;;2024-05-07 21:00;2024-05-08 02:20;500;640;\"[{\"\"categoria\"\":\"\"Hotel\"\",\"\"valor\"\":\"\"R$ 180,00\"\"}]\";;;
OC-1004;Suspeita;PR;Curitiba;Não recuperado;;;;;;;;;
OC-1005;Escolta armada;SP;Campinas;Concluído;;2024-05-09T09:00:00;2024-05-09T08:00:00;900;850;\"[{\"\"categoria\"\":\"\"Estacionamento\"\",\"\"valor\"\":\"\"a confirmar\"\"}]\";R$ 120,00;30;1,2
";

#[derive(Args, Debug)]
pub(crate) struct ComputeArgs {
    /// Occurrence export (CSV, `,` or `;` separated)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print every priced occurrence, not only the totals
    #[arg(long)]
    pub(crate) list: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the report summary as JSON after the text rendering
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_compensation_compute(args: ComputeArgs) -> Result<(), AppError> {
    let ComputeArgs { csv, list } = args;

    let engine = configured_engine()?;
    let records = OccurrenceCsvImporter::from_path(&csv)?;
    let (rows, report) = price_batch(&engine, records);

    println!("Compensation report for {}", csv.display());
    render_report(&rows, &report, list);
    Ok(())
}

pub(crate) fn run_rate_listing() -> Result<(), AppError> {
    let engine = configured_engine()?;
    render_rate_table(engine.table());
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Provider compensation demo");
    println!("Pricing a sample export with the standard rate table\n");

    let engine = CompensationEngine::standard();
    let records = OccurrenceCsvImporter::from_reader(Cursor::new(SAMPLE_EXPORT))?;
    let (rows, report) = price_batch(&engine, records);
    render_report(&rows, &report, true);

    if args.json {
        match serde_json::to_string_pretty(&report.summary()) {
            Ok(json) => println!("\nSummary payload:\n{}", json),
            Err(err) => println!("\nSummary payload unavailable: {}", err),
        }
    }

    Ok(())
}

fn configured_engine() -> Result<CompensationEngine, AppError> {
    let config = AppConfig::load()?;
    Ok(CompensationEngine::new(config.compensation.rate_table()?))
}

fn render_report(rows: &[PricedOccurrence], report: &CompensationReport, list: bool) {
    let summary = report.summary();

    println!(
        "{} occurrences | {} priced by rule | {} by provider fallback | {} with warnings",
        summary.occurrences, summary.priced_by_rule, summary.priced_by_fallback, summary.with_warnings
    );

    let totals = &summary.totals;
    println!("\nTotals");
    println!("- Acionamento: R$ {}", totals.base_fee);
    println!("- Horas adicionais: R$ {}", totals.hour_overage_amount);
    println!("- Km adicionais: R$ {}", totals.km_overage_amount);
    println!("- Despesas: R$ {}", totals.expenses_total);
    println!("- Total: R$ {}", totals.total);

    println!("\nBy region");
    for entry in summary.by_region.iter().filter(|entry| entry.occurrences > 0) {
        println!(
            "- {}: {} occurrences, R$ {}",
            entry.region_label, entry.occurrences, entry.total
        );
    }

    println!("\nBy type");
    for entry in summary.by_type.iter().filter(|entry| entry.occurrences > 0) {
        println!(
            "- {}: {} occurrences, R$ {}",
            entry.category_label, entry.occurrences, entry.total
        );
    }

    if !list {
        return;
    }

    println!("\nOccurrences");
    for row in rows {
        let assessment = &row.assessment;
        let classification = &assessment.classification;
        let pricing = match &assessment.pricing {
            PricingSource::RateRule { rule_id, .. } => rule_id.as_str(),
            PricingSource::ProviderFallback => "provider fallback",
        };
        println!(
            "- {} | {} | {} | {} | {} | R$ {}",
            row.id.as_deref().unwrap_or("-"),
            classification.category.label(),
            classification.region.label(),
            classification.outcome.label(),
            pricing,
            assessment.breakdown.total
        );
        for warning in &assessment.warnings {
            println!("    ! {}", warning.summary());
        }
    }
}

fn render_rate_table(table: &RateTable) {
    println!("Rate table ({} rules, first match wins)", table.rules().len());
    for rule in table.rules() {
        let card = &rule.card;
        println!(
            "- {} | {} | {} | {} | base R$ {} | {} h free, R$ {}/h | {} km free, R$ {}/km",
            rule.id,
            rule.category.label(),
            describe_regions(rule.regions),
            describe_outcomes(&rule.outcomes),
            card.base_fee,
            card.free_hours,
            card.hourly_overage_rate,
            card.free_km,
            card.km_overage_rate
        );
    }
}

fn describe_regions(scope: RegionScope) -> &'static str {
    match scope {
        RegionScope::Any => "any region",
        RegionScope::SaoPauloMetro => "Capital + Grande SP",
        RegionScope::Elsewhere => "Interior + outros estados",
    }
}

fn describe_outcomes(scope: &OutcomeScope) -> String {
    match scope {
        OutcomeScope::Any => "any outcome".to_string(),
        OutcomeScope::OneOf(outcomes) => join_labels(outcomes),
        OutcomeScope::NoneOf(outcomes) => format!("not {}", join_labels(outcomes)),
    }
}

fn join_labels(outcomes: &[OutcomeBucket]) -> String {
    outcomes
        .iter()
        .map(|outcome| outcome.label())
        .collect::<Vec<_>>()
        .join("/")
}
