use recovery_ops::workflows::compensation::{CompensationEngine, CompensationReport};
use recovery_ops::workflows::occurrences::{OccurrenceCsvImporter, OccurrenceImportError};
use rust_decimal::Decimal;

#[test]
fn importer_reads_semicolon_export_with_bom() {
    let csv = "\u{feff}id_ocorrencia;tipo;estado;cidade;resultado;chegada;termino;km_inicial;km_final;despesas_detalhadas\n\
7781;Roubo de veículo;SP;São Bernardo do Campo;Recuperado;06/05/2024 09:00;06/05/2024 13:00;1.020,0;1.090,0;\"[{\"\"tipo\"\":\"\"Pedágio\"\",\"\"valor\"\":\"\"R$ 12,40\"\"}]\"\n\
7782;Preservação de local;RJ;Rio de Janeiro;Localizado;;;;;\n";

    let records = OccurrenceCsvImporter::from_reader(csv.as_bytes()).expect("import succeeds");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.as_deref(), Some("7781"));

    let engine = CompensationEngine::standard();
    let assessments: Vec<_> = records
        .into_iter()
        .map(|record| engine.assess(&record.into_facts()))
        .collect();

    // 150 base + 1 h over at 30 + 20 km over at 1 + 12,40 toll
    assert_eq!(assessments[0].breakdown.total, Decimal::new(21240, 2));
    assert_eq!(assessments[1].breakdown.total, Decimal::new(20000, 2));

    let report = CompensationReport::from_assessments(&assessments);
    assert_eq!(report.totals().total, Decimal::new(41240, 2));
}

#[test]
fn importer_rejects_rows_with_missing_columns() {
    let csv = "tipo,estado,cidade\nRoubo,SP\n";

    let error = OccurrenceCsvImporter::from_reader(csv.as_bytes()).expect_err("ragged row rejected");

    assert!(matches!(error, OccurrenceImportError::Csv(_)));
}

#[test]
fn importer_accepts_header_only_exports() {
    let records = OccurrenceCsvImporter::from_reader("tipo,estado,cidade\n".as_bytes())
        .expect("header-only export imports");
    assert!(records.is_empty());
}
