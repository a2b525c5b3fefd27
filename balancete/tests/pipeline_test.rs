// End-to-end runs of the file pipeline: read a wide export from disk,
// transform it and check what lands next to it.

use std::fs;
use std::path::Path;

use balancete::{
    transform_file, DecimalSeparator, PipelineError, RowOrder, StructureError, TransformOptions,
    UnknownColumnPolicy,
};
use rust_decimal::Decimal;
use tempfile::TempDir;

const BOM: &str = "\u{feff}";

fn write_input(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn read_output(path: &Path) -> String {
    let content = fs::read_to_string(path).unwrap();
    content.trim_start_matches(BOM).to_string()
}

#[test]
fn test_transform_file_writes_optimized_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "balancete.csv",
        b"Tipo,Grupo,Categoria,Jun/23,Jul/23,Ago/23,Total\n\
          Entrada,Group1,Cat1,100.00,200.00,,1000.00\n",
    );

    let (result, output) = transform_file(&input, None, &TransformOptions::default()).unwrap();

    assert_eq!(output, dir.path().join("balancete_optimized.csv"));
    assert_eq!(result.records.len(), 3);

    let raw = fs::read(&output).unwrap();
    assert!(raw.starts_with(BOM.as_bytes()), "output should carry a UTF-8 BOM");

    assert_eq!(
        read_output(&output),
        "Data,Ano,Mes,Mes_Nome,Tipo,Grupo,Categoria,Valor\n\
         2023-06-01,2023,6,Junho,Entrada,Group1,Cat1,100.00\n\
         2023-07-01,2023,7,Julho,Entrada,Group1,Cat1,200.00\n\
         2023-08-01,2023,8,Agosto,Entrada,Group1,Cat1,0.00\n"
    );
}

#[test]
fn test_missing_categoria_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "broken.csv",
        b"Tipo,Grupo,Jun/23,Total\nEntrada,Group1,100.00,100.00\n",
    );

    let err = transform_file(&input, None, &TransformOptions::default()).unwrap_err();

    match &err {
        PipelineError::Structure(StructureError::MissingColumn { column, .. }) => {
            assert_eq!(column, "Categoria");
        }
        other => panic!("Expected MissingColumn, got {:?}", other),
    }
    assert!(err.to_string().contains("Categoria"));
    assert!(!dir.path().join("broken_optimized.csv").exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_non_numeric_value_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "dirty.csv",
        b"Tipo,Grupo,Categoria,Jun/23\nEntrada,G,C,10\nSaida,G,D,dez reais\n",
    );

    let err = transform_file(&input, None, &TransformOptions::default()).unwrap_err();

    assert_eq!(err.kind(), "StructureError");
    assert!(err.to_string().contains("dez reais"));
    assert!(!dir.path().join("dirty_optimized.csv").exists());
}

#[test]
fn test_existing_output_untouched_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "in.csv", b"Tipo,Grupo,Categoria,Total\nA,B,C,1\n");
    let output = dir.path().join("in_optimized.csv");
    fs::write(&output, "previous run").unwrap();

    let err = transform_file(&input, None, &TransformOptions::default()).unwrap_err();

    assert!(matches!(err, PipelineError::Structure(StructureError::NoMonthColumns)));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous run");
}

#[test]
fn test_semicolon_latin1_export_with_comma_decimals() {
    let dir = tempfile::tempdir().unwrap();
    // "Saída" and "Observações" encoded as ISO-8859-1
    let mut content = Vec::new();
    content.extend_from_slice(b"Tipo;Grupo;Categoria;Observa\xe7\xf5es;Dez/23;Jan/24;Total\n");
    content.extend_from_slice(b"Sa\xedda;Custos;Aluguel;fixo;1.500,00;1.500,00;3.000,00\n");
    content.extend_from_slice(b"Entrada;Vendas;Loja;;250,75;;250,75\n");
    let input = write_input(&dir, "tiny.csv", &content);

    let options = TransformOptions {
        decimal_separator: DecimalSeparator::Comma,
        write_bom: false,
        ..TransformOptions::default()
    };
    let (result, output) = transform_file(&input, None, &options).unwrap();

    assert_eq!(result.csv_info.delimiter, ';');
    assert_eq!(result.ignored_columns, vec!["Observações"]);
    assert_eq!(result.records.len(), 4);
    assert_eq!(result.summary.total_expenses, Decimal::new(300000, 2));
    assert_eq!(result.summary.total_income, Decimal::new(25075, 2));

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("Data,"));
    assert!(csv.contains("2023-12-01,2023,12,Dezembro,Saída,Custos,Aluguel,1500.00"));
    assert!(csv.contains("2024-01-01,2024,1,Janeiro,Entrada,Vendas,Loja,0.00"));
    assert!(!csv.contains("fixo"));
}

#[test]
fn test_strict_columns_reject_unknown_header() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "strict.csv",
        "Tipo,Grupo,Categoria,Observações,Jun/23\nA,B,C,x,1\n".as_bytes(),
    );
    let options = TransformOptions {
        unknown_columns: UnknownColumnPolicy::Reject,
        ..TransformOptions::default()
    };

    let err = transform_file(&input, None, &options).unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Structure(StructureError::UnknownColumn(ref c)) if c == "Observações"
    ));
}

#[test]
fn test_explicit_output_and_date_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "multi.csv",
        "Tipo,Grupo,Categoria,Jul/23,Jun/23\n\
         Saída,Custos,Aluguel,20,10\n\
         Entrada,Vendas,Loja,40,30\n"
            .as_bytes(),
    );
    let target = dir.path().join("long.csv");
    let options = TransformOptions {
        order: RowOrder::ByDate,
        write_bom: false,
        ..TransformOptions::default()
    };

    let (result, output) = transform_file(&input, Some(&target), &options).unwrap();

    assert_eq!(output, target);
    let lines: Vec<String> = read_output(&target).lines().map(String::from).collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("2023-06-01,2023,6,Junho,Entrada"));
    assert!(lines[2].starts_with("2023-06-01,2023,6,Junho,Saída"));
    assert!(lines[3].starts_with("2023-07-01,2023,7,Julho,Entrada"));
    assert!(lines[4].starts_with("2023-07-01,2023,7,Julho,Saída"));

    let range = result.summary.date_range.unwrap();
    assert_eq!(range.start.to_string(), "2023-06-01");
    assert_eq!(range.end.to_string(), "2023-07-01");
}
