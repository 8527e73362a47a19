use tidysheet_pipeline::{run_batch, CleanPlan, FileSession, UploadedFile};
use tidysheet_table::{CellValue, FileFormat, Table, TableError};

#[test]
fn test_clean_and_convert_scenario() {
    // a,b / 1,<missing> / 1,3 : dedupe is a no-op (rows differ in b),
    // imputation fills the missing b with 3.0, export lands in Excel.
    let file = UploadedFile::new("scores.csv", b"a,b\n1,\n1,3\n".to_vec());
    let mut session = FileSession::load(&file).unwrap();

    assert_eq!(session.remove_duplicates(), 0);
    assert_eq!(session.fill_missing(), 1);
    assert_eq!(
        session.table().get(0, 1),
        Some(&CellValue::Float(3.0))
    );

    let export = session.export(FileFormat::Xlsx).unwrap();
    assert_eq!(export.file_name, "scores.xlsx");
    assert_eq!(
        export.mime_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );

    let workbook = Table::from_xlsx_bytes(&export.bytes).unwrap();
    assert_eq!(workbook.column_names(), &["a", "b"]);
    assert_eq!(workbook.row_count(), 2);
    assert_eq!(workbook.get(0, 1).unwrap().as_float(), Some(3.0));
    assert_eq!(workbook.get(1, 1).unwrap().as_float(), Some(3.0));
}

#[test]
fn test_unsupported_file_does_not_abort_batch() {
    let files = vec![
        UploadedFile::new("ok.csv", b"x\n1\n".to_vec()),
        UploadedFile::new("data.txt", b"x\n1\n".to_vec()),
        UploadedFile::new("also_ok.csv", b"y\n2\n".to_vec()),
    ];

    let outcomes = run_batch(&files, &CleanPlan::default());
    assert_eq!(outcomes.len(), 3);

    assert!(outcomes[0].result.is_ok());
    assert!(matches!(
        outcomes[1].result,
        Err(TableError::UnsupportedFormat { ref extension }) if extension == "txt"
    ));
    assert!(outcomes[2].result.is_ok());

    let third = outcomes[2].result.as_ref().unwrap();
    assert_eq!(third.export.file_name, "also_ok.csv");
    assert_eq!(third.export.bytes, b"y\n2\n");
}

#[test]
fn test_corrupt_xlsx_does_not_abort_batch() {
    let files = vec![
        UploadedFile::new("broken.xlsx", b"not a workbook".to_vec()),
        UploadedFile::new("fine.csv", b"a\n1\n".to_vec()),
    ];

    let outcomes = run_batch(&files, &CleanPlan::default());
    assert!(matches!(outcomes[0].result, Err(TableError::Xlsx(_))));
    assert!(outcomes[1].result.is_ok());
}

#[test]
fn test_csv_round_trip_preserves_clean_table() {
    // No missing values, no duplicate rows: load(export(T)) == T
    let source = b"name,score\nalice,1.5\nbob,2\n";
    let original = Table::from_csv_bytes(source).unwrap();

    let session = FileSession::load(&UploadedFile::new("t.csv", source.to_vec())).unwrap();
    let export = session.export(FileFormat::Csv).unwrap();

    let restored = Table::from_csv_bytes(&export.bytes).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn test_full_plan_with_projection_and_chart() {
    let files = vec![UploadedFile::new(
        "wide.csv",
        b"id,name,score\n1,a,10\n1,a,10\n2,b,\n".to_vec(),
    )];

    let plan = CleanPlan {
        remove_duplicates: true,
        fill_missing: true,
        keep_columns: Some(vec!["id".to_string(), "score".to_string()]),
        chart: true,
        target: FileFormat::Csv,
    };

    let outcomes = run_batch(&files, &plan);
    let result = outcomes[0].result.as_ref().unwrap();

    assert_eq!(result.duplicates_removed, 1);
    assert_eq!(result.cells_filled, 1);
    assert_eq!(result.export.file_name, "wide.csv");
    // id and score survive projection, in original order
    assert_eq!(result.export.bytes, b"id,score\n1,10\n2,10\n");

    let chart = result.chart.as_ref().unwrap();
    assert_eq!(chart.data.datasets.len(), 2);
    assert_eq!(chart.data.datasets[0].label, "id");
    assert_eq!(chart.data.datasets[1].label, "score");
}

#[test]
fn test_chart_skipped_without_numeric_columns() {
    let files = vec![UploadedFile::new("t.csv", b"name\nalice\n".to_vec())];

    let plan = CleanPlan {
        chart: true,
        ..CleanPlan::default()
    };

    let outcomes = run_batch(&files, &plan);
    let result = outcomes[0].result.as_ref().unwrap();
    assert!(result.chart.is_none());
}

#[test]
fn test_projection_of_unknown_column_fails_that_file_only() {
    let files = vec![
        UploadedFile::new("a.csv", b"x\n1\n".to_vec()),
        UploadedFile::new("b.csv", b"y\n2\n".to_vec()),
    ];

    let plan = CleanPlan {
        keep_columns: Some(vec!["x".to_string()]),
        ..CleanPlan::default()
    };

    let outcomes = run_batch(&files, &plan);
    assert!(outcomes[0].result.is_ok());
    assert!(matches!(
        outcomes[1].result,
        Err(TableError::ColumnNotFound { ref name }) if name == "x"
    ));
}
