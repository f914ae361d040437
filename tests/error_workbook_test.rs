// ==========================================
// 错误工作簿往返测试
// ==========================================
// 测试目标: 错误工作簿与原表行对应关系严格一致
// ==========================================


use calamine::{Data, Reader, Xlsx};
use customer_import::config::{ErrorReportMode, ImportConfig};
use customer_import::importer::{
    CustomerImporter, CustomerImporterImpl, ErrorReporterImpl, HeaderValidatorImpl,
    RowValidatorImpl, UniversalFileParser,
};
use customer_import::logging;
use customer_import::repository::CustomerImportRepositoryImpl;
use std::io::Cursor;
use test_helpers::{create_test_db, customer_header, n, t, temp_xlsx, write_xlsx};

fn create_importer(
    db_path: &str,
    config: ImportConfig,
) -> CustomerImporterImpl<CustomerImportRepositoryImpl> {
    let import_repo = CustomerImportRepositoryImpl::new(db_path)
        .expect("Failed to create repository");
    let sheet_name = config.sheet_name.clone();
    CustomerImporterImpl::new(
        import_repo,
        config,
        Box::new(UniversalFileParser::new(sheet_name)),
        Box::new(HeaderValidatorImpl),
        Box::new(RowValidatorImpl),
        Box::new(ErrorReporterImpl),
    )
}

#[tokio::test]
async fn test_error_workbook_roundtrip() {
    logging::init_test();
    let (_db_file, db_path) = create_test_db().expect("Failed to create test db");

    // 第 2 行有效; 第 3 行两个坏字段; 第 4 行有效
    let xlsx = temp_xlsx();
    let rows = vec![
        customer_header(),
        vec![
            n(1001.0),
            t("Ada"),
            t("Lovelace"),
            t("Great Britain"),
            n(2071234567.0),
        ],
        vec![
            t("abc"),
            t("Grace"),
            t(" "),
            t("United States"),
            n(6175551234.0),
        ],
        vec![
            n(1003.0),
            t("Blaise"),
            t("Pascal"),
            t("France"),
            n(144556677.0),
        ],
    ];
    write_xlsx(xlsx.path(), &rows).unwrap();

    let importer = create_importer(&db_path, ImportConfig::default());
    let result = importer.import_from_file(xlsx.path()).await.unwrap();

    let workbook_bytes = result.error_workbook.expect("Workbook mode should produce bytes");

    // 回读生成的工作簿
    let mut workbook = Xlsx::new(Cursor::new(workbook_bytes)).unwrap();
    let sheet_name = workbook.sheet_names().first().cloned().unwrap();
    let range = workbook.worksheet_range(&sheet_name).unwrap();
    let read_rows: Vec<Vec<Data>> = range.rows().map(|r| r.to_vec()).collect();

    // 行数不变,新增恰好一列 "Error"
    assert_eq!(read_rows.len(), 4);
    assert_eq!(read_rows[0][5], Data::String("Error".to_string()));

    // 原始内容保持
    assert_eq!(read_rows[0][0], Data::String("Customer ID".to_string()));
    assert_eq!(read_rows[1][0], Data::Float(1001.0));
    assert_eq!(read_rows[3][1], Data::String("Blaise".to_string()));

    // 第 3 行: 该行全部错误消息按顺序以 "; " 连接
    let Data::String(error_cell) = &read_rows[2][5] else {
        panic!("Expected error text in row 3");
    };
    assert!(error_cell.contains("Customer ID"));
    assert!(error_cell.contains("Last Name"));
    assert!(error_cell.contains("; "));

    // 无错误行的 Error 单元格为空
    assert!(matches!(read_rows[1].get(5), None | Some(Data::Empty)));
    assert!(matches!(read_rows[3].get(5), None | Some(Data::Empty)));
}

#[tokio::test]
async fn test_inline_mode_produces_no_workbook() {
    logging::init_test();
    let (_db_file, db_path) = create_test_db().expect("Failed to create test db");

    let xlsx = temp_xlsx();
    let rows = vec![
        customer_header(),
        vec![
            t("abc"),
            t("Ada"),
            t("Lovelace"),
            t("Great Britain"),
            n(2071234567.0),
        ],
    ];
    write_xlsx(xlsx.path(), &rows).unwrap();

    let config = ImportConfig {
        error_report_mode: ErrorReportMode::Inline,
        ..ImportConfig::default()
    };
    let importer = create_importer(&db_path, config);
    let result = importer.import_from_file(xlsx.path()).await.unwrap();

    assert!(!result.outcome.is_accepted());
    assert!(result.error_workbook.is_none());
}
