// ==========================================
// 客户数据导入系统 - 错误报告器实现
// ==========================================
// 职责: 错误列表 → 错误工作簿 / 错误日志对
// 红线: 行对应关系严格保持,第 N 行的错误落在工作簿第 N 行
// ==========================================

use crate::domain::{Cell, RawSheet, RowError};
use crate::importer::customer_importer_trait::ErrorReporter as ErrorReporterTrait;
use crate::importer::error::ImportResult;
use rust_xlsxwriter::Workbook;
use std::collections::BTreeMap;

/// 追加列的表头
const ERROR_COLUMN_HEADER: &str = "Error";

/// 同一行多条错误消息的连接符
const MESSAGE_SEPARATOR: &str = "; ";

pub struct ErrorReporter;

impl ErrorReporter {
    /// 按可见行号聚合错误消息（BTreeMap 保证行序稳定）
    fn messages_by_row(errors: &[RowError]) -> BTreeMap<usize, String> {
        let mut grouped: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for error in errors {
            grouped.entry(error.row).or_default().push(&error.message);
        }
        grouped
            .into_iter()
            .map(|(row, messages)| (row, messages.join(MESSAGE_SEPARATOR)))
            .collect()
    }
}

impl ErrorReporterTrait for ErrorReporter {
    fn build_error_workbook(&self, sheet: &RawSheet, errors: &[RowError]) -> ImportResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        // 回写原始内容（按单元格类型分派）
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let (r, c) = (row_idx as u32, col_idx as u16);
                match cell {
                    Cell::Number(n) => {
                        worksheet.write_number(r, c, *n)?;
                    }
                    Cell::Text(s) => {
                        worksheet.write_string(r, c, s)?;
                    }
                    Cell::Blank => {}
                }
            }
        }

        // 错误列追加在最宽行之后
        let error_col = sheet.rows.iter().map(|r| r.len()).max().unwrap_or(0) as u16;
        worksheet.write_string(0, error_col, ERROR_COLUMN_HEADER)?;

        // 可见行号 N → 工作簿行下标 N-1
        for (row, message) in ErrorReporter::messages_by_row(errors) {
            worksheet.write_string(row.saturating_sub(1) as u32, error_col, &message)?;
        }

        Ok(workbook.save_to_buffer()?)
    }

    fn build_error_log(&self, filename: &str, errors: &[RowError]) -> Vec<(String, String)> {
        errors
            .iter()
            .map(|e| (filename.to_string(), format!("行 {}: {}", e.row, e.message)))
            .collect()
    }
}
