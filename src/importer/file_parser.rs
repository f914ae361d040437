// ==========================================
// 客户数据导入系统 - 文件解析器实现
// ==========================================
// 职责: 外部编解码库 → RawSheet（带类型标记的行/单元格）
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 红线: 解析层不跳过任何数据行,空行去留由管道按配置决定
// ==========================================

use crate::domain::{Cell, RawSheet};
use crate::importer::customer_importer_trait::SheetParser;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

// ==========================================
// CSV Parser 实现
// ==========================================
// CSV 无原生单元格类型,按文本内容推断类型标记:
// 空串 → Blank,可按 i64/f64 完整解析 → Number,其余 → Text
pub struct CsvParser;

impl CsvParser {
    fn infer_cell(raw: &str) -> Cell {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Blank;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Cell::Number(i as f64);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Cell::Number(f);
        }
        Cell::Text(raw.to_string())
    }
}

impl SheetParser for CsvParser {
    fn parse_to_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = file_path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        // 打开 CSV 文件（表头行与数据行同样进入 RawSheet）
        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(CsvParser::infer_cell).collect());
        }

        Ok(RawSheet::new(rows))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser {
    /// 工作表名,None 表示取第一个工作表
    sheet_name: Option<String>,
}

impl ExcelParser {
    pub fn new(sheet_name: Option<String>) -> Self {
        Self { sheet_name }
    }

    fn convert_cell(data: &Data) -> Cell {
        match data {
            Data::Empty => Cell::Blank,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(e) => Cell::Text(format!("{:?}", e)),
        }
    }
}

impl SheetParser for ExcelParser {
    fn parse_to_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        // 检查扩展名
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext.to_string()));
        }

        // 打开工作簿
        let mut workbook = open_workbook_auto(file_path)?;

        // 定位工作表（指定名称,否则取第一个）
        let sheet_name = match &self.sheet_name {
            Some(name) => {
                if !workbook.sheet_names().iter().any(|n| n == name) {
                    return Err(ImportError::ExcelParseError(format!(
                        "工作表不存在: {}",
                        name
                    )));
                }
                name.clone()
            }
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?,
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(ExcelParser::convert_cell).collect())
            .collect();

        Ok(RawSheet::new(rows))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser {
    sheet_name: Option<String>,
}

impl UniversalFileParser {
    pub fn new(sheet_name: Option<String>) -> Self {
        Self { sheet_name }
    }
}

impl SheetParser for UniversalFileParser {
    fn parse_to_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_sheet(file_path),
            "xlsx" | "xls" => {
                ExcelParser::new(self.sheet_name.clone()).parse_to_sheet(file_path)
            }
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_csv_parser_header_and_rows() {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "Customer ID,First Name").unwrap();
        writeln!(temp_file, "1001,Ada").unwrap();

        let sheet = CsvParser.parse_to_sheet(temp_file.path()).unwrap();

        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0][0], Cell::Text("Customer ID".to_string()));
        assert_eq!(sheet.rows[1][0], Cell::Number(1001.0));
        assert_eq!(sheet.rows[1][1], Cell::Text("Ada".to_string()));
    }

    #[test]
    fn test_csv_parser_keeps_empty_rows() {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "Customer ID,First Name").unwrap();
        writeln!(temp_file, "1001,Ada").unwrap();
        writeln!(temp_file, ",").unwrap(); // 空行
        writeln!(temp_file, "1002,Grace").unwrap();

        let sheet = CsvParser.parse_to_sheet(temp_file.path()).unwrap();

        // 空行保留,由管道按配置决定去留
        assert_eq!(sheet.rows.len(), 4);
        assert!(sheet.rows[2].iter().all(|c| c.is_blank()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_sheet(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_cell_inference() {
        assert_eq!(CsvParser::infer_cell(""), Cell::Blank);
        assert_eq!(CsvParser::infer_cell("  "), Cell::Blank);
        assert_eq!(CsvParser::infer_cell("42"), Cell::Number(42.0));
        assert_eq!(CsvParser::infer_cell("2.5"), Cell::Number(2.5));
        assert_eq!(CsvParser::infer_cell("Ada"), Cell::Text("Ada".to_string()));
    }

    #[test]
    fn test_universal_parser_unsupported_format() {
        let parser = UniversalFileParser::new(None);
        let result = parser.parse_to_sheet(Path::new("data.parquet"));
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
