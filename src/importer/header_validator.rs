// ==========================================
// 客户数据导入系统 - 表头校验器实现
// ==========================================
// 职责: 表头行 → HeaderMap,缺失/重复穷尽收集
// 红线: 收集全部表头问题后才失败,不在首个问题处停止
// ==========================================

use crate::domain::{Cell, ErrorKind, HeaderMap, RawSheet, RowError};
use crate::importer::customer_importer_trait::HeaderValidator as HeaderValidatorTrait;
use std::collections::{HashMap, HashSet};

/// 必需列名（精确字面量,大小写敏感）
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Customer ID",
    "First Name",
    "Last Name",
    "Country",
    "Telephone",
];

/// 表头行的可见行号
const HEADER_ROW: usize = 1;

pub struct HeaderValidator;

impl HeaderValidator {
    /// 表头单元格文本（两侧空白忽略,数值表头按展示文本比较）
    fn header_text(cell: &Cell) -> Option<String> {
        match cell {
            Cell::Blank => None,
            other => {
                let text = other.display_text().trim().to_string();
                if text.is_empty() {
                    None
                } else {
                    Some(text)
                }
            }
        }
    }
}

impl HeaderValidatorTrait for HeaderValidator {
    fn validate(&self, sheet: &RawSheet) -> Result<HeaderMap, Vec<RowError>> {
        // 表头行缺失（空表）: 单条错误,且不再处理数据行
        let header_row = match sheet.header_row() {
            Some(row) if !row.iter().all(|c| c.is_blank()) => row,
            _ => {
                return Err(vec![RowError {
                    row: HEADER_ROW,
                    column: None,
                    kind: ErrorKind::MissingHeaderRow,
                    message: "表头行缺失".to_string(),
                }]);
            }
        };

        let mut errors = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut seen: HashSet<String> = HashSet::new();

        // 扫描表头: 重复出现每次记一条错误,映射保留首次位置
        for (col_idx, cell) in header_row.iter().enumerate() {
            let Some(name) = HeaderValidator::header_text(cell) else {
                continue;
            };

            if !seen.insert(name.clone()) {
                errors.push(RowError::new(
                    HEADER_ROW,
                    name.clone(),
                    ErrorKind::DuplicateHeader,
                    format!("重复表头: {}", name),
                ));
                continue;
            }
            positions.insert(name, col_idx);
        }

        // 必需列逐个检查: 每个缺失列记一条错误
        for required in REQUIRED_COLUMNS {
            if !positions.contains_key(required) {
                errors.push(RowError::new(
                    HEADER_ROW,
                    required,
                    ErrorKind::MissingHeader,
                    format!("缺少必需表头: {}", required),
                ));
            }
        }

        if errors.is_empty() {
            Ok(HeaderMap::new(positions))
        } else {
            Err(errors)
        }
    }
}
