// ==========================================
// 客户数据导入系统 - 单元格类型转换
// ==========================================
// 职责: 原始单元格 → 期望类型,失败显式报告
// 红线: 不做数值↔文本的隐式转换
//       （文本形式的电话号码按类型错误报告,不静默接受）
// ==========================================

use crate::domain::Cell;

// ==========================================
// CoercionFailure - 转换失败分类
// ==========================================
// 缺失 / 空白 / 类型不匹配是三种不同的失败,
// 消息由行校验层按列名组装
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoercionFailure {
    /// 单元格不存在或为空白标记
    Missing,
    /// 文本单元格仅含空白字符
    Blank,
    /// 单元格类型与期望不符
    WrongType {
        expected: &'static str,
        actual: String,
    },
}

/// 按数值读取单元格（Customer ID / Telephone 列）
///
/// # 规则
/// - 不存在/空白标记 → Missing
/// - 仅空白字符的文本 → Blank
/// - 文本（含数字形式的文本）→ WrongType
/// - 带小数部分的数值 → WrongType（期望整数）
pub fn as_integer(cell: Option<&Cell>) -> Result<i64, CoercionFailure> {
    match cell {
        None | Some(Cell::Blank) => Err(CoercionFailure::Missing),
        Some(Cell::Text(s)) if s.trim().is_empty() => Err(CoercionFailure::Blank),
        Some(Cell::Text(s)) => Err(CoercionFailure::WrongType {
            expected: "数值",
            actual: format!("文本 \"{}\"", s.trim()),
        }),
        Some(Cell::Number(n)) => {
            if n.fract() == 0.0 {
                Ok(*n as i64)
            } else {
                Err(CoercionFailure::WrongType {
                    expected: "整数",
                    actual: format!("小数 {}", n),
                })
            }
        }
    }
}

/// 按文本读取单元格（First Name / Last Name / Country 列）
///
/// # 规则
/// - 不存在/空白标记 → Missing
/// - 仅空白字符的文本 → Blank
/// - 数值 → WrongType
/// - 其余返回去除两侧空白后的文本
pub fn as_text(cell: Option<&Cell>) -> Result<String, CoercionFailure> {
    match cell {
        None | Some(Cell::Blank) => Err(CoercionFailure::Missing),
        Some(Cell::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(CoercionFailure::Blank)
            } else {
                Ok(trimmed.to_string())
            }
        }
        Some(Cell::Number(n)) => Err(CoercionFailure::WrongType {
            expected: "文本",
            actual: format!("数值 {}", n),
        }),
    }
}
