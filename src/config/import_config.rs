// ==========================================
// 客户数据导入系统 - 导入配置
// ==========================================
// 红线: 行为开关必须显式,不允许隐式跳过数据
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ErrorReportMode - 错误报告形式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorReportMode {
    /// 仅返回行内错误列表
    Inline,
    /// 额外生成错误工作簿（原表 + Error 列）
    Workbook,
}

// ==========================================
// ImportConfig - 导入配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// 工作表名,None 表示取第一个工作表（CSV 忽略）
    pub sheet_name: Option<String>,

    /// 是否跳过完全空白的数据行
    ///
    /// 默认 false: 空行按缺失字段报错,不静默跳过
    pub skip_blank_rows: bool,

    /// 拒绝时的错误报告形式
    pub error_report_mode: ErrorReportMode,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            sheet_name: None,
            skip_blank_rows: false,
            error_report_mode: ErrorReportMode::Workbook,
        }
    }
}
