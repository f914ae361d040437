// ==========================================
// 客户数据导入系统 - 客户领域模型
// ==========================================
// 红线: Customer 仅在五个字段全部通过校验后构造,
//       不暴露部分有效的记录
// ==========================================

use crate::domain::types::Country;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ==========================================
// Customer - 客户主数据
// ==========================================
// 用途: 导入层写入,customer_id 为自然主键（upsert 键）
// 对齐: customer 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    // ===== 主键 =====
    pub customer_id: i64, // 客户唯一标识

    // ===== 基础信息 =====
    pub first_name: String, // 名（非空文本）
    pub last_name: String,  // 姓（非空文本）
    pub country: Country,   // 国家（封闭枚举）
    pub telephone: i64,     // 电话（数值）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 记录更新时间
}

// ==========================================
// ErrorKind - 校验错误分类
// ==========================================
// 对齐错误分类: 表头错误 / 字段错误
// IO 失败不在此列（见 importer::ImportError,整单中止）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    // ===== 表头错误 =====
    /// 表头行缺失（空表）
    MissingHeaderRow,
    /// 缺少必需表头
    MissingHeader,
    /// 重复表头（每次重复出现记一条）
    DuplicateHeader,

    // ===== 字段错误 =====
    /// 字段缺失（单元格不存在或为空白标记）
    MissingValue,
    /// 字段为空（仅含空白字符的文本）
    BlankValue,
    /// 类型不匹配
    TypeMismatch,
    /// 国家不在允许集合内
    UnknownCountry,
}

// ==========================================
// RowError - 单条校验错误
// ==========================================
// 行号约定: 1 基,与表格可见行号一致（表头为第 1 行）
// 生命周期: 校验期间创建,批次内有序保存,创建后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    pub row: usize,             // 可见行号（1 基）
    pub column: Option<String>, // 相关列名（表头行缺失时为 None）
    pub kind: ErrorKind,        // 错误分类
    pub message: String,        // 人读消息（包含列名与期望约束）
}

impl RowError {
    pub fn new(row: usize, column: impl Into<String>, kind: ErrorKind, message: String) -> Self {
        Self {
            row,
            column: Some(column.into()),
            kind,
            message,
        }
    }
}

// ==========================================
// ValidationOutcome - 整表校验结果
// ==========================================
// 红线: 整批接受或整批拒绝,任一行失败则全部不入库
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// 全部行通过,记录按行序排列
    Accepted(Vec<Customer>),
    /// 存在错误,错误按行序排列,无任何记录入库
    Rejected(Vec<RowError>),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted(_))
    }

    pub fn errors(&self) -> &[RowError] {
        match self {
            ValidationOutcome::Accepted(_) => &[],
            ValidationOutcome::Rejected(errors) => errors,
        }
    }
}

// ==========================================
// ImportBatch - 导入批次
// ==========================================
// 用途: 批次级审计与结果追溯
// 对齐: import_batch 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportBatch {
    pub batch_id: String,          // 批次 ID（uuid）
    pub file_name: Option<String>, // 源文件名（仅作展示,不参与路径构造）
    pub total_rows: i64,           // 数据行总数
    pub accepted_rows: i64,        // 通过校验的行数
    pub rejected_rows: i64,        // 含错误的行数
    pub error_count: i64,          // 错误总条数（一行可含多条）
    pub elapsed_ms: i64,           // 导入耗时（毫秒）
    pub imported_at: DateTime<Utc>, // 导入完成时间
}

// ==========================================
// ErrorLog - 错误日志记录
// ==========================================
// 对齐: error_log 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorLog {
    pub filename: String,      // 源文件名（展示用途）
    pub error_message: String, // 错误消息
    pub created_at: DateTime<Utc>,
}

// ==========================================
// ImportOutcome - 单次导入完整结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub batch: ImportBatch,
    pub outcome: ValidationOutcome,
    /// 拒绝时按配置生成的错误工作簿（xlsx 字节）
    pub error_workbook: Option<Vec<u8>>,
    pub elapsed_time: Duration,
}
