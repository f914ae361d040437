// ==========================================
// 客户数据导入系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、封闭类型、校验结果结构
// 红线: 不含数据访问逻辑,不含解析逻辑
// ==========================================

pub mod customer;
pub mod sheet;
pub mod types;

// 重导出核心类型
pub use customer::{
    Customer, ErrorKind, ErrorLog, ImportBatch, ImportOutcome, RowError, ValidationOutcome,
};
pub use sheet::{Cell, HeaderMap, RawSheet};
pub use types::Country;
