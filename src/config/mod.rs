// ==========================================
// 客户数据导入系统 - 配置层
// ==========================================
// 职责: 导入行为的显式开关
// ==========================================

pub mod import_config;

pub use import_config::{ErrorReportMode, ImportConfig};
