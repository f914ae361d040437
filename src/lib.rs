// ==========================================
// 客户数据导入系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 电子表格客户数据校验与入库后端
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 解析/校验/错误报告
pub mod importer;

// 配置层 - 导入配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::Country;

// 领域实体
pub use domain::{
    Cell, Customer, ErrorKind, ErrorLog, HeaderMap, ImportBatch, ImportOutcome, RawSheet,
    RowError, ValidationOutcome,
};

// 导入层
pub use importer::{
    CsvParser, CustomerImporter, CustomerImporterImpl, ErrorReporterImpl, ExcelParser,
    HeaderValidatorImpl, ImportError, ImportResult, RowValidatorImpl, UniversalFileParser,
};

// 仓储层
pub use repository::{CustomerImportRepository, CustomerImportRepositoryImpl};

// 配置
pub use config::{ErrorReportMode, ImportConfig};

// API
pub use api::ImportApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "客户数据导入系统";
