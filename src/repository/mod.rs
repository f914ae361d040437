// ==========================================
// 客户数据导入系统 - 数据仓储层
// ==========================================
// 职责: 数据访问接口与 rusqlite 实现
// 红线: 不含校验规则,不含导入流程逻辑
// ==========================================

pub mod customer_import_repo;
pub mod customer_import_repo_impl;
pub mod error;

// 重导出核心类型
pub use customer_import_repo::CustomerImportRepository;
pub use customer_import_repo_impl::CustomerImportRepositoryImpl;
pub use error::{RepositoryError, RepositoryResult};
