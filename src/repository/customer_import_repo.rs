// ==========================================
// 客户数据导入系统 - 导入 Repository Trait
// ==========================================
// 职责: 定义导入相关数据访问接口（不包含业务逻辑）
// 红线: Repository 不含校验规则,只做数据 CRUD
// ==========================================

use crate::domain::{Customer, ErrorLog, ImportBatch};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// CustomerImportRepository Trait
// ==========================================
// 用途: 导入相关数据访问
// 实现者: CustomerImportRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait CustomerImportRepository: Send + Sync {
    // ===== 批量写入（事务化）=====

    /// 批量 upsert Customer（以 customer_id 为键,后写覆盖）
    ///
    /// # 返回
    /// - Ok(usize): 写入的记录数
    /// - Err: 数据库错误（整个事务回滚）
    async fn upsert_customers(&self, customers: Vec<Customer>) -> RepositoryResult<usize>;

    /// 批量插入错误日志
    async fn insert_error_logs(&self, logs: Vec<ErrorLog>) -> RepositoryResult<usize>;

    /// 插入导入批次记录
    async fn insert_batch(&self, batch: ImportBatch) -> RepositoryResult<()>;

    // ===== 查询 =====

    /// 按主键查询客户
    async fn get_customer(&self, customer_id: i64) -> RepositoryResult<Option<Customer>>;

    /// 客户总数
    async fn count_customers(&self) -> RepositoryResult<i64>;

    /// 按源文件名查询错误日志
    async fn list_error_logs(&self, filename: &str) -> RepositoryResult<Vec<ErrorLog>>;

    /// 按批次 ID 查询批次记录
    async fn get_batch(&self, batch_id: &str) -> RepositoryResult<Option<ImportBatch>>;
}
