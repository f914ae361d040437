// ==========================================
// 客户数据导入系统 - 导入 Repository 实现
// ==========================================
// 实现: rusqlite + Arc<Mutex<Connection>>
// 红线: 批量写入必须事务化,部分失败整体回滚
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::types::Country;
use crate::domain::{Customer, ErrorLog, ImportBatch};
use crate::repository::customer_import_repo::CustomerImportRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// CustomerImportRepositoryImpl
// ==========================================
pub struct CustomerImportRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl CustomerImportRepositoryImpl {
    /// 创建 Repository 实例并确保 schema 就绪
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 从查询行还原 Customer（国家列对封闭集合解析,非法值按字段错误报告）
    fn build_customer(raw: CustomerRow) -> RepositoryResult<Customer> {
        let country = Country::from_display_name(&raw.country).map_err(|e| {
            RepositoryError::FieldValueError {
                field: "country".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Customer {
            customer_id: raw.customer_id,
            first_name: raw.first_name,
            last_name: raw.last_name,
            country,
            telephone: raw.telephone,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

/// customer 表一行的原始值（国家尚未解析）
struct CustomerRow {
    customer_id: i64,
    first_name: String,
    last_name: String,
    country: String,
    telephone: i64,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl CustomerRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            customer_id: row.get("customer_id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            country: row.get("country")?,
            telephone: row.get("telephone")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

#[async_trait]
impl CustomerImportRepository for CustomerImportRepositoryImpl {
    async fn upsert_customers(&self, customers: Vec<Customer>) -> RepositoryResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let count = {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO customer (
                    customer_id, first_name, last_name, country, telephone,
                    created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ON CONFLICT(customer_id) DO UPDATE SET
                    first_name = excluded.first_name,
                    last_name = excluded.last_name,
                    country = excluded.country,
                    telephone = excluded.telephone,
                    updated_at = excluded.updated_at
                "#,
            )?;

            let mut count = 0;
            for customer in &customers {
                stmt.execute(params![
                    customer.customer_id,
                    customer.first_name,
                    customer.last_name,
                    customer.country.display_name(),
                    customer.telephone,
                    customer.created_at,
                    customer.updated_at,
                ])?;
                count += 1;
            }
            count
        };

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(count)
    }

    async fn insert_error_logs(&self, logs: Vec<ErrorLog>) -> RepositoryResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let count = {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO error_log (filename, error_message, created_at)
                VALUES (?1, ?2, ?3)
                "#,
            )?;

            let mut count = 0;
            for log in &logs {
                stmt.execute(params![log.filename, log.error_message, log.created_at])?;
                count += 1;
            }
            count
        };

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(count)
    }

    async fn insert_batch(&self, batch: ImportBatch) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO import_batch (
                batch_id, file_name, total_rows, accepted_rows, rejected_rows,
                error_count, elapsed_ms, imported_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                batch.batch_id,
                batch.file_name,
                batch.total_rows,
                batch.accepted_rows,
                batch.rejected_rows,
                batch.error_count,
                batch.elapsed_ms,
                batch.imported_at,
            ],
        )?;
        Ok(())
    }

    async fn get_customer(&self, customer_id: i64) -> RepositoryResult<Option<Customer>> {
        let conn = self.lock()?;
        let found = conn
            .query_row(
                r#"
                SELECT customer_id, first_name, last_name, country, telephone,
                       created_at, updated_at
                FROM customer WHERE customer_id = ?1
                "#,
                params![customer_id],
                |row| CustomerRow::from_row(row),
            )
            .optional()?;

        found
            .map(CustomerImportRepositoryImpl::build_customer)
            .transpose()
    }

    async fn count_customers(&self) -> RepositoryResult<i64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM customer", [], |row| row.get(0))?;
        Ok(count)
    }

    async fn list_error_logs(&self, filename: &str) -> RepositoryResult<Vec<ErrorLog>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT filename, error_message, created_at
            FROM error_log WHERE filename = ?1 ORDER BY id
            "#,
        )?;

        let logs = stmt
            .query_map(params![filename], |row| {
                Ok(ErrorLog {
                    filename: row.get("filename")?,
                    error_message: row.get("error_message")?,
                    created_at: row.get("created_at")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(logs)
    }

    async fn get_batch(&self, batch_id: &str) -> RepositoryResult<Option<ImportBatch>> {
        let conn = self.lock()?;
        let batch = conn
            .query_row(
                r#"
                SELECT batch_id, file_name, total_rows, accepted_rows, rejected_rows,
                       error_count, elapsed_ms, imported_at
                FROM import_batch WHERE batch_id = ?1
                "#,
                params![batch_id],
                |row| {
                    Ok(ImportBatch {
                        batch_id: row.get("batch_id")?,
                        file_name: row.get("file_name")?,
                        total_rows: row.get("total_rows")?,
                        accepted_rows: row.get("accepted_rows")?,
                        rejected_rows: row.get("rejected_rows")?,
                        error_count: row.get("error_count")?,
                        elapsed_ms: row.get("elapsed_ms")?,
                        imported_at: row.get("imported_at")?,
                    })
                },
            )
            .optional()?;

        Ok(batch)
    }
}
