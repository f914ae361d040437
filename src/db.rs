// ==========================================
// 客户数据导入系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 建表语句集中于此（CREATE TABLE IF NOT EXISTS）
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库 schema
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    // customer 表: customer_id 为自然主键（upsert 键）
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS customer (
            customer_id INTEGER PRIMARY KEY,
            first_name  TEXT NOT NULL,
            last_name   TEXT NOT NULL,
            country     TEXT NOT NULL,
            telephone   INTEGER NOT NULL,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        )
        "#,
        [],
    )?;

    // error_log 表
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS error_log (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            filename      TEXT NOT NULL,
            error_message TEXT NOT NULL,
            created_at    TEXT NOT NULL
        )
        "#,
        [],
    )?;

    // import_batch 表
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS import_batch (
            batch_id      TEXT PRIMARY KEY,
            file_name     TEXT,
            total_rows    INTEGER NOT NULL,
            accepted_rows INTEGER NOT NULL,
            rejected_rows INTEGER NOT NULL,
            error_count   INTEGER NOT NULL,
            elapsed_ms    INTEGER NOT NULL,
            imported_at   TEXT NOT NULL
        )
        "#,
        [],
    )?;

    Ok(())
}
