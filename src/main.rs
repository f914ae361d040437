// ==========================================
// 客户数据导入系统 - CLI 主入口
// ==========================================
// 用法: customer-import <文件路径> [数据库路径]
// ==========================================

use customer_import::api::ImportApi;
use customer_import::logging;
use std::path::PathBuf;
use std::process::ExitCode;

/// 默认数据库路径（用户数据目录下）
fn default_db_path() -> String {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("customer-import");

    // 目录不存在则创建,失败时回落到当前目录
    if std::fs::create_dir_all(&dir).is_err() {
        return "customers.db".to_string();
    }

    dir.join("customers.db").display().to_string()
}

#[tokio::main]
async fn main() -> ExitCode {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", customer_import::APP_NAME, customer_import::VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);
    let Some(file_path) = args.next() else {
        tracing::error!("用法: customer-import <文件路径> [数据库路径]");
        return ExitCode::FAILURE;
    };
    let db_path = args.next().unwrap_or_else(default_db_path);
    tracing::info!("使用数据库: {}", db_path);

    let api = ImportApi::new(db_path);
    match api.import_customers(&file_path).await {
        Ok(response) if response.accepted => {
            tracing::info!(
                batch_id = %response.batch_id,
                imported = response.imported,
                elapsed_ms = response.elapsed_ms,
                "导入成功"
            );
            ExitCode::SUCCESS
        }
        Ok(response) => {
            tracing::warn!(
                batch_id = %response.batch_id,
                errors = response.errors.len(),
                "整批拒绝,没有记录入库"
            );
            for error in &response.errors {
                tracing::warn!("行 {}: {}", error.row, error.message);
            }
            if let Some(key) = &response.error_workbook_key {
                tracing::warn!("错误工作簿工件键: {}", key);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "导入失败");
            ExitCode::FAILURE
        }
    }
}
