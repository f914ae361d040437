// ==========================================
// 客户数据导入 API
// ==========================================
// 职责: 封装一次上传的完整导入操作,面向调用方
// 红线: 错误工作簿以服务端生成的工件键标识,
//       不使用上传文件名构造文件系统路径
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ImportConfig;
use crate::domain::{RowError, ValidationOutcome};
use crate::importer::{
    CustomerImporter, CustomerImporterImpl, ErrorReporterImpl, HeaderValidatorImpl,
    RowValidatorImpl, UniversalFileParser,
};
use crate::repository::CustomerImportRepositoryImpl;
use serde::{Deserialize, Serialize};

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 批次ID
    pub batch_id: String,
    /// 整批是否被接受
    pub accepted: bool,
    /// 入库的客户数量（拒绝时为 0）
    pub imported: usize,
    /// 数据行总数
    pub total_rows: usize,
    /// 行级错误列表（接受时为空）
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<RowError>,
    /// 错误工作簿工件键（仅拒绝且配置为 Workbook 时存在）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_workbook_key: Option<String>,
    /// 错误工作簿字节（xlsx,与工件键成对出现）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_workbook: Option<Vec<u8>>,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
}

/// 导入API
pub struct ImportApi {
    db_path: String,
    config: ImportConfig,
}

impl ImportApi {
    /// 创建新的 ImportApi 实例（默认配置）
    pub fn new(db_path: String) -> Self {
        Self {
            db_path,
            config: ImportConfig::default(),
        }
    }

    /// 创建带显式配置的实例
    pub fn with_config(db_path: String, config: ImportConfig) -> Self {
        Self { db_path, config }
    }

    /// 导入客户数据
    ///
    /// # 参数
    /// - file_path: 上传文件路径（.xlsx/.xls/.csv）
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 接受（入库数量）或拒绝（完整错误列表/错误工作簿）
    /// - Err(ApiError): IO 失败、数据库错误
    pub async fn import_customers(&self, file_path: &str) -> ApiResult<ImportApiResponse> {
        let importer = self.create_importer()?;

        let result = importer.import_from_file(file_path).await?;

        let response = match &result.outcome {
            ValidationOutcome::Accepted(_) => ImportApiResponse {
                batch_id: result.batch.batch_id.clone(),
                accepted: true,
                imported: result.batch.accepted_rows as usize,
                total_rows: result.batch.total_rows as usize,
                errors: Vec::new(),
                error_workbook_key: None,
                error_workbook: None,
                elapsed_ms: result.batch.elapsed_ms,
            },
            ValidationOutcome::Rejected(errors) => {
                // 工件键由批次 ID 派生,对调用方是不透明标识
                let workbook_key = result
                    .error_workbook
                    .as_ref()
                    .map(|_| format!("error_{}.xlsx", result.batch.batch_id));

                ImportApiResponse {
                    batch_id: result.batch.batch_id.clone(),
                    accepted: false,
                    imported: 0,
                    total_rows: result.batch.total_rows as usize,
                    errors: errors.clone(),
                    error_workbook_key: workbook_key,
                    error_workbook: result.error_workbook.clone(),
                    elapsed_ms: result.batch.elapsed_ms,
                }
            }
        };

        Ok(response)
    }

    /// 组装导入器（解析器/校验器/错误报告器 + 仓储）
    fn create_importer(
        &self,
    ) -> ApiResult<CustomerImporterImpl<CustomerImportRepositoryImpl>> {
        let import_repo = CustomerImportRepositoryImpl::new(&self.db_path)
            .map_err(|e| ApiError::InternalError(format!("创建仓储失败: {}", e)))?;

        Ok(CustomerImporterImpl::new(
            import_repo,
            self.config.clone(),
            Box::new(UniversalFileParser::new(self.config.sheet_name.clone())),
            Box::new(HeaderValidatorImpl),
            Box::new(RowValidatorImpl),
            Box::new(ErrorReporterImpl),
        ))
    }
}
