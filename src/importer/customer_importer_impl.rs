// ==========================================
// 客户数据导入系统 - 客户数据导入器实现
// ==========================================
// 职责: 整合导入流程,从文件到数据库
// 流程: 解析 → 表头校验 → 逐行校验 → 整批接受/拒绝 → 落库/错误报告
// 红线: 整批拒绝,任一行失败则没有任何记录入库;
//       错误穷尽收集,一次响应暴露全部问题
// ==========================================

use crate::config::{ErrorReportMode, ImportConfig};
use crate::domain::{
    Cell, Customer, ErrorLog, ImportBatch, ImportOutcome, RawSheet, RowError, ValidationOutcome,
};
use crate::importer::customer_importer_trait::{
    CustomerImporter, ErrorReporter, HeaderValidator, RowValidator, SheetParser,
};
use crate::importer::error::ImportResult;
use crate::repository::CustomerImportRepository;
use chrono::Utc;
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// CustomerImporterImpl - 客户数据导入器实现
// ==========================================
pub struct CustomerImporterImpl<R>
where
    R: CustomerImportRepository,
{
    // 数据访问层
    import_repo: R,

    // 导入配置
    config: ImportConfig,

    // 导入组件
    sheet_parser: Box<dyn SheetParser>,
    header_validator: Box<dyn HeaderValidator>,
    row_validator: Box<dyn RowValidator>,
    error_reporter: Box<dyn ErrorReporter>,
}

impl<R> CustomerImporterImpl<R>
where
    R: CustomerImportRepository,
{
    pub fn new(
        import_repo: R,
        config: ImportConfig,
        sheet_parser: Box<dyn SheetParser>,
        header_validator: Box<dyn HeaderValidator>,
        row_validator: Box<dyn RowValidator>,
        error_reporter: Box<dyn ErrorReporter>,
    ) -> Self {
        Self {
            import_repo,
            config,
            sheet_parser,
            header_validator,
            row_validator,
            error_reporter,
        }
    }

    /// 校验整张表: 表头一次,数据行逐行,结果折叠为单一值
    ///
    /// 各步骤以返回值汇入批次列表,不经任何共享可变状态
    fn validate_sheet(&self, sheet: &RawSheet) -> ValidationOutcome {
        // === 表头校验 ===
        let headers = match self.header_validator.validate(sheet) {
            Ok(headers) => headers,
            Err(header_errors) => {
                warn!(errors = header_errors.len(), "表头校验失败,不处理数据行");
                return ValidationOutcome::Rejected(header_errors);
            }
        };
        debug!(columns = headers.len(), "表头校验通过");

        // === 逐行校验 ===
        let mut customers: Vec<Customer> = Vec::new();
        let mut errors: Vec<RowError> = Vec::new();

        for (row_number, row) in sheet.data_rows() {
            // 空白行默认参与校验（产出缺失字段错误）,跳过需显式配置
            if self.config.skip_blank_rows && row.iter().all(Cell::is_blank) {
                debug!(row_number, "跳过空白行（skip_blank_rows 已启用）");
                continue;
            }

            match self.row_validator.validate(row, row_number, &headers) {
                Ok(customer) => customers.push(customer),
                Err(mut row_errors) => errors.append(&mut row_errors),
            }
        }

        if errors.is_empty() {
            ValidationOutcome::Accepted(customers)
        } else {
            ValidationOutcome::Rejected(errors)
        }
    }

    /// 含错误的行数（同一行多条错误计一次）
    fn rejected_row_count(errors: &[RowError]) -> usize {
        errors.iter().map(|e| e.row).collect::<BTreeSet<_>>().len()
    }
}

#[async_trait::async_trait]
impl<R> CustomerImporter for CustomerImporterImpl<R>
where
    R: CustomerImportRepository + Send + Sync,
{
    #[instrument(skip(self, file_path), fields(batch_id))]
    async fn import_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();

        let file_name = file_path
            .as_ref()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        info!(batch_id = %batch_id, file = %file_name, "开始导入客户数据");

        // === 步骤 1: 解析文件（IO 失败整单中止,不进入行级错误）===
        debug!("步骤 1: 解析文件");
        let sheet = self
            .sheet_parser
            .parse_to_sheet(file_path.as_ref())
            .map_err(|e| {
                error!(error = %e, "文件解析失败");
                e
            })?;
        let total_rows = sheet.data_row_count();
        info!(total_rows, "文件解析完成");

        // === 步骤 2: 整表校验 ===
        debug!("步骤 2: 整表校验");
        let outcome = self.validate_sheet(&sheet);

        // === 步骤 3: 终态处理 ===
        let (accepted_rows, rejected_rows, error_count, error_workbook) = match &outcome {
            ValidationOutcome::Accepted(customers) => {
                // 唯一允许落库的状态: 单次事务批量 upsert
                debug!("步骤 3: 批量 upsert Customer");
                let stored = self.import_repo.upsert_customers(customers.clone()).await?;
                info!(count = stored, "客户数据入库完成");
                (stored, 0usize, 0usize, None)
            }
            ValidationOutcome::Rejected(errors) => {
                warn!(errors = errors.len(), "整批拒绝,没有记录入库");

                // 错误报告: 工作簿按配置生成,错误日志始终落库
                debug!("步骤 3: 生成错误报告");
                let workbook = match self.config.error_report_mode {
                    ErrorReportMode::Workbook => {
                        Some(self.error_reporter.build_error_workbook(&sheet, errors)?)
                    }
                    ErrorReportMode::Inline => None,
                };

                let now = Utc::now();
                let logs: Vec<ErrorLog> = self
                    .error_reporter
                    .build_error_log(&file_name, errors)
                    .into_iter()
                    .map(|(filename, error_message)| ErrorLog {
                        filename,
                        error_message,
                        created_at: now,
                    })
                    .collect();
                let logged = self.import_repo.insert_error_logs(logs).await?;
                debug!(count = logged, "错误日志落库完成");

                (
                    0usize,
                    CustomerImporterImpl::<R>::rejected_row_count(errors),
                    errors.len(),
                    workbook,
                )
            }
        };

        let elapsed_time = start_time.elapsed();

        // === 步骤 4: 记录批次信息 ===
        debug!("步骤 4: 记录批次信息");
        let batch = ImportBatch {
            batch_id: batch_id.clone(),
            file_name: Some(file_name),
            total_rows: total_rows as i64,
            accepted_rows: accepted_rows as i64,
            rejected_rows: rejected_rows as i64,
            error_count: error_count as i64,
            elapsed_ms: elapsed_time.as_millis() as i64,
            imported_at: Utc::now(),
        };
        self.import_repo.insert_batch(batch.clone()).await?;

        info!(
            batch_id = %batch_id,
            total = total_rows,
            accepted = accepted_rows,
            errors = error_count,
            elapsed_ms = elapsed_time.as_millis(),
            "客户数据导入完成"
        );

        Ok(ImportOutcome {
            batch,
            outcome,
            error_workbook,
            elapsed_time,
        })
    }
}
