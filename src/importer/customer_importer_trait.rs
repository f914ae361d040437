// ==========================================
// 客户数据导入系统 - 导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::{Cell, Customer, HeaderMap, ImportOutcome, RawSheet, RowError};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// CustomerImporter Trait
// ==========================================
// 用途: 导入主接口
// 实现者: CustomerImporterImpl
#[async_trait]
pub trait CustomerImporter: Send + Sync {
    /// 从电子表格文件导入客户数据
    ///
    /// # 参数
    /// - file_path: 文件路径（.xlsx/.xls/.csv）
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 批次信息 + 整批接受/拒绝结果
    /// - Err(ImportError): IO 失败（文件不可读/格式不支持）、数据库错误
    ///
    /// # 导入流程
    /// 1. 文件解析（IO 失败整单中止）
    /// 2. 表头校验（失败则拒绝,不处理数据行）
    /// 3. 逐行校验,折叠记录与错误
    /// 4. 有错误 → 整批拒绝 + 错误报告; 无错误 → 批量 upsert
    async fn import_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportOutcome>;
}

// ==========================================
// SheetParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: ExcelParser, CsvParser, UniversalFileParser
pub trait SheetParser: Send + Sync {
    /// 解析文件为带类型标记的原始表格（含表头行）
    ///
    /// # 返回
    /// - Ok(RawSheet): 行 0 为表头行
    /// - Err: 文件读取错误、格式错误
    fn parse_to_sheet(&self, file_path: &Path) -> ImportResult<RawSheet>;
}

// ==========================================
// HeaderValidator Trait
// ==========================================
// 用途: 表头校验接口（阶段 1,每张表执行一次）
// 实现者: HeaderValidatorImpl
pub trait HeaderValidator: Send + Sync {
    /// 校验表头行并构建表头映射
    ///
    /// # 返回
    /// - Ok(HeaderMap): 必需列名 → 列位置
    /// - Err(Vec<RowError>): 穷尽收集的表头错误
    ///   （缺失列逐列一条,重复表头每次出现一条,空表单条）
    fn validate(&self, sheet: &RawSheet) -> Result<HeaderMap, Vec<RowError>>;
}

// ==========================================
// RowValidator Trait
// ==========================================
// 用途: 数据行校验接口（阶段 2,逐行执行）
// 实现者: RowValidatorImpl
pub trait RowValidator: Send + Sync {
    /// 校验一行并构造 Customer
    ///
    /// # 返回
    /// - Ok(Customer): 五个字段全部通过
    /// - Err(Vec<RowError>): 每个失败字段一条,不短路
    fn validate(
        &self,
        row: &[Cell],
        row_number: usize,
        headers: &HeaderMap,
    ) -> Result<Customer, Vec<RowError>>;
}

// ==========================================
// ErrorReporter Trait
// ==========================================
// 用途: 错误报告接口（阶段 3,仅拒绝时执行）
// 实现者: ErrorReporterImpl
pub trait ErrorReporter: Send + Sync {
    /// 生成错误工作簿（原始内容 + 追加 "Error" 列）
    ///
    /// # 返回
    /// - Ok(Vec<u8>): xlsx 字节,行对应关系与原表严格一致
    fn build_error_workbook(&self, sheet: &RawSheet, errors: &[RowError]) -> ImportResult<Vec<u8>>;

    /// 生成 (文件名, 消息) 错误日志对
    ///
    /// 消息中引用可见行号,供日志仓储持久化
    fn build_error_log(&self, filename: &str, errors: &[RowError]) -> Vec<(String, String)>;
}
