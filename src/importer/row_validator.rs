// ==========================================
// 客户数据导入系统 - 数据行校验器实现
// ==========================================
// 职责: 单行数据 → Customer 或逐字段错误列表
// 红线: 逐字段穷尽收集,不在首个失败字段处短路;
//       未知国家按错误报告,禁止静默丢弃
// ==========================================

use crate::domain::types::Country;
use crate::domain::{Cell, Customer, ErrorKind, HeaderMap, RowError};
use crate::importer::cell::{as_integer, as_text, CoercionFailure};
use crate::importer::customer_importer_trait::RowValidator as RowValidatorTrait;
use crate::importer::header_validator::REQUIRED_COLUMNS;
use chrono::Utc;

pub struct RowValidator;

impl RowValidator {
    fn coercion_error(row_number: usize, column: &str, failure: CoercionFailure) -> RowError {
        match failure {
            CoercionFailure::Missing => RowError::new(
                row_number,
                column,
                ErrorKind::MissingValue,
                format!("字段缺失: {}", column),
            ),
            CoercionFailure::Blank => RowError::new(
                row_number,
                column,
                ErrorKind::BlankValue,
                format!("字段为空: {}", column),
            ),
            CoercionFailure::WrongType { expected, actual } => RowError::new(
                row_number,
                column,
                ErrorKind::TypeMismatch,
                format!("类型错误: {} 期望{}, 实际为{}", column, expected, actual),
            ),
        }
    }

    fn integer_field(
        row: &[Cell],
        row_number: usize,
        column: &str,
        headers: &HeaderMap,
        errors: &mut Vec<RowError>,
    ) -> Option<i64> {
        let cell = headers.position(column).and_then(|idx| row.get(idx));
        match as_integer(cell) {
            Ok(v) => Some(v),
            Err(failure) => {
                errors.push(RowValidator::coercion_error(row_number, column, failure));
                None
            }
        }
    }

    fn text_field(
        row: &[Cell],
        row_number: usize,
        column: &str,
        headers: &HeaderMap,
        errors: &mut Vec<RowError>,
    ) -> Option<String> {
        let cell = headers.position(column).and_then(|idx| row.get(idx));
        match as_text(cell) {
            Ok(v) => Some(v),
            Err(failure) => {
                errors.push(RowValidator::coercion_error(row_number, column, failure));
                None
            }
        }
    }
}

impl RowValidatorTrait for RowValidator {
    /// 校验一行数据
    ///
    /// # 参数
    /// - row: 数据行单元格
    /// - row_number: 可见行号（1 基,表头为第 1 行）
    /// - headers: 表头映射
    ///
    /// # 返回
    /// - Ok(Customer): 五个字段全部通过
    /// - Err(Vec<RowError>): 每个失败字段一条错误
    fn validate(
        &self,
        row: &[Cell],
        row_number: usize,
        headers: &HeaderMap,
    ) -> Result<Customer, Vec<RowError>> {
        let mut errors = Vec::new();

        let [id_col, first_col, last_col, country_col, phone_col] = REQUIRED_COLUMNS;

        let customer_id =
            RowValidator::integer_field(row, row_number, id_col, headers, &mut errors);
        let first_name =
            RowValidator::text_field(row, row_number, first_col, headers, &mut errors);
        let last_name = RowValidator::text_field(row, row_number, last_col, headers, &mut errors);

        // 国家: 先按文本取值,再对封闭集合做大小写不敏感匹配
        let country = RowValidator::text_field(row, row_number, country_col, headers, &mut errors)
            .and_then(|value| match Country::from_display_name(&value) {
                Ok(c) => Some(c),
                Err(unknown) => {
                    errors.push(RowError::new(
                        row_number,
                        country_col,
                        ErrorKind::UnknownCountry,
                        format!("{}（允许: {}）", unknown, Country::allowed_values()),
                    ));
                    None
                }
            });

        let telephone =
            RowValidator::integer_field(row, row_number, phone_col, headers, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        // 全部字段已通过,unwrap 不可达
        let now = Utc::now();
        Ok(Customer {
            customer_id: customer_id.unwrap(),
            first_name: first_name.unwrap(),
            last_name: last_name.unwrap(),
            country: country.unwrap(),
            telephone: telephone.unwrap(),
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::customer_importer_trait::HeaderValidator as _;
    use crate::importer::header_validator::HeaderValidator;
    use crate::domain::RawSheet;

    fn standard_headers() -> HeaderMap {
        let sheet = RawSheet::new(vec![REQUIRED_COLUMNS
            .iter()
            .map(|n| Cell::Text(n.to_string()))
            .collect()]);
        HeaderValidator.validate(&sheet).unwrap()
    }

    fn valid_row() -> Vec<Cell> {
        vec![
            Cell::Number(1001.0),
            Cell::Text("Ada".to_string()),
            Cell::Text("Lovelace".to_string()),
            Cell::Text("Great Britain".to_string()),
            Cell::Number(2071234567.0),
        ]
    }

    #[test]
    fn test_valid_row_builds_customer() {
        let headers = standard_headers();
        let customer = RowValidator.validate(&valid_row(), 2, &headers).unwrap();

        assert_eq!(customer.customer_id, 1001);
        assert_eq!(customer.first_name, "Ada");
        assert_eq!(customer.last_name, "Lovelace");
        assert_eq!(customer.country, Country::GreatBritain);
        assert_eq!(customer.telephone, 2071234567);
    }

    #[test]
    fn test_country_mixed_case_resolves() {
        let headers = standard_headers();
        let mut row = valid_row();
        row[3] = Cell::Text("great britain".to_string());

        let customer = RowValidator.validate(&row, 2, &headers).unwrap();
        assert_eq!(customer.country, Country::GreatBritain);
    }

    #[test]
    fn test_unknown_country_is_error_not_dropped() {
        let headers = standard_headers();
        let mut row = valid_row();
        row[3] = Cell::Text("Germany".to_string());

        let errors = RowValidator.validate(&row, 2, &headers).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::UnknownCountry);
        assert_eq!(errors[0].column.as_deref(), Some("Country"));
        assert!(errors[0].message.contains("Germany"));
    }

    #[test]
    fn test_multiple_bad_fields_one_error_each() {
        let headers = standard_headers();
        let mut row = valid_row();
        row[0] = Cell::Text("abc".to_string()); // Customer ID 非数值
        row[2] = Cell::Text("  ".to_string()); // Last Name 空白

        let errors = RowValidator.validate(&row, 3, &headers).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].column.as_deref(), Some("Customer ID"));
        assert_eq!(errors[0].kind, ErrorKind::TypeMismatch);
        assert_eq!(errors[1].column.as_deref(), Some("Last Name"));
        assert_eq!(errors[1].kind, ErrorKind::BlankValue);
        assert!(errors.iter().all(|e| e.row == 3));
    }

    #[test]
    fn test_short_row_every_field_missing() {
        let headers = standard_headers();
        let errors = RowValidator.validate(&[], 2, &headers).unwrap_err();

        assert_eq!(errors.len(), 5);
        assert!(errors.iter().all(|e| e.kind == ErrorKind::MissingValue));
    }

    #[test]
    fn test_telephone_as_text_is_type_error() {
        let headers = standard_headers();
        let mut row = valid_row();
        row[4] = Cell::Text("2071234567".to_string());

        let errors = RowValidator.validate(&row, 2, &headers).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].column.as_deref(), Some("Telephone"));
        assert_eq!(errors[0].kind, ErrorKind::TypeMismatch);
    }
}
