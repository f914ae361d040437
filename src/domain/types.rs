// ==========================================
// 客户数据导入系统 - 领域类型定义
// ==========================================
// 红线: 国家为封闭枚举,禁止透传任意文本
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ==========================================
// 国家 (Country)
// ==========================================
// 允许集合固定,按展示名大小写不敏感匹配
// 序列化格式: 规范展示名 (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Country {
    UnitedStates,
    GreatBritain,
    France,
}

impl Country {
    /// 全部允许值（固定顺序）
    pub const ALL: [Country; 3] = [Country::UnitedStates, Country::GreatBritain, Country::France];

    /// 规范展示名
    pub fn display_name(&self) -> &'static str {
        match self {
            Country::UnitedStates => "United States",
            Country::GreatBritain => "Great Britain",
            Country::France => "France",
        }
    }

    /// 按展示名解析（大小写不敏感,两侧空白忽略）
    ///
    /// # 返回
    /// - Ok(Country): 匹配成功
    /// - Err(UnknownCountry): 不在允许集合内
    pub fn from_display_name(value: &str) -> Result<Country, UnknownCountry> {
        let trimmed = value.trim();
        Country::ALL
            .iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| UnknownCountry(trimmed.to_string()))
    }

    /// 允许值列表文本（用于错误消息）
    pub fn allowed_values() -> String {
        Country::ALL
            .iter()
            .map(|c| c.display_name())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl From<Country> for String {
    fn from(c: Country) -> Self {
        c.display_name().to_string()
    }
}

impl TryFrom<String> for Country {
    type Error = UnknownCountry;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Country::from_display_name(&value)
    }
}

/// 国家不在允许集合内
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("未知国家: {0}")]
pub struct UnknownCountry(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_case_insensitive() {
        assert_eq!(
            Country::from_display_name("great britain").unwrap(),
            Country::GreatBritain
        );
        assert_eq!(
            Country::from_display_name("UNITED STATES").unwrap(),
            Country::UnitedStates
        );
        assert_eq!(Country::from_display_name("France").unwrap(), Country::France);
    }

    #[test]
    fn test_country_trims_whitespace() {
        assert_eq!(
            Country::from_display_name("  France  ").unwrap(),
            Country::France
        );
    }

    #[test]
    fn test_country_unknown_is_error() {
        let err = Country::from_display_name("Germany").unwrap_err();
        assert_eq!(err.0, "Germany");
    }

    #[test]
    fn test_country_display_roundtrip() {
        for c in Country::ALL {
            assert_eq!(Country::from_display_name(c.display_name()).unwrap(), c);
        }
    }
}
