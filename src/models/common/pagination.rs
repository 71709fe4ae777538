use serde::{Deserialize, Serialize};

/// 单页最大条数
pub const MAX_PAGE_LIMIT: i64 = 100;

/// 页码上限，偏移量不会溢出
pub const MAX_PAGE: i64 = 1_000_000;

// 分页查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_limit",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub limit: i64,
}

impl PaginationQuery {
    /// 规范化后的页码（从 1 开始）
    pub fn page(&self) -> u64 {
        self.page.clamp(1, MAX_PAGE) as u64
    }

    /// 规范化后的每页条数
    pub fn limit(&self) -> u64 {
        self.limit.clamp(1, MAX_PAGE_LIMIT) as u64
    }

    /// 当前页的偏移量
    pub fn offset(&self) -> u64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

// 分页响应信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            page: page as i64,
            limit: limit as i64,
            total: total as i64,
            total_pages: total.div_ceil(limit.max(1)) as i64,
        }
    }
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, pagination: PaginationInfo) -> Self {
        Self { items, pagination }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

/// 查询字符串中的可选过滤值（数字、布尔等）统一按字符串解析
///
/// `#[serde(flatten)]` 会把查询参数缓存为字符串，普通的 `Option<i64>` 无法直接反序列化。
pub fn deserialize_option_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    use serde::de::{Error, Visitor};
    use std::fmt;
    use std::marker::PhantomData;

    struct OptionVisitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for OptionVisitor<T>
    where
        T: std::str::FromStr,
        T::Err: fmt::Display,
    {
        type Value = Option<T>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a value or a string containing a value")
        }

        fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: serde::Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
            if value.is_empty() {
                return Ok(None);
            }
            value.parse().map(Some).map_err(Error::custom)
        }

        fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
            self.visit_str(&value.to_string())
        }

        fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
            self.visit_str(&value.to_string())
        }

        fn visit_f64<E: Error>(self, value: f64) -> Result<Self::Value, E> {
            self.visit_str(&value.to_string())
        }

        fn visit_bool<E: Error>(self, value: bool) -> Result<Self::Value, E> {
            self.visit_str(&value.to_string())
        }
    }

    deserializer.deserialize_any(OptionVisitor(PhantomData))
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(PaginationInfo::new(1, 10, 0).total_pages, 0);
        assert_eq!(PaginationInfo::new(1, 10, 10).total_pages, 1);
        assert_eq!(PaginationInfo::new(1, 10, 11).total_pages, 2);
        assert_eq!(PaginationInfo::new(3, 7, 50).total_pages, 8);
    }

    #[test]
    fn test_query_normalization() {
        let query = PaginationQuery { page: 0, limit: 500 };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), MAX_PAGE_LIMIT as u64);

        let query = PaginationQuery { page: 3, limit: 20 };
        assert_eq!(query.offset(), 40);
    }

    #[test]
    fn test_huge_page_is_capped() {
        let query = PaginationQuery {
            page: i64::MAX,
            limit: MAX_PAGE_LIMIT,
        };
        assert_eq!(query.page(), MAX_PAGE as u64);
        assert_eq!(
            query.offset(),
            (MAX_PAGE as u64 - 1) * MAX_PAGE_LIMIT as u64
        );

        let query: PaginationQuery =
            serde_json::from_value(serde_json::json!({"page": "9223372036854775807"})).unwrap();
        assert_eq!(query.page(), MAX_PAGE as u64);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Filters {
        #[serde(flatten)]
        pagination: PaginationQuery,
        #[serde(default, deserialize_with = "deserialize_option_from_str")]
        program_id: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_option_from_str")]
        is_read: Option<bool>,
    }

    #[test]
    fn test_flattened_filters_from_query_string() {
        let filters = actix_web::web::Query::<Filters>::from_query(
            "page=2&limit=5&program_id=7&is_read=true",
        )
        .unwrap()
        .into_inner();
        assert_eq!(filters.pagination.page, 2);
        assert_eq!(filters.program_id, Some(7));
        assert_eq!(filters.is_read, Some(true));

        let filters = actix_web::web::Query::<Filters>::from_query("")
            .unwrap()
            .into_inner();
        assert_eq!(filters.pagination.limit, 10);
        assert_eq!(filters.program_id, None);
    }

    #[test]
    fn test_query_accepts_strings() {
        let query: PaginationQuery =
            serde_json::from_value(serde_json::json!({"page": "2", "limit": 5})).unwrap();
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 5);
    }
}
