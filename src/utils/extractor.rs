//! 路径参数提取器
//!
//! 非法的路径 ID 直接返回 400，不进入业务逻辑。

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::errors::CampusError;

macro_rules! safe_path_id {
    ($(#[$meta:meta])* $name:ident, $param:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = CampusError;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_positive_id(req.match_info().get($param), $param).map($name))
            }
        }
    };
}

fn parse_positive_id(raw: Option<&str>, param: &str) -> Result<i64, CampusError> {
    match raw.and_then(|value| value.parse::<i64>().ok()) {
        Some(id) if id > 0 => Ok(id),
        _ => Err(CampusError::validation(format!(
            "Invalid path parameter '{param}'"
        ))),
    }
}

safe_path_id!(
    /// `{id}` 路径参数
    SafeIDI64,
    "id"
);

safe_path_id!(
    /// `{user_id}` 路径参数（项目成员等子资源）
    SafeUserIdI64,
    "user_id"
);

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_valid_id() {
        let req = TestRequest::default().param("id", "17").to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 17);
    }

    #[actix_web::test]
    async fn test_rejects_non_numeric_and_non_positive() {
        for raw in ["abc", "0", "-3", "1.5"] {
            let req = TestRequest::default().param("id", raw).to_http_request();
            let err = SafeIDI64::extract(&req).await.unwrap_err();
            assert_eq!(err.status(), actix_web::http::StatusCode::BAD_REQUEST);
        }
    }
}
