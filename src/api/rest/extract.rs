use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// `axum::Json` whose rejections render as `AppError::BadRequest`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Parses a JSON body that may be left out entirely. Blank means `T::default()`; anything
/// else has to parse.
pub fn optional_json<T>(body: &Bytes) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body)
        .map_err(|err| AppError::BadRequest(format!("invalid JSON body: {err}")))
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;
    use serde::Deserialize;

    use super::optional_json;
    use crate::error::AppError;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Body {
        category: Option<String>,
    }

    #[test]
    fn blank_body_uses_default() {
        let parsed: Body = optional_json(&Bytes::from_static(b"  \n")).unwrap();
        assert_eq!(parsed, Body::default());
    }

    #[test]
    fn malformed_body_is_bad_request() {
        match optional_json::<Body>(&Bytes::from_static(b"{\"category\": 7}")) {
            Err(AppError::BadRequest(message)) => assert!(message.contains("invalid JSON body")),
            other => panic!("expected bad request, got {other:?}"),
        }
    }
}
