use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::QueryRejection;
use chrono::Utc;
use serde::Serialize;
use service::errors::ServiceError;
use tracing::error;

/// Broad failure class; decides the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn title(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "Resource Not Found",
            ErrorKind::Validation => "Validation Failed",
            ErrorKind::Internal => "Internal Server Error",
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorDetail {
    pub title: String,
    pub status: u16,
    pub detail: String,
    /// milliseconds since the Unix epoch
    pub timestamp: i64,
    pub developer_message: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub detail: String,
    pub developer_message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>, developer_message: impl Into<String>) -> Self {
        Self { kind, detail: detail.into(), developer_message: developer_message.into() }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let developer_message = format!("{e:?}");
        match e {
            ServiceError::NotFound(msg) => Self::new(ErrorKind::NotFound, msg, developer_message),
            ServiceError::Validation(msg) => Self::new(ErrorKind::Validation, msg, developer_message),
            ServiceError::Model(m) => Self::new(ErrorKind::Validation, m.to_string(), developer_message),
            ServiceError::Db(msg) => Self::new(ErrorKind::Internal, msg, developer_message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        Self::new(ErrorKind::Validation, r.body_text(), format!("{r:?}"))
    }
}

impl From<PathRejection> for ApiError {
    fn from(r: PathRejection) -> Self {
        Self::new(ErrorKind::Validation, r.body_text(), format!("{r:?}"))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(r: QueryRejection) -> Self {
        Self::new(ErrorKind::Validation, r.to_string(), format!("{r:?}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status();
        if self.kind == ErrorKind::Internal {
            error!(detail = %self.detail, developer_message = %self.developer_message, "request failed");
        }
        let body = ErrorDetail {
            title: self.kind.title().to_string(),
            status: status.as_u16(),
            detail: self.detail,
            timestamp: Utc::now().timestamp_millis(),
            developer_message: self.developer_message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn service_errors_map_to_kinds() {
        let cases = [
            (ServiceError::not_found("course", 99999), ErrorKind::NotFound),
            (ServiceError::Validation("bad".into()), ErrorKind::Validation),
            (ServiceError::Model(ModelError::Validation("name".into())), ErrorKind::Validation),
            (ServiceError::Db("down".into()), ErrorKind::Internal),
        ];
        for (err, kind) in cases {
            assert_eq!(ApiError::from(err).kind, kind);
        }
    }

    #[test]
    fn kinds_map_to_status_codes() {
        assert_eq!(ErrorKind::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorKind::Validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::Internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_detail_names_id() {
        let e = ApiError::from(ServiceError::not_found("course", 99999));
        assert!(e.detail.contains("99999"));
        assert_eq!(e.into_response().status(), StatusCode::NOT_FOUND);
    }
}
