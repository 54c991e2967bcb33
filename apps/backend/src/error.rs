use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use data::{BootstrapError, DataError};
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {detail}")]
    BadRequest { code: &'static str, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    fn code(&self) -> String {
        match self {
            AppError::BadRequest { code, .. } => (*code).to_string(),
            AppError::NotFound { code, .. } => (*code).to_string(),
            AppError::Db { .. } => "DB_ERROR".to_string(),
            AppError::Config { .. } => "CONFIG_ERROR".to_string(),
            AppError::Internal { .. } => "INTERNAL".to_string(),
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::BadRequest { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Db { detail }
            | AppError::Config { detail }
            | AppError::Internal { detail } => detail.clone(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Db { .. } | AppError::Config { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn bad_request(code: &'static str, detail: String) -> Self {
        Self::BadRequest { code, detail }
    }

    pub fn not_found(code: &'static str, detail: String) -> Self {
        Self::NotFound { code, detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound { .. } => AppError::NotFound {
                code: "RESOURCE_NOT_FOUND",
                detail: err.to_string(),
            },
            DataError::Db(e) => AppError::Db {
                detail: e.to_string(),
            },
        }
    }
}

impl From<BootstrapError> for AppError {
    fn from(err: BootstrapError) -> Self {
        AppError::Config {
            detail: err.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let body = ProblemDetails {
            type_: "about:blank".to_string(),
            title: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            status: status.as_u16(),
            detail: self.detail(),
            code: self.code(),
        };
        HttpResponse::build(status).json(body)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use actix_web::error::ResponseError;
    use actix_web::http::StatusCode;

    use super::AppError;

    #[test]
    fn status_codes_map_per_variant() {
        assert_eq!(
            AppError::bad_request("X", "y".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("X", "y".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal("y".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn error_response_is_problem_details_json() {
        let err = AppError::not_found("ITEM_NOT_FOUND", "item with id `1` not found".into());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["code"], "ITEM_NOT_FOUND");
        assert_eq!(json["detail"], "item with id `1` not found");
    }

    #[test]
    fn data_errors_convert_with_codes() {
        let err: AppError = data::DataError::not_found("item", 3).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
