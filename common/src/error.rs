use actix_web::{http::StatusCode, HttpResponse};
use validator::ValidationErrors;

#[derive(Debug)]
pub struct ServiceError {
    err: anyhow::Error,
    code: StatusCode,
    issues: Option<serde_json::Value>,
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "ServiceError: {}", self.err)
    }
}

pub trait AddCode {
    fn code(self, code: u16) -> ServiceError;
}

impl AddCode for anyhow::Error {
    fn code(self, code: u16) -> ServiceError {
        ServiceError {
            err: self,
            code: StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            issues: None,
        }
    }
}

impl<E: Into<anyhow::Error>> From<E> for ServiceError {
    fn from(err: E) -> ServiceError {
        ServiceError {
            err: err.into(),
            code: StatusCode::INTERNAL_SERVER_ERROR,
            issues: None,
        }
    }
}

impl ServiceError {
    /// Wraps the violated constraints so they end up as the 422 body.
    pub fn validation(errors: ValidationErrors) -> Self {
        let issues = serde_json::to_value(&errors).unwrap_or(serde_json::Value::Null);
        ServiceError {
            err: anyhow::anyhow!("Invalid request body"),
            code: StatusCode::UNPROCESSABLE_ENTITY,
            issues: Some(issues),
        }
    }
}

impl actix_web::error::ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        self.code
    }

    fn error_response(&self) -> HttpResponse {
        if self.code == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("{}", self.err);
        }
        match &self.issues {
            Some(issues) => HttpResponse::build(self.code).json(issues),
            None => HttpResponse::build(self.code).finish(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
