use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::engine::DrawError;
use crate::models::ApiResponse;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("A draw is already in progress")]
    DrawInProgress,

    #[error("Draw error: {0}")]
    Draw(#[from] DrawError),
}

impl AppError {
    /// HTTP 状态码与错误码
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::DrawInProgress => (StatusCode::CONFLICT, "DRAW_IN_PROGRESS"),
            AppError::Draw(err) => {
                let status = match err {
                    DrawError::NoPrizeSelected => StatusCode::BAD_REQUEST,
                    DrawError::SessionHalted => StatusCode::SERVICE_UNAVAILABLE,
                    DrawError::UnknownPrize { .. } => StatusCode::NOT_FOUND,
                    DrawError::PrizeDepleted { .. } => StatusCode::CONFLICT,
                    DrawError::NoEligibleParticipants
                    | DrawError::InsufficientEligibleParticipants { .. }
                    | DrawError::EmptyPool
                    | DrawError::InsufficientPool { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    DrawError::DuplicateWinnerInvariantViolation { .. }
                    | DrawError::QuotaInvariantViolation { .. } => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, err.code())
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = self.status_and_code();
        let message = match self {
            AppError::ValidationError(msg) => {
                log::warn!("{self}");
                msg.clone()
            }
            AppError::Draw(err) if err.is_fatal() => {
                log::error!("Draw invariant violated: {err}");
                "Internal consistency failure; the session has been halted".to_string()
            }
            AppError::Draw(err) => {
                log::warn!("Draw rejected: {err}");
                err.to_string()
            }
            AppError::DrawInProgress => {
                log::warn!("{self}");
                self.to_string()
            }
        };

        HttpResponse::build(status_code).json(ApiResponse::<()>::error(error_code, message))
    }
}
