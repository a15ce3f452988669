use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tripbook_core::CommandError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
}

impl AppError {
    pub fn from_command(err: CommandError) -> Self {
        match err {
            CommandError::Validation(e) => AppError::ValidationError(e.to_string()),
            // Handlers address bookings by id, so a store error means the id is stale
            CommandError::Store(e) => AppError::NotFoundError(e.to_string()),
        }
    }

    pub fn session_expired() -> Self {
        AppError::NotFoundError("Session expired".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripbook_core::{StoreError, ValidationError};
    use uuid::Uuid;

    #[test]
    fn test_command_errors_map_to_status() {
        let invalid = AppError::from_command(CommandError::Validation(ValidationError::TitleRequired));
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let stale = AppError::from_command(CommandError::Store(StoreError::NotFound(Uuid::new_v4())));
        assert_eq!(stale.into_response().status(), StatusCode::NOT_FOUND);
    }
}
