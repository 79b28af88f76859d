use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::AttendanceError;
use validator::ValidationErrors;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// This struct enforces a consistent response structure across all endpoints:
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
///
/// Failed requests use the same envelope with `success: false`; see [`ApiError`].
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Constructs an error response with a message and default `data`.
    ///
    /// # Requires
    /// - `T` must implement `Default`, since error responses do not include useful data.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// `data` of a failed response: the stable error code.
#[derive(Debug, Serialize)]
pub struct ErrorData {
    pub code: &'static str,
}

/// A service failure rendered as an HTTP response.
///
/// | kind | status |
/// |---|---|
/// | `NotFound` | 404 |
/// | `Forbidden` | 403 |
/// | `AlreadyCheckedIn`, `Conflict` | 409 |
/// | `WindowNotOpen`, `WindowClosed`, `SessionInactive` | 422 |
/// | `InvalidCoordinates`, `ValidationFailed` | 400 |
/// | `Database` | 500, message not exposed |
#[derive(Debug)]
pub struct ApiError(pub AttendanceError);

impl From<AttendanceError> for ApiError {
    fn from(err: AttendanceError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn validation(errors: &ValidationErrors) -> Self {
        ApiError(AttendanceError::ValidationFailed(format_validation_errors(errors)))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AttendanceError::NotFound(_) => StatusCode::NOT_FOUND,
            AttendanceError::Forbidden(_) => StatusCode::FORBIDDEN,
            AttendanceError::AlreadyCheckedIn | AttendanceError::Conflict(_) => StatusCode::CONFLICT,
            AttendanceError::WindowNotOpen
            | AttendanceError::WindowClosed
            | AttendanceError::SessionInactive => StatusCode::UNPROCESSABLE_ENTITY,
            AttendanceError::InvalidCoordinates(_) | AttendanceError::ValidationFailed(_) => {
                StatusCode::BAD_REQUEST
            }
            AttendanceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            AttendanceError::Database(err) => {
                tracing::error!(error = %err, "database error while handling request");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = ApiResponse {
            success: false,
            data: ErrorData {
                code: self.0.code(),
            },
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Joins every field error message of a failed `validate()` call.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
