use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// The `{code, data?, message, error?}` body every endpoint responds with
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope<()> {
    /// Envelope without a data section
    pub fn bare(status: StatusCode, message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            code: status.as_u16(),
            data: None,
            message: message.into(),
            error,
        }
    }
}

/// Successful API response, wrapped in the envelope on the way out
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub message: String,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK with data
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::with_status(data, message, StatusCode::OK)
    }

    /// 201 Created with data
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::with_status(data, message, StatusCode::CREATED)
    }

    pub fn with_status(data: T, message: impl Into<String>, status_code: StatusCode) -> Self {
        Self {
            data: Some(data),
            message: message.into(),
            status_code,
        }
    }
}

impl ApiResponse<()> {
    /// 200 OK carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: message.into(),
            status_code: StatusCode::OK,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let envelope = Envelope {
            code: self.status_code.as_u16(),
            data: self.data,
            message: self.message,
            error: None,
        };
        (self.status_code, Json(envelope)).into_response()
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_has_code_data_message() {
        let envelope = Envelope {
            code: 201,
            data: Some(json!({ "id": "1" })),
            message: "Clothing added successfully.".to_string(),
            error: None,
        };
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "code": 201, "data": { "id": "1" }, "message": "Clothing added successfully." })
        );
    }

    #[test]
    fn bare_envelope_omits_data() {
        let envelope = Envelope::bare(StatusCode::NOT_FOUND, "Clothing not found", None);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "code": 404, "message": "Clothing not found" })
        );
    }

    #[test]
    fn response_status_matches_code() {
        let response = ApiResponse::created(json!([]), "created").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        let response = ApiResponse::message("deleted").into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
