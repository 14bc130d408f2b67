use uuid::Uuid;

use crate::error::ApiError;

/// Ids that do not parse as a UUID cannot name any item
pub fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::clothing_not_found())
}

/// Required query parameter: absent and empty are both rejected
pub fn required_param(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::missing_query_param(name))
}

pub fn validate_quantity(quantity: i64) -> Result<i64, ApiError> {
    if quantity < 0 {
        return Err(ApiError::bad_request(
            "Bad Request: `quantity` must be a non-negative integer.",
        ));
    }
    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn malformed_ids_are_not_found() {
        let err = parse_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(parse_id("6f1c2a52-8a4e-4a53-9d39-1f0a0c6b9e11").is_ok());
    }

    #[test]
    fn required_param_rejects_empty() {
        assert_eq!(required_param(Some("Red".into()), "color").unwrap(), "Red");
        assert_eq!(
            required_param(Some(String::new()), "color").unwrap_err().message(),
            "Warning `color` query parameter is required."
        );
        assert!(required_param(None, "size").is_err());
    }

    #[test]
    fn negative_quantities_are_rejected() {
        assert_eq!(validate_quantity(0).unwrap(), 0);
        assert_eq!(validate_quantity(-1).unwrap_err().status_code(), StatusCode::BAD_REQUEST);
    }
}
