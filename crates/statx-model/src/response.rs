//! Wire payloads returned by the export service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const EXPORT_SUCCESS_MESSAGE: &str = "Excel file created successfully.";

/// Body returned when an export job commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResponse {
    pub status: String,
    pub message: String,
    pub file_id: String,
}

impl ExportResponse {
    pub fn success(id: Uuid) -> Self {
        Self {
            status: "success".to_string(),
            message: EXPORT_SUCCESS_MESSAGE.to_string(),
            file_id: id.to_string(),
        }
    }
}

/// Body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_payload_shape() {
        let id = Uuid::parse_str("0b7c6f4e-2a4d-4f55-9a4e-8a3c9f1d2e10").unwrap();
        insta::assert_json_snapshot!(ExportResponse::success(id), @r#"
        {
          "status": "success",
          "message": "Excel file created successfully.",
          "file_id": "0b7c6f4e-2a4d-4f55-9a4e-8a3c9f1d2e10"
        }
        "#);
    }
}
