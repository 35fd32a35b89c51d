use statx_model::{ErrorResponse, ExportError, ExportRequest};

#[test]
fn non_integer_year_is_rejected_at_parse_time() {
    let parsed = serde_json::from_str::<ExportRequest>(
        r#"{"options": [{"dataset_name": "a.parquet", "year": "2021", "variables": ["10"]}]}"#,
    );
    assert!(parsed.is_err());
}

#[test]
fn missing_option_list_is_a_parse_error() {
    assert!(serde_json::from_str::<ExportRequest>("{}").is_err());
}

#[test]
fn error_detail_carries_the_message() {
    let error = ExportError::dataset_not_found("absent.parquet");
    let body = serde_json::to_value(ErrorResponse::new(error.to_string())).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"detail": "dataset 'absent.parquet' does not exist"})
    );
}
