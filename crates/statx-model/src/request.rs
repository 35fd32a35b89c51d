//! Export request types.
//!
//! Field aliases accept the payload shape used by existing clients
//! (`lua_chon_xuat`, `file_phan_tich`, `nam`, `bien_can_xuat`).

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

/// One requested (dataset, year, variables) combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOption {
    /// Dataset file name, relative to the data root.
    #[serde(alias = "file_phan_tich")]
    pub dataset_name: String,
    #[serde(alias = "nam")]
    pub year: i64,
    /// Variable codes; each one yields exactly one sheet.
    #[serde(alias = "bien_can_xuat")]
    pub variables: Vec<String>,
}

impl ExportOption {
    pub fn new(
        dataset_name: impl Into<String>,
        year: i64,
        variables: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            year,
            variables: variables.into_iter().map(Into::into).collect(),
        }
    }

    /// String form of the year used for row matching and sheet names.
    pub fn year_key(&self) -> String {
        self.year.to_string()
    }
}

/// Ordered list of export options; order defines sheet precedence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(alias = "lua_chon_xuat")]
    pub options: Vec<ExportOption>,
}

impl ExportRequest {
    pub fn new(options: Vec<ExportOption>) -> Self {
        Self { options }
    }

    /// Total number of sheets a fully populated request produces.
    pub fn expected_sheet_count(&self) -> usize {
        self.options.iter().map(|option| option.variables.len()).sum()
    }

    /// Check the structural invariants of the request.
    pub fn validate(&self) -> Result<()> {
        if self.options.is_empty() {
            return Err(ExportError::InvalidRequest(
                "at least one export option is required".to_string(),
            ));
        }
        for (idx, option) in self.options.iter().enumerate() {
            if option.dataset_name.trim().is_empty() {
                return Err(ExportError::InvalidRequest(format!(
                    "option {idx}: dataset name is empty"
                )));
            }
            if option.variables.is_empty() {
                return Err(ExportError::InvalidRequest(format!(
                    "option {idx} ({}): variable list is empty",
                    option.dataset_name
                )));
            }
            if option.variables.iter().any(|v| v.trim().is_empty()) {
                return Err(ExportError::InvalidRequest(format!(
                    "option {idx} ({}): variable codes must not be blank",
                    option.dataset_name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_field_names() {
        let json = r#"{
            "lua_chon_xuat": [
                {"file_phan_tich": "motor_AC12_2020.parquet", "nam": 2020, "bien_can_xuat": ["10", "11"]}
            ]
        }"#;
        let request: ExportRequest = serde_json::from_str(json).expect("parse request");
        assert_eq!(request.options.len(), 1);
        assert_eq!(request.options[0].dataset_name, "motor_AC12_2020.parquet");
        assert_eq!(request.options[0].year, 2020);
        assert_eq!(request.expected_sheet_count(), 2);
    }

    #[test]
    fn accepts_canonical_field_names() {
        let json = r#"{"options": [{"dataset_name": "A.parquet", "year": 2021, "variables": ["7"]}]}"#;
        let request: ExportRequest = serde_json::from_str(json).expect("parse request");
        assert_eq!(request.options[0], ExportOption::new("A.parquet", 2021, ["7"]));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn rejects_empty_variables() {
        let request = ExportRequest::new(vec![ExportOption::new(
            "A.parquet",
            2020,
            Vec::<String>::new(),
        )]);
        let error = request.validate().unwrap_err();
        assert!(matches!(error, ExportError::InvalidRequest(_)));
    }

    #[test]
    fn rejects_blank_dataset_and_empty_request() {
        assert!(ExportRequest::default().validate().is_err());
        let request = ExportRequest::new(vec![ExportOption::new("  ", 2020, ["1"])]);
        assert!(request.validate().is_err());
    }
}
