use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::model::null_as_default;
use crate::requests::LeadDraft;

/// Server verdict for one CSV row.
///
/// `data` stays raw JSON: invalid rows carry whatever the file held (unknown
/// priorities, text in numeric columns) and must still render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRow {
    #[serde(alias = "row")]
    pub row_number: usize,
    #[serde(alias = "isValid")]
    pub valid: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<String>,
    #[serde(default)]
    pub data: Value,
}

impl PreviewRow {
    fn text(&self, key: &str) -> String {
        match self.data.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    pub fn client_name(&self) -> String {
        self.text("clientName")
    }

    pub fn email(&self) -> String {
        self.text("email")
    }

    /// Typed payload of the row. Only meaningful for rows the server accepted.
    pub fn draft(&self) -> Result<LeadDraft, ApiError> {
        serde_json::from_value(self.data.clone()).map_err(|err| {
            ApiError::Decode(format!("row {}: {err}", self.row_number))
        })
    }
}

/// Result of the server-side preview/validation step of a CSV import.
/// The client never parses or validates CSV itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvPreview {
    #[serde(alias = "preview")]
    pub rows: Vec<PreviewRow>,
}

impl CsvPreview {
    pub fn valid_count(&self) -> usize {
        self.rows.iter().filter(|r| r.valid).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.rows.len() - self.valid_count()
    }

    /// Payloads of the rows the server marked valid, in file order.
    pub fn valid_leads(&self) -> Result<Vec<LeadDraft>, ApiError> {
        self.rows.iter().filter(|r| r.valid).map(PreviewRow::draft).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportSummary {
    #[serde(alias = "importedCount")]
    pub imported: usize,
    #[serde(alias = "failedCount")]
    pub failed: usize,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode;

    #[test]
    fn malformed_invalid_rows_still_decode() {
        let body = r#"{"data":{"preview":[
            {"row":2,"isValid":true,"data":{"clientName":"John Doe","email":"john@acme.io","priority":"high"}},
            {"row":3,"isValid":false,"errors":["Invalid priority"],"data":{"clientName":"Bad","priority":"critical","estimatedValue":"lots"}},
            {"row":4,"isValid":true,"data":{"clientName":"Mary Major","email":"mary@globex.com","estimatedValue":900}}
        ]}}"#;
        let preview: CsvPreview = decode(body).unwrap();

        assert_eq!(preview.valid_count(), 2);
        assert_eq!(preview.rows[1].client_name(), "Bad");
        assert_eq!(preview.rows[1].email(), "");
        assert!(preview.rows[1].draft().is_err());

        let names: Vec<_> = preview
            .valid_leads()
            .unwrap()
            .into_iter()
            .map(|l| l.client_name)
            .collect();
        assert_eq!(names, vec!["John Doe", "Mary Major"]);
    }
}
