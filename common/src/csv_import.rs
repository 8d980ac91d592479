//! Two-phase CSV import: server preview, then confirmation of the valid rows.

use crate::api::Mutation;
use crate::error::ApiError;
use crate::model::import::{CsvPreview, ImportSummary};
use crate::requests::ImportLeads;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ImportStage {
    #[default]
    Idle,
    Uploading,
    Previewed(CsvPreview),
    Importing(CsvPreview),
    Done(ImportSummary),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CsvImport {
    stage: ImportStage,
    error: Option<String>,
}

impl CsvImport {
    pub fn stage(&self) -> &ImportStage {
        &self.stage
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn begin_upload(&mut self) {
        self.stage = ImportStage::Uploading;
        self.error = None;
    }

    pub fn previewed(&mut self, preview: CsvPreview) {
        self.stage = ImportStage::Previewed(preview);
    }

    /// Confirmation step. Submits only the rows the server marked valid.
    pub fn confirm(&mut self) -> Result<Mutation, ApiError> {
        let ImportStage::Previewed(preview) = &self.stage else {
            return Err(ApiError::Validation("Upload a file to preview first".into()));
        };
        let leads = preview.valid_leads()?;
        if leads.is_empty() {
            return Err(ApiError::Validation("There are no valid rows to import".into()));
        }
        self.stage = ImportStage::Importing(preview.clone());
        self.error = None;
        Ok(Mutation::ImportLeads(ImportLeads { leads }))
    }

    pub fn finished(&mut self, summary: ImportSummary) {
        self.stage = ImportStage::Done(summary);
    }

    /// A failed upload goes back to idle; a failed import keeps the preview
    /// so the user can retry the confirmation.
    pub fn failed(&mut self, err: &ApiError) {
        self.stage = match std::mem::take(&mut self.stage) {
            ImportStage::Importing(preview) | ImportStage::Previewed(preview) => {
                ImportStage::Previewed(preview)
            }
            _ => ImportStage::Idle,
        };
        self.error = Some(err.user_message());
    }

    pub fn reset(&mut self) {
        *self = CsvImport::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn preview() -> CsvPreview {
        serde_json::from_value(json!({
            "rows": [
                { "rowNumber": 2, "valid": true, "data": { "clientName": "John Doe", "email": "john@acme.io" } },
                { "rowNumber": 3, "valid": false, "errors": ["Invalid email"], "data": { "clientName": "Bad", "email": "nope" } },
                { "rowNumber": 4, "valid": true, "data": { "clientName": "Mary Major", "email": "mary@globex.com" } }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn confirm_submits_only_valid_rows() {
        let mut import = CsvImport::default();
        import.begin_upload();
        import.previewed(preview());

        let Mutation::ImportLeads(body) = import.confirm().unwrap() else {
            panic!("expected an import call");
        };
        let names: Vec<_> = body.leads.iter().map(|l| l.client_name.as_str()).collect();
        assert_eq!(names, vec!["John Doe", "Mary Major"]);
        assert!(matches!(import.stage(), ImportStage::Importing(_)));
    }

    #[test]
    fn invalid_rows_with_unreadable_fields_are_left_out() {
        let preview: CsvPreview = serde_json::from_value(json!({
            "preview": [
                { "row": 2, "isValid": true, "data": { "clientName": "John Doe", "email": "john@acme.io" } },
                { "row": 3, "isValid": false, "errors": ["Unknown priority"],
                  "data": { "clientName": "Bad", "priority": "critical", "estimatedValue": "lots" } },
                { "row": 4, "isValid": true, "data": { "clientName": "Mary Major", "email": "mary@globex.com" } }
            ]
        }))
        .unwrap();
        let mut import = CsvImport::default();
        import.begin_upload();
        import.previewed(preview);

        let Mutation::ImportLeads(body) = import.confirm().unwrap() else {
            panic!("expected an import call");
        };
        assert_eq!(body.leads.len(), 2);
        assert!(body.leads.iter().all(|l| l.client_name != "Bad"));
    }

    #[test]
    fn confirm_without_valid_rows_sends_nothing() {
        let mut import = CsvImport::default();
        assert!(import.confirm().is_err());

        let mut all_bad = preview();
        all_bad.rows.retain(|r| !r.valid);
        import.previewed(all_bad);
        assert!(import.confirm().is_err());
    }

    #[test]
    fn failed_import_keeps_the_preview() {
        let mut import = CsvImport::default();
        import.previewed(preview());
        import.confirm().unwrap();
        import.failed(&ApiError::Server { status: 500, message: None });

        assert!(matches!(import.stage(), ImportStage::Previewed(p) if p.valid_count() == 2));
        assert!(import.error().is_some());

        import.begin_upload();
        import.failed(&ApiError::Network("offline".into()));
        assert_eq!(import.stage(), &ImportStage::Idle);
    }

    #[test]
    fn reset_after_import_allows_a_fresh_upload() {
        let mut import = CsvImport::default();
        import.previewed(preview());
        import.confirm().unwrap();
        import.finished(ImportSummary { imported: 2, failed: 0, errors: vec![] });

        import.reset();
        assert_eq!(import.stage(), &ImportStage::Idle);
        assert!(import.error().is_none());

        import.begin_upload();
        import.previewed(preview());
        assert!(matches!(import.stage(), ImportStage::Previewed(_)));
    }
}
