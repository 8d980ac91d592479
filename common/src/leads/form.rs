use crate::api::Mutation;
use crate::error::ApiError;
use crate::model::lead::{LeadCategory, LeadSource, Priority};
use crate::requests::LeadDraft;

/// Raw inputs of the create-lead form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeadForm {
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub category: LeadCategory,
    pub priority: Priority,
    pub estimated_value: String,
    pub source: LeadSource,
    pub description: String,
    pub inquiry_message: String,
    pub expected_close_date: String,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl LeadForm {
    pub fn to_draft(&self) -> Result<LeadDraft, ApiError> {
        let estimated_value = match self.estimated_value.trim() {
            "" => 0.0,
            raw => raw
                .replace(',', "")
                .parse::<f64>()
                .map_err(|_| ApiError::Validation(format!("'{raw}' is not a number")))?,
        };
        let draft = LeadDraft {
            client_name: self.client_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            category: self.category,
            priority: self.priority,
            estimated_value,
            source: self.source,
            description: non_empty(&self.description),
            inquiry_message: non_empty(&self.inquiry_message),
            expected_close_date: non_empty(&self.expected_close_date),
        };
        draft.validate()?;
        Ok(draft)
    }

    pub fn submit(&self) -> Result<Mutation, ApiError> {
        self.to_draft().map(Mutation::CreateLead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_trimmed_draft() {
        let form = LeadForm {
            client_name: " John Doe ".into(),
            email: "john@acme.io".into(),
            estimated_value: "12,500.50".into(),
            description: "  ".into(),
            ..LeadForm::default()
        };
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.client_name, "John Doe");
        assert_eq!(draft.estimated_value, 12500.5);
        assert_eq!(draft.description, None);
    }

    #[test]
    fn rejects_bad_numbers_and_missing_fields() {
        let form = LeadForm {
            client_name: "John".into(),
            email: "john@acme.io".into(),
            estimated_value: "lots".into(),
            ..LeadForm::default()
        };
        assert!(form.submit().is_err());
        assert!(LeadForm::default().submit().is_err());
    }
}
