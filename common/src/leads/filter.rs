use crate::model::lead::{Lead, LeadStatus, Priority};

/// Client-side predicates over the fetched lead list. All set criteria must
/// hold; an empty filter keeps everything.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeadFilter {
    pub search: String,
    pub status: Option<LeadStatus>,
    pub priority: Option<Priority>,
}

impl LeadFilter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.status.is_some() || self.priority.is_some()
    }

    /// Case-insensitive substring match on client name or email, exact match
    /// on status and priority.
    pub fn matches(&self, lead: &Lead) -> bool {
        let needle = self.search.trim().to_lowercase();
        let search_ok = needle.is_empty()
            || lead.client_name.to_lowercase().contains(&needle)
            || lead.email.to_lowercase().contains(&needle);

        search_ok
            && self.status.is_none_or(|s| lead.status == s)
            && self.priority.is_none_or(|p| lead.priority == p)
    }

    pub fn apply<'a>(&self, leads: &'a [Lead]) -> Vec<&'a Lead> {
        leads.iter().filter(|lead| self.matches(lead)).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn lead(id: &str, name: &str, email: &str, status: LeadStatus) -> Lead {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "clientName": name,
            "email": email,
            "status": status.as_str(),
        }))
        .unwrap()
    }

    fn sample() -> Vec<Lead> {
        vec![
            lead("1", "John Doe", "john@acme.io", LeadStatus::New),
            lead("2", "Mary Major", "mary@globex.com", LeadStatus::Converted),
            lead("3", "Pedro Johnson", "pj@initech.com", LeadStatus::New),
            lead("4", "Wei Zhang", "wei@contoso.com", LeadStatus::Contacted),
        ]
    }

    #[test]
    fn status_filter_returns_only_that_status() {
        let leads = sample();
        let filter = LeadFilter { status: Some(LeadStatus::New), ..LeadFilter::default() };
        let hits = filter.apply(&leads);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|l| l.status == LeadStatus::New));
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_email() {
        let leads = sample();
        let filter = LeadFilter { search: "john".into(), ..LeadFilter::default() };
        let ids: Vec<_> = filter.apply(&leads).iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        let filter = LeadFilter { search: "GLOBEX".into(), ..LeadFilter::default() };
        assert_eq!(filter.apply(&leads)[0].client_name, "Mary Major");
    }

    #[test]
    fn criteria_combine() {
        let leads = sample();
        let filter = LeadFilter {
            search: "john".into(),
            status: Some(LeadStatus::Converted),
            priority: None,
        };
        assert!(filter.apply(&leads).is_empty());
        assert!(filter.is_active());
        assert!(!LeadFilter::default().is_active());
        assert_eq!(LeadFilter::default().apply(&leads).len(), 4);
    }
}
