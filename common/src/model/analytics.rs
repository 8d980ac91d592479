use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::lead::LeadStatus;
use crate::model::null_as_default;

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadStats {
    #[serde(alias = "totalLeads")]
    pub total: u64,
    #[serde(deserialize_with = "fold_statuses")]
    pub by_status: BTreeMap<LeadStatus, u64>,
    pub conversion_rate: f64,
    #[serde(alias = "totalValue")]
    pub pipeline_value: f64,
}

impl LeadStats {
    pub fn count(&self, status: LeadStatus) -> u64 {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Per-status counts keyed by canonical status. Counts reported under an
/// alternate name are added to the canonical one; unknown names are dropped.
fn fold_statuses<'de, D>(deserializer: D) -> Result<BTreeMap<LeadStatus, u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, u64>>::deserialize(deserializer)?.unwrap_or_default();
    let mut folded = BTreeMap::new();
    for (name, count) in raw {
        if let Ok(status) = name.parse::<LeadStatus>() {
            *folded.entry(status).or_insert(0) += count;
        }
    }
    Ok(folded)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflowPoint {
    #[serde(alias = "_id")]
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceShare {
    #[serde(alias = "_id")]
    pub source: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPerformance {
    #[serde(alias = "userName", alias = "member")]
    pub name: String,
    #[serde(default, alias = "totalLeads", deserialize_with = "null_as_default")]
    pub assigned: u64,
    #[serde(default, alias = "convertedLeads", deserialize_with = "null_as_default")]
    pub converted: u64,
}

impl TeamPerformance {
    /// Conversion rate in percent, 0 when nothing is assigned.
    pub fn conversion_rate(&self) -> f64 {
        if self.assigned == 0 {
            0.0
        } else {
            self.converted as f64 * 100.0 / self.assigned as f64
        }
    }
}

/// Bar lengths in percent of the largest value. All zeros when the series is
/// empty or has no positive value.
pub fn bar_percentages(values: &[u64]) -> Vec<f64> {
    let max = values.iter().copied().max().unwrap_or(0);
    values
        .iter()
        .map(|&v| if max == 0 { 0.0 } else { v as f64 * 100.0 / max as f64 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bars_scale_against_the_maximum() {
        assert_eq!(bar_percentages(&[5, 10, 0]), vec![50.0, 100.0, 0.0]);
        assert_eq!(bar_percentages(&[0, 0]), vec![0.0, 0.0]);
        assert!(bar_percentages(&[]).is_empty());
    }

    #[test]
    fn decodes_aggregation_rows() {
        let sources: Vec<SourceShare> =
            serde_json::from_value(json!([{ "_id": "website", "count": 4 }])).unwrap();
        assert_eq!(sources[0].source, "website");

        let stats: LeadStats = serde_json::from_value(json!({
            "totalLeads": 12,
            "byStatus": { "new": 7, "converted": 2 },
            "conversionRate": 16.6
        }))
        .unwrap();
        assert_eq!(stats.total, 12);
        assert_eq!(stats.count(LeadStatus::Converted), 2);
        assert_eq!(stats.count(LeadStatus::Contacted), 0);
    }

    #[test]
    fn alternate_status_names_count_toward_canonical_cards() {
        let stats: LeadStats = serde_json::from_value(json!({
            "byStatus": { "won": 3, "converted": 1, "lost": 2, "archived": 1, "qualified": 4, "mystery": 9 }
        }))
        .unwrap();
        assert_eq!(stats.count(LeadStatus::Converted), 4);
        assert_eq!(stats.count(LeadStatus::NotInterested), 3);
        assert_eq!(stats.count(LeadStatus::Interested), 4);
        assert_eq!(stats.by_status.values().sum::<u64>(), 11);
    }

    #[test]
    fn team_conversion_rate_handles_empty_rows() {
        let row = TeamPerformance { name: "Ana".into(), assigned: 4, converted: 1 };
        assert_eq!(row.conversion_rate(), 25.0);
        let idle = TeamPerformance { name: "Bo".into(), assigned: 0, converted: 0 };
        assert_eq!(idle.conversion_rate(), 0.0);
    }
}
