use serde::{Deserialize, Serialize};

use crate::{
    ActionItem, CoverageType, Intent, LabelSet, Outcome, Resolution, Sentiment, Timestamps, Topic,
};

/// High-level description of a call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub title: String,
    pub key_topics: LabelSet<Topic>,
    pub resolution: Resolution,
    pub sentiment: Sentiment,
    pub duration: String,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<Insights>,
}

/// Structured extraction from a call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub customer_intent: Intent,
    pub action_items: LabelSet<ActionItem>,
    pub policy_details: PolicyDetails,
    pub follow_up_required: bool,
}

/// Policy fields mentioned during a call. Only fields that matched at least
/// once are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_type: Option<CoverageType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deductible: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_address: Option<String>,
}

impl PolicyDetails {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A summary as persisted, keyed by the transcript id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub call_id: String,
    #[serde(flatten)]
    pub summary: Summary,
    pub generated_at: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl SummaryRecord {
    pub fn new(
        call_id: impl Into<String>,
        summary: Summary,
        generated_at: impl Into<String>,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            summary,
            generated_at: generated_at.into(),
            timestamps: Timestamps::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_summary() -> Summary {
        Summary {
            title: "Call with Ada".into(),
            key_topics: [Topic::Roof, Topic::Weather].into_iter().collect(),
            resolution: Resolution::Resolved,
            sentiment: Sentiment::Neutral,
            duration: "00:04:10".into(),
            outcome: Outcome::Resolved,
            insights: None,
        }
    }

    #[test]
    fn record_flattens_summary_fields() {
        let mut record = SummaryRecord::new("t1", sample_summary(), "2024-01-01T00:00:00Z");
        record.timestamps.touch("2024-01-01T00:00:01Z");
        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["callId"], "t1");
        assert_eq!(v["title"], "Call with Ada");
        assert_eq!(v["keyTopics"], json!(["roof", "weather"]));
        assert_eq!(v["resolution"], "Resolved");
        assert_eq!(v["generatedAt"], "2024-01-01T00:00:00Z");
        assert_eq!(v["createdAt"], "2024-01-01T00:00:01Z");
        assert!(v.get("insights").is_none());

        let back: SummaryRecord = serde_json::from_value(v).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn policy_details_omit_unset_fields() {
        let details = PolicyDetails {
            deductible: Some("$500 deductible".into()),
            ..Default::default()
        };
        let v = serde_json::to_value(&details).unwrap();
        assert_eq!(v, json!({"deductible": "$500 deductible"}));
        assert!(PolicyDetails::default().is_empty());
        assert!(!details.is_empty());
    }

    #[test]
    fn insights_wire_shape() {
        let insights = Insights {
            customer_intent: Intent::Question,
            action_items: [ActionItem::ProcessClaim].into_iter().collect(),
            policy_details: PolicyDetails {
                coverage_type: Some(CoverageType::Dwelling),
                ..Default::default()
            },
            follow_up_required: true,
        };
        let v = serde_json::to_value(&insights).unwrap();
        assert_eq!(v["customerIntent"], "Question");
        assert_eq!(v["actionItems"], json!(["Process claim"]));
        assert_eq!(v["policyDetails"]["coverageType"], "Dwelling Coverage");
        assert_eq!(v["followUpRequired"], true);
    }
}
