use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A platform account able to own a campaign draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: Option<String>,
    pub role: String,
}

/// Payload submitted to the platform to create an emergency campaign draft.
///
/// Field names follow the platform API's camelCase wire format. `status` is
/// always `pending-review`: publishing is an admin action, never ours.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDraft {
    pub title: String,
    pub description: String,
    pub goal_amount: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_emergency: bool,
    pub category: String,
    pub status: String,
}

/// A campaign record as returned by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub goal_amount: i64,
    #[serde(default)]
    pub is_emergency: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_serializes_camel_case() {
        let now = Utc::now();
        let draft = CampaignDraft {
            title: "t".to_string(),
            description: "d".to_string(),
            goal_amount: 500_000,
            start_date: now,
            end_date: now,
            is_emergency: true,
            category: "Emergency Relief".to_string(),
            status: "pending-review".to_string(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["goalAmount"], 500_000);
        assert_eq!(json["isEmergency"], true);
        assert!(json["startDate"].is_string());
    }

    #[test]
    fn campaign_deserializes_with_missing_optional_fields() {
        let campaign: Campaign =
            serde_json::from_str(r#"{"id": "c1", "title": "Flood Relief"}"#).unwrap();
        assert_eq!(campaign.id, "c1");
        assert_eq!(campaign.goal_amount, 0);
        assert!(!campaign.is_emergency);
        assert!(campaign.category.is_none());
    }
}
