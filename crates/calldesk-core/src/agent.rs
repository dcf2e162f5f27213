use serde::{Deserialize, Serialize};

use crate::transcript::or_default;
use crate::Timestamps;

/// A support agent listed on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub department: String,
    pub status: String,
    #[serde(default)]
    pub assigned_calls: u32,
    #[serde(default = "zero_duration")]
    pub average_call_duration: String,
    #[serde(default)]
    pub satisfaction_score: f64,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

/// Payload for registering an agent. `name` and `email` are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAgent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl NewAgent {
    /// Build the agent record, or `None` when `name` or `email` is missing.
    pub fn into_agent(self, id: String) -> Option<Agent> {
        let name = self.name.filter(|s| !s.is_empty())?;
        let email = self.email.filter(|s| !s.is_empty())?;
        Some(Agent {
            id,
            name,
            email,
            phone: or_default(self.phone, "N/A"),
            role: or_default(self.role, "Support Agent"),
            department: or_default(self.department, "Customer Support"),
            status: or_default(self.status, "active"),
            assigned_calls: 0,
            average_call_duration: zero_duration(),
            satisfaction_score: 0.0,
            timestamps: Timestamps::default(),
        })
    }
}

fn zero_duration() -> String {
    "00:00:00".to_string()
}
