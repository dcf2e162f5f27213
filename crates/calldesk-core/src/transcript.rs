use serde::{Deserialize, Deserializer, Serialize};

use crate::Timestamps;

/// One speaker-tagged utterance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    #[serde(default = "unknown", alias = "speaker", deserialize_with = "lenient_unknown")]
    pub sender: String,
    /// Missing, `null` or non-string text decodes to `""` so a malformed
    /// message contributes no matches instead of failing the whole call.
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: String,
}

impl Message {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            timestamp: String::new(),
        }
    }
}

/// A stored call transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<Message>,
    #[serde(default = "unknown", deserialize_with = "lenient_unknown")]
    pub customer_name: String,
    #[serde(default = "not_available", deserialize_with = "lenient_not_available")]
    pub customer_phone: String,
    #[serde(default = "not_available", deserialize_with = "lenient_not_available")]
    pub customer_email: String,
    #[serde(default = "default_agent_name", deserialize_with = "lenient_agent_name")]
    pub agent_name: String,
    #[serde(default = "default_agent_id", deserialize_with = "lenient_agent_id")]
    pub agent_id: String,
    #[serde(
        default,
        deserialize_with = "duration_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub transferred_to_agent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_start_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub word_count: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message_count: usize,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    /// Fields written by other tools (normalizers, generators) survive a
    /// read/write cycle untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Transcript {
    /// Sum of whitespace-separated tokens across all message texts.
    pub fn count_words(messages: &[Message]) -> usize {
        messages.iter().map(|m| m.text.split_whitespace().count()).sum()
    }
}

/// Payload accepted when a call source submits a transcript.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTranscript {
    #[serde(default)]
    pub messages: Option<Vec<Message>>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default, deserialize_with = "duration_text")]
    pub duration: Option<String>,
    #[serde(default)]
    pub transferred_to_agent: Option<bool>,
    #[serde(default)]
    pub call_start_time: Option<String>,
}

impl NewTranscript {
    pub fn has_messages(&self) -> bool {
        self.messages.is_some()
    }

    /// Apply acceptance defaults and derive counts. Empty strings count as
    /// absent, matching how call sources leave fields blank.
    pub fn into_transcript(self, id: String, now: &str) -> Transcript {
        let messages = self.messages.unwrap_or_default();
        let word_count = Transcript::count_words(&messages);
        let message_count = messages.len();
        Transcript {
            id,
            messages,
            customer_name: or_default(self.customer_name, "Unknown"),
            customer_phone: or_default(self.customer_phone, "N/A"),
            customer_email: or_default(self.customer_email, "N/A"),
            agent_name: or_default(self.agent_name, "Voice Bot"),
            agent_id: or_default(self.agent_id, "bot-001"),
            duration: Some(or_default(self.duration, "00:00:00")),
            transferred_to_agent: self.transferred_to_agent.unwrap_or(false),
            call_start_time: Some(or_default(self.call_start_time, now)),
            word_count,
            message_count,
            timestamps: Timestamps::default(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Seconds as `HH:MM:SS`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// `None` and `""` both take `default`.
pub(crate) fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

fn unknown() -> String {
    "Unknown".to_string()
}

fn not_available() -> String {
    "N/A".to_string()
}

fn default_agent_name() -> String {
    "Voice Bot".to_string()
}

fn default_agent_id() -> String {
    "bot-001".to_string()
}

// ── Lenient decoders: `null` decodes like a missing key ──

fn string_or<'de, D>(d: D, default: fn() -> String) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => s,
        _ => default(),
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    string_or(d, String::new)
}

fn lenient_unknown<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    string_or(d, unknown)
}

fn lenient_not_available<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    string_or(d, not_available)
}

fn lenient_agent_name<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    string_or(d, default_agent_name)
}

fn lenient_agent_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    string_or(d, default_agent_id)
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(matches!(
        serde_json::Value::deserialize(d)?,
        serde_json::Value::Bool(true)
    ))
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Duration arrives either as free text or as a number of seconds.
fn duration_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = serde_json::Value::deserialize(d)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .map(format_duration),
        _ => None,
    })
}
