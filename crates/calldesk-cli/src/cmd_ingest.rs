use std::path::Path;

use anyhow::Context;
use calldesk_core::{NewTranscript, SummaryRecord, Transcript};
use calldesk_store::Store;
use serde_json::Value;

/// `calldesk ingest <file> [--json]`
pub fn execute(data_dir: &Path, file: &Path, json: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    let store = Store::open(data_dir)?;
    let ingested = ingest(&store, value)?;

    if json {
        let transcripts: Vec<&Transcript> = ingested.iter().map(|(t, _)| t).collect();
        println!("{}", serde_json::to_string_pretty(&transcripts)?);
    } else {
        for (t, record) in &ingested {
            println!(
                "{}  {}  {} messages  {}",
                t.id, t.customer_name, t.message_count, record.summary.outcome
            );
        }
        println!("Ingested {} transcript(s)", ingested.len());
    }
    Ok(())
}

/// Store each transcript in `value` (one object or an array of them) and
/// write its initial summary before moving on. Stops at the first invalid
/// entry; entries before it stay stored.
pub(crate) fn ingest(
    store: &Store,
    value: Value,
) -> anyhow::Result<Vec<(Transcript, SummaryRecord)>> {
    let items = match value {
        Value::Array(items) => items,
        other @ Value::Object(_) => vec![other],
        _ => anyhow::bail!("expected a transcript object or an array of transcripts"),
    };

    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let pair = ingest_one(store, item).with_context(|| format!("entry {index}"))?;
        out.push(pair);
    }
    Ok(out)
}

fn ingest_one(store: &Store, item: Value) -> anyhow::Result<(Transcript, SummaryRecord)> {
    let transcript = build_transcript(item, calldesk_core::new_id)?;
    let transcript = store.save_transcript(transcript)?;
    let summary = calldesk_insight::generate_summary(&transcript);
    let record = SummaryRecord::new(&transcript.id, summary, calldesk_core::now_rfc3339());
    let record = store.save_summary(&transcript.id, record)?;
    tracing::debug!(id = %transcript.id, "ingested");
    Ok((transcript, record))
}

/// Keys `build_transcript` maps onto `Transcript` fields; everything else in
/// an input object is kept in `extra`.
const TRANSCRIPT_KEYS: &[&str] = &[
    "id",
    "messages",
    "customerName",
    "customerPhone",
    "customerEmail",
    "agentName",
    "agentId",
    "duration",
    "transferredToAgent",
    "callStartTime",
    "wordCount",
    "messageCount",
    "createdAt",
    "updatedAt",
];

/// Turn one input object into a transcript ready to store. Generator-style
/// objects are normalized first. A string `id` is kept (the store rejects
/// unsafe ones); otherwise `fallback_id` supplies one. A `createdAt` in the
/// input survives.
pub(crate) fn build_transcript(
    item: Value,
    fallback_id: impl FnOnce() -> String,
) -> anyhow::Result<Transcript> {
    let item = if calldesk_core::is_legacy(&item) {
        calldesk_core::normalize_legacy(item)
    } else {
        item
    };
    let Value::Object(fields) = &item else {
        anyhow::bail!("expected a transcript object");
    };

    let id = match fields.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => fallback_id(),
    };
    let created_at = fields
        .get("createdAt")
        .and_then(Value::as_str)
        .map(str::to_string);
    let extra: serde_json::Map<String, Value> = fields
        .iter()
        .filter(|(k, _)| !TRANSCRIPT_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let payload: NewTranscript = serde_json::from_value(item)?;
    if !payload.has_messages() {
        anyhow::bail!("Messages array is required");
    }
    let mut transcript = payload.into_transcript(id, &calldesk_core::now_rfc3339());
    transcript.timestamps.created_at = created_at;
    transcript.extra = extra;
    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calldesk_core::{Outcome, Resolution};
    use serde_json::json;

    fn store() -> (tempfile::TempDir, Store) {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path()).unwrap();
        (tmp, store)
    }

    #[test]
    fn ingest_single_object_keeps_given_id() {
        let (_tmp, store) = store();
        let value = json!({
            "id": "call-001",
            "customerName": "Dana Lee",
            "transferredToAgent": true,
            "messages": [{"sender": "Customer", "text": "Please transfer me"}]
        });
        let out = ingest(&store, value).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].0.id, "call-001");

        let record = store.get_summary("call-001").unwrap().unwrap();
        assert_eq!(record.summary.outcome, Outcome::TransferredToAgent);
        assert_eq!(record.summary.resolution, Resolution::TransferredToHumanAgent);
        assert!(record.summary.insights.is_none());
    }

    #[test]
    fn ingest_array_assigns_fresh_ids() {
        let (_tmp, store) = store();
        let value = json!([
            {"messages": [{"sender": "Customer", "text": "hello"}]},
            {"messages": []}
        ]);
        let out = ingest(&store, value).unwrap();
        assert_eq!(out.len(), 2);
        assert_ne!(out[0].0.id, out[1].0.id);
        assert_eq!(store.list_transcripts().unwrap().len(), 2);
        assert_eq!(store.list_summaries().unwrap().len(), 2);
    }

    #[test]
    fn entry_without_messages_is_rejected() {
        let (_tmp, store) = store();
        let err = ingest(&store, json!([{"customerName": "Nobody"}])).unwrap_err();
        assert!(format!("{err:#}").contains("Messages array is required"));
        assert!(store.list_transcripts().unwrap().is_empty());
    }

    #[test]
    fn unsafe_id_is_rejected() {
        let (_tmp, store) = store();
        let value = json!({"id": "../escape", "messages": []});
        assert!(ingest(&store, value).is_err());
    }

    #[test]
    fn generator_output_is_normalized() {
        let (_tmp, store) = store();
        let value = json!({
            "id": "gen-1",
            "customer": {"name": "Harriet Cole", "address": "3 Mill Lane"},
            "callDuration": 90,
            "callStatus": "transferred",
            "callDate": "2024-03-09T14:20:00Z",
            "messages": [
                {"speaker": "customer", "text": "My roof is leaking"},
                {"speaker": "agent", "text": "I will transfer you now"}
            ]
        });
        let out = ingest(&store, value).unwrap();
        let (t, record) = &out[0];
        assert_eq!(t.customer_name, "Harriet Cole");
        assert_eq!(t.customer_phone, "N/A");
        assert_eq!(t.duration.as_deref(), Some("00:01:30"));
        assert!(t.transferred_to_agent);
        assert_eq!(t.messages[0].sender, "Customer");
        assert_eq!(t.call_start_time.as_deref(), Some("2024-03-09T14:20:00Z"));
        assert_eq!(t.timestamps.created_at.as_deref(), Some("2024-03-09T14:20:00Z"));
        assert_eq!(t.extra.get("customerAddress"), Some(&json!("3 Mill Lane")));

        assert_eq!(record.summary.title, "Call with Harriet Cole");
        assert_eq!(record.summary.outcome, Outcome::TransferredToAgent);

        let stored = store.get_transcript("gen-1").unwrap().unwrap();
        assert_eq!(stored.extra.get("customerAddress"), Some(&json!("3 Mill Lane")));
    }

    #[test]
    fn scalar_input_is_rejected() {
        let (_tmp, store) = store();
        assert!(ingest(&store, json!("transcript")).is_err());
    }
}
