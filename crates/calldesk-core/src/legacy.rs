//! Generator-style transcripts.
//!
//! Transcript generators and older exports nest contact details under
//! `customer`, report `callDuration` in seconds, flag transfers through
//! `callStatus`, date the call with `callDate`, and tag messages with a
//! lower-case `speaker`. [`normalize_legacy`] rewrites that shape into the one
//! `NewTranscript` accepts.

use serde_json::{Map, Value};

use crate::transcript::format_duration;

const LEGACY_MARKERS: &[&str] = &["customer", "callDuration", "callStatus", "callDate"];

/// Objects without `customerName` that carry any generator field.
pub fn is_legacy(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    !obj.contains_key("customerName") && LEGACY_MARKERS.iter().any(|k| obj.contains_key(*k))
}

/// Rewrite a generator-style object. Fields it does not know are carried over
/// unchanged; non-objects are returned as given.
pub fn normalize_legacy(value: Value) -> Value {
    let Value::Object(mut src) = value else {
        return value;
    };
    let customer = match src.remove("customer") {
        Some(Value::Object(c)) => c,
        _ => Map::new(),
    };

    let mut out = Map::new();
    if let Some(id) = src.remove("id") {
        out.insert("id".into(), id);
    }
    for (from, to) in [
        ("name", "customerName"),
        ("phone", "customerPhone"),
        ("email", "customerEmail"),
        ("address", "customerAddress"),
        ("postcode", "customerPostcode"),
        ("policyNumber", "policyNumber"),
    ] {
        if let Some(v) = customer.get(from).filter(|v| v.is_string()) {
            out.insert(to.into(), v.clone());
        }
    }

    let seconds = src
        .remove("callDuration")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    out.insert("duration".into(), format_duration(seconds).into());

    let transferred = src
        .remove("callStatus")
        .is_some_and(|v| v.as_str() == Some("transferred"));
    out.insert("transferredToAgent".into(), transferred.into());

    if let Some(date) = src.remove("callDate").filter(Value::is_string) {
        out.insert("callStartTime".into(), date.clone());
        out.insert("createdAt".into(), date);
    }

    let messages = match src.remove("messages") {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };
    out.insert(
        "messages".into(),
        Value::Array(messages.into_iter().map(normalize_message).collect()),
    );

    for (key, value) in src {
        out.entry(key).or_insert(value);
    }
    Value::Object(out)
}

/// `speaker: "customer" | "agent"` becomes `sender: "Customer" | "Agent"`;
/// any other speaker is `"Unknown"`.
fn normalize_message(msg: Value) -> Value {
    let mut m = match msg {
        Value::Object(m) => m,
        _ => Map::new(),
    };
    if !m.get("sender").is_some_and(Value::is_string) {
        let sender = match m.remove("speaker").as_ref().and_then(Value::as_str) {
            Some(s) if s.eq_ignore_ascii_case("customer") => "Customer",
            Some(s) if s.eq_ignore_ascii_case("agent") => "Agent",
            _ => "Unknown",
        };
        m.insert("sender".into(), sender.into());
    }
    Value::Object(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn generated() -> Value {
        json!({
            "id": "gen-17",
            "customer": {
                "name": "Harriet Cole",
                "phone": "+44 7700 900456",
                "email": "harriet@example.co.uk",
                "address": "3 Mill Lane",
                "policyNumber": "HOM-2023-0042"
            },
            "callDuration": 425,
            "callStatus": "transferred",
            "callDate": "2024-03-09T14:20:00Z",
            "messages": [
                {"speaker": "customer", "text": "A storm took tiles off my roof"},
                {"speaker": "agent", "text": "Let me transfer you"},
                {"speaker": "system", "text": "Call recorded"}
            ],
            "channel": "phone"
        })
    }

    #[test]
    fn detects_generator_shape() {
        assert!(is_legacy(&generated()));
        assert!(!is_legacy(&json!({"customerName": "Ada", "callDate": "x"})));
        assert!(!is_legacy(&json!({"messages": []})));
        assert!(!is_legacy(&json!([1, 2])));
    }

    #[test]
    fn flattens_customer_and_call_metadata() {
        let out = normalize_legacy(generated());
        assert_eq!(out["id"], "gen-17");
        assert_eq!(out["customerName"], "Harriet Cole");
        assert_eq!(out["customerPhone"], "+44 7700 900456");
        assert_eq!(out["customerEmail"], "harriet@example.co.uk");
        assert_eq!(out["customerAddress"], "3 Mill Lane");
        assert_eq!(out["policyNumber"], "HOM-2023-0042");
        assert_eq!(out["duration"], "00:07:05");
        assert_eq!(out["transferredToAgent"], true);
        assert_eq!(out["callStartTime"], "2024-03-09T14:20:00Z");
        assert_eq!(out["createdAt"], "2024-03-09T14:20:00Z");
        assert_eq!(out["channel"], "phone");
        assert!(out.get("customer").is_none());
        assert!(out.get("callStatus").is_none());
    }

    #[test]
    fn maps_speakers_to_senders() {
        let out = normalize_legacy(generated());
        let senders: Vec<&str> = out["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["sender"].as_str().unwrap())
            .collect();
        assert_eq!(senders, ["Customer", "Agent", "Unknown"]);
        assert_eq!(out["messages"][0]["text"], "A storm took tiles off my roof");
    }

    #[test]
    fn sparse_input_gets_zero_duration_and_no_transfer() {
        let out = normalize_legacy(json!({"callStatus": "completed", "messages": null}));
        assert_eq!(out["duration"], "00:00:00");
        assert_eq!(out["transferredToAgent"], false);
        assert_eq!(out["messages"], json!([]));
        assert!(out.get("customerName").is_none());
        assert!(out.get("createdAt").is_none());
    }
}
