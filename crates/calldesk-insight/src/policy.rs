use std::sync::LazyLock;

use calldesk_core::{CoverageType, Message, PolicyDetails};
use regex::Regex;

// Digit and word classes are ASCII: `\d`/`\w` in `regex` are Unicode-aware,
// and `(?i)` would fold non-ASCII letters such as U+212A into them.

static POLICY_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"HOM-[0-9]+-[0-9]+|HOM[0-9]+").unwrap());

static DEDUCTIBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\$[0-9]+\s*deductible").unwrap());

static PROPERTY_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[0-9]+\s+(?-i:[A-Za-z0-9_]+)\s+(?:Street|Avenue|Road|Drive|Lane|Boulevard|Court|Way|Place)",
    )
    .unwrap()
});

/// Street words that gate the address pattern. Matched case-sensitively.
const ADDRESS_GATE: &[&str] = &["Street", "Avenue", "Road"];

/// Fold policy fields out of the call. Each field keeps the last match in
/// message order; a field is never cleared once set.
pub fn extract_policy_details(messages: &[Message]) -> PolicyDetails {
    messages
        .iter()
        .fold(PolicyDetails::default(), |details, msg| merge(details, &msg.text))
}

fn merge(mut details: PolicyDetails, text: &str) -> PolicyDetails {
    if let Some(m) = POLICY_NUMBER.find(text) {
        details.policy_number = Some(m.as_str().to_string());
    }
    if let Some(coverage) = coverage_type(&text.to_lowercase()) {
        details.coverage_type = Some(coverage);
    }
    if let Some(m) = DEDUCTIBLE.find(text) {
        details.deductible = Some(m.as_str().to_string());
    }
    if ADDRESS_GATE.iter().any(|w| text.contains(w)) {
        if let Some(m) = PROPERTY_ADDRESS.find(text) {
            details.property_address = Some(m.as_str().to_string());
        }
    }
    details
}

/// First matching coverage mention in a lower-cased utterance.
fn coverage_type(lower: &str) -> Option<CoverageType> {
    if lower.contains("dwelling") {
        Some(CoverageType::Dwelling)
    } else if lower.contains("water") {
        Some(CoverageType::WaterDamage)
    } else if lower.contains("weather") || lower.contains("storm") {
        Some(CoverageType::WeatherStorm)
    } else if lower.contains("roof") {
        Some(CoverageType::Roof)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msgs(texts: &[&str]) -> Vec<Message> {
        texts.iter().map(|t| Message::new("Customer", *t)).collect()
    }

    #[test]
    fn policy_number_last_match_wins() {
        let d = extract_policy_details(&msgs(&["It's HOM-2024-9876."]));
        assert_eq!(d.policy_number.as_deref(), Some("HOM-2024-9876"));

        let d = extract_policy_details(&msgs(&["It's HOM-2024-9876.", "Sorry, HOM5555"]));
        assert_eq!(d.policy_number.as_deref(), Some("HOM5555"));
    }

    #[test]
    fn policy_number_is_case_sensitive() {
        let d = extract_policy_details(&msgs(&["my number is hom-2024-1"]));
        assert_eq!(d.policy_number, None);
    }

    #[test]
    fn policy_number_takes_first_match_within_message() {
        let d = extract_policy_details(&msgs(&["HOM12 or maybe HOM-1-2"]));
        assert_eq!(d.policy_number.as_deref(), Some("HOM12"));
    }

    #[test]
    fn deductible_keeps_matched_case() {
        let d = extract_policy_details(&msgs(&["You have a $1000 deductible"]));
        assert_eq!(d.deductible.as_deref(), Some("$1000 deductible"));

        let d = extract_policy_details(&msgs(&["a $250Deductible applies"]));
        assert_eq!(d.deductible.as_deref(), Some("$250Deductible"));
    }

    #[test]
    fn coverage_type_priority_per_message() {
        let d = extract_policy_details(&msgs(&["water from the storm hit the dwelling"]));
        assert_eq!(d.coverage_type, Some(CoverageType::Dwelling));

        let d = extract_policy_details(&msgs(&["storm took the roof off"]));
        assert_eq!(d.coverage_type, Some(CoverageType::WeatherStorm));
    }

    #[test]
    fn coverage_type_is_never_cleared() {
        let d = extract_policy_details(&msgs(&["the roof leaks", "okay, thank you"]));
        assert_eq!(d.coverage_type, Some(CoverageType::Roof));
    }

    #[test]
    fn address_requires_capitalized_street_word() {
        let d = extract_policy_details(&msgs(&["I live at 12 Baker Street"]));
        assert_eq!(d.property_address.as_deref(), Some("12 Baker Street"));

        // gate is case-sensitive even though the pattern is not
        let d = extract_policy_details(&msgs(&["I live at 12 baker street"]));
        assert_eq!(d.property_address, None);

        // gate passes on "Road" elsewhere, pattern then finds the lane
        let d = extract_policy_details(&msgs(&["Off the Road, at 7 Elm lane"]));
        assert_eq!(d.property_address.as_deref(), Some("7 Elm lane"));
    }

    #[test]
    fn address_word_is_ascii_only() {
        let d = extract_policy_details(&msgs(&["12 \u{212A}ent Road"]));
        assert_eq!(d.property_address, None);

        let d = extract_policy_details(&msgs(&["12 Kent Road"]));
        assert_eq!(d.property_address.as_deref(), Some("12 Kent Road"));
    }

    #[test]
    fn unmatched_fields_stay_absent() {
        let d = extract_policy_details(&msgs(&["hello", "goodbye"]));
        assert!(d.is_empty());
        assert!(extract_policy_details(&[]).is_empty());
    }
}
