use calldesk_core::{Insights, Message, Outcome, Summary, Transcript};

use crate::classify::{
    analyze_sentiment, extract_action_items, extract_intent, extract_resolution, extract_topics,
};
use crate::keywords::{contains_any, FOLLOW_UP_WORDS};
use crate::policy::extract_policy_details;

/// Summary without insights, as produced right after a transcript is accepted.
/// The caller stamps `generatedAt` and persists it.
pub fn generate_summary(transcript: &Transcript) -> Summary {
    let messages = &transcript.messages;
    Summary {
        title: format!("Call with {}", transcript.customer_name),
        key_topics: extract_topics(messages),
        resolution: extract_resolution(messages),
        sentiment: analyze_sentiment(messages),
        duration: transcript
            .duration
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
        outcome: Outcome::from_transferred(transcript.transferred_to_agent),
        insights: None,
    }
}

pub fn extract_key_insights(transcript: &Transcript) -> Insights {
    let messages = &transcript.messages;
    Insights {
        customer_intent: extract_intent(messages),
        action_items: extract_action_items(messages),
        policy_details: extract_policy_details(messages),
        follow_up_required: follow_up_required(messages),
    }
}

/// Whether anyone mentioned a callback, a follow-up, or "later".
pub fn follow_up_required(messages: &[Message]) -> bool {
    messages
        .iter()
        .any(|m| contains_any(&m.text.to_lowercase(), FOLLOW_UP_WORDS))
}

/// Summary with the insights block attached.
pub fn analyze(transcript: &Transcript) -> Summary {
    Summary {
        insights: Some(extract_key_insights(transcript)),
        ..generate_summary(transcript)
    }
}
