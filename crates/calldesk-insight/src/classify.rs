use calldesk_core::{ActionItem, Intent, LabelSet, Message, Resolution, Sentiment, Topic};

use crate::keywords::{
    contains_any, count_hits, ACTION_KEYWORDS, CALLBACK_WORDS, INTENT_KEYWORDS, NEGATIVE_WORDS,
    POSITIVE_WORDS, RESOLVED_WORDS, TOPIC_KEYWORDS, TRANSFER_WORDS,
};

fn lowered(messages: &[Message]) -> impl Iterator<Item = String> + '_ {
    messages.iter().map(|m| m.text.to_lowercase())
}

/// Every topic mentioned anywhere in the call, in first-mentioned order.
pub fn extract_topics(messages: &[Message]) -> LabelSet<Topic> {
    let mut topics = LabelSet::new();
    for text in lowered(messages) {
        for (topic, triggers) in TOPIC_KEYWORDS {
            if contains_any(&text, triggers) {
                topics.insert(*topic);
            }
        }
    }
    topics
}

/// Classify how the call ended. Only the final utterance is examined.
pub fn extract_resolution(messages: &[Message]) -> Resolution {
    let Some(last) = messages.last() else {
        return Resolution::Pending;
    };
    let text = last.text.to_lowercase();
    if contains_any(&text, TRANSFER_WORDS) {
        Resolution::TransferredToHumanAgent
    } else if contains_any(&text, RESOLVED_WORDS) {
        Resolution::Resolved
    } else if contains_any(&text, CALLBACK_WORDS) {
        Resolution::CallbackScheduled
    } else {
        Resolution::InProgress
    }
}

/// Compare cumulative positive and negative keyword hits across the call.
pub fn analyze_sentiment(messages: &[Message]) -> Sentiment {
    let (positive, negative) = lowered(messages).fold((0usize, 0usize), |(pos, neg), text| {
        (
            pos + count_hits(&text, POSITIVE_WORDS),
            neg + count_hits(&text, NEGATIVE_WORDS),
        )
    });
    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// Classify the caller's intent from the opening utterance.
pub fn extract_intent(messages: &[Message]) -> Intent {
    let Some(first) = messages.first() else {
        return Intent::Unknown;
    };
    let text = first.text.to_lowercase();
    INTENT_KEYWORDS
        .iter()
        .find(|(_, triggers)| contains_any(&text, triggers))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::GeneralInquiry)
}

/// Follow-up work implied by the call, deduplicated in first-seen order.
pub fn extract_action_items(messages: &[Message]) -> LabelSet<ActionItem> {
    let mut actions = LabelSet::new();
    for text in lowered(messages) {
        for (action, triggers) in ACTION_KEYWORDS {
            if contains_any(&text, triggers) {
                actions.insert(*action);
            }
        }
    }
    actions
}
