use calldesk_core::{ActionItem, Intent, Topic};

// ── Topic triggers ──

pub(crate) const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (
        Topic::Coverage,
        &["coverage", "covered", "dwelling", "protection", "policy", "includes"],
    ),
    (
        Topic::Damage,
        &["damage", "damaged", "broken", "destroyed", "harm"],
    ),
    (
        Topic::Claims,
        &["claim", "file", "filing", "claim status", "submission"],
    ),
    (
        Topic::Deductible,
        &["deductible", "out of pocket", "coinsurance"],
    ),
    (
        Topic::Water,
        &["water", "flood", "rain", "leaks", "moisture", "basement"],
    ),
    (
        Topic::Roof,
        &["roof", "shingle", "gutter", "chimney", "attic"],
    ),
    (
        Topic::Weather,
        &["weather", "storm", "hail", "wind", "thunderstorm", "tornado"],
    ),
    (
        Topic::Address,
        &["address", "move", "relocate", "new home", "location"],
    ),
    (
        Topic::Policy,
        &["policy", "renewal", "premium", "coverage limits", "policy number"],
    ),
];

// ── Resolution (last message, first match wins) ──

pub(crate) const TRANSFER_WORDS: &[&str] = &["transfer", "agent"];
pub(crate) const RESOLVED_WORDS: &[&str] = &["resolved", "solved", "done"];
pub(crate) const CALLBACK_WORDS: &[&str] = &["callback", "followup"];

// ── Sentiment ──

pub(crate) const NEGATIVE_WORDS: &[&str] = &[
    "problem",
    "issue",
    "angry",
    "frustrated",
    "upset",
    "unhappy",
    "wrong",
    "broken",
    "failed",
];

pub(crate) const POSITIVE_WORDS: &[&str] = &[
    "happy",
    "satisfied",
    "great",
    "thanks",
    "appreciate",
    "good",
    "excellent",
    "wonderful",
];

// ── Intent (first message, first match wins) ──

pub(crate) const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Question,
        &["what", "how", "why", "when", "where", "tell me", "can you"],
    ),
    (
        Intent::Complaint,
        &["problem", "issue", "complaint", "wrong", "broken", "failed"],
    ),
    (
        Intent::Request,
        &["cancel", "upgrade", "change", "modify", "request"],
    ),
    (
        Intent::Information,
        &["policy", "coverage", "premium", "benefits", "details"],
    ),
];

// ── Action items (independent per message) ──

pub(crate) const ACTION_KEYWORDS: &[(ActionItem, &[&str])] = &[
    (ActionItem::SendEmail, &["send", "email"]),
    (ActionItem::ScheduleCallback, &["callback", "call back"]),
    (ActionItem::ProcessClaim, &["claim"]),
    (ActionItem::SendDocuments, &["document"]),
];

pub(crate) const FOLLOW_UP_WORDS: &[&str] = &["callback", "followup", "later"];

/// True when `text` (already lower-cased) contains any of `words`.
pub(crate) fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Number of `words` that occur in `text`, each counted once.
pub(crate) fn count_hits(text: &str, words: &[&str]) -> usize {
    words.iter().filter(|w| text.contains(*w)).count()
}
