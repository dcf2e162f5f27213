//! Keyword-driven call analysis.
//!
//! Every function here is a pure, total map from a message slice (or a whole
//! transcript) to a label or structure. Keyword matching runs on lower-cased
//! text; policy field patterns run on the text as spoken.

mod assemble;
mod classify;
mod keywords;
mod policy;
pub mod prompts;

pub use assemble::{analyze, extract_key_insights, follow_up_required, generate_summary};
pub use classify::{
    analyze_sentiment, extract_action_items, extract_intent, extract_resolution, extract_topics,
};
pub use policy::extract_policy_details;
pub use prompts::{format_prompt, render_transcript, PromptError, PromptKey};
