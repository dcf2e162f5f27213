//! Prompt templates for a language-model backend.
//!
//! The keyword extractor stands in for a model call; these templates are what
//! a model integration would send instead. Nothing here performs I/O.

use std::fmt;
use std::str::FromStr;

use calldesk_core::Transcript;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("Prompt {0} not found")]
    NotFound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKey {
    GenerateSummary,
    ExtractInsights,
    ExtractKeyInfo,
    GenerateAgentResponse,
    AnalyzeSentiment,
}

impl PromptKey {
    pub const ALL: &'static [PromptKey] = &[
        PromptKey::GenerateSummary,
        PromptKey::ExtractInsights,
        PromptKey::ExtractKeyInfo,
        PromptKey::GenerateAgentResponse,
        PromptKey::AnalyzeSentiment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PromptKey::GenerateSummary => "GENERATE_SUMMARY",
            PromptKey::ExtractInsights => "EXTRACT_INSIGHTS",
            PromptKey::ExtractKeyInfo => "EXTRACT_KEY_INFO",
            PromptKey::GenerateAgentResponse => "GENERATE_AGENT_RESPONSE",
            PromptKey::AnalyzeSentiment => "ANALYZE_SENTIMENT",
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            PromptKey::GenerateSummary => GENERATE_SUMMARY,
            PromptKey::ExtractInsights => EXTRACT_INSIGHTS,
            PromptKey::ExtractKeyInfo => EXTRACT_KEY_INFO,
            PromptKey::GenerateAgentResponse => GENERATE_AGENT_RESPONSE,
            PromptKey::AnalyzeSentiment => ANALYZE_SENTIMENT,
        }
    }
}

impl fmt::Display for PromptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PromptKey {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PromptKey::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PromptError::NotFound(s.to_string()))
    }
}

/// Fill `{name}` placeholders. Each variable replaces its first occurrence;
/// placeholders without a variable are left as written.
pub fn format_prompt(key: PromptKey, vars: &[(&str, &str)]) -> String {
    let mut prompt = key.template().to_string();
    for (name, value) in vars {
        prompt = prompt.replacen(&format!("{{{name}}}"), value, 1);
    }
    prompt
}

/// Flatten a transcript into `Sender: text` lines for the `{transcript}` slot.
pub fn render_transcript(transcript: &Transcript) -> String {
    transcript
        .messages
        .iter()
        .map(|m| format!("{}: {}", m.sender, m.text))
        .collect::<Vec<_>>()
        .join("\n")
}

const GENERATE_SUMMARY: &str = "You are an AI assistant analyzing home insurance customer service transcripts.
Given the following conversation transcript, generate a concise summary including:
1. Main topic (roof damage, water damage, coverage question, policy update, etc.)
2. Customer's main concern
3. Coverage details mentioned or requested
4. Resolution provided or action taken
5. Next steps if any

Transcript:
{transcript}

Provide response in JSON format with keys: title, keyTopics (array), resolution, sentiment (positive/negative/neutral), outcome.";

const EXTRACT_INSIGHTS: &str = "Analyze this home insurance customer service transcript and extract:
1. Customer intent (coverage inquiry, claim filing, policy update, etc.)
2. Action items (follow-ups needed)
3. Policy details mentioned (coverage type, deductible, property location, etc.)
4. Customer sentiment
5. Whether follow-up is needed

Transcript:
{transcript}

Provide as JSON with keys: customerIntent, actionItems (array), policyDetails, sentiment, followUpRequired (boolean).";

const EXTRACT_KEY_INFO: &str = "Extract the following from the home insurance transcript:
- Customer name
- Customer phone/email
- Policy number (if mentioned)
- Property address or location
- Coverage type (dwelling, water, weather, etc.)
- Claim type (if applicable)
- Deductible amount
- Priority level (high/medium/low)

Transcript:
{transcript}

Return as JSON.";

const GENERATE_AGENT_RESPONSE: &str = "Based on the customer message about home insurance, generate an appropriate response from the support agent.
Customer message: {message}
Previous context: {context}

Keep response professional, helpful, and accurate regarding home insurance coverage.";

const ANALYZE_SENTIMENT: &str = "Analyze the sentiment of this home insurance customer message and rate satisfaction 1-5:
Message: {message}
Return JSON with: sentiment (positive/negative/neutral), satisfactionScore (1-5), reasoning.";
