use serde::{Deserialize, Serialize};

use crate::error::GeminiApiError;
use crate::payload::Content;

/// Finish reasons that mean the candidate was withheld rather than completed.
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
    "IMAGE_SAFETY",
];

/// Response body of `generateContent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Returns why the response was withheld, if it was.
    ///
    /// A prompt-level block wins over a candidate-level finish reason.
    pub fn block_reason(&self) -> Option<String> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
            .filter(|reason| !reason.trim().is_empty())
        {
            return Some(reason.to_string());
        }

        let candidate = self.candidates.first()?;
        let reason = candidate.finish_reason.as_deref()?;
        let withheld = BLOCKING_FINISH_REASONS
            .iter()
            .any(|blocking| reason.eq_ignore_ascii_case(blocking));
        if withheld && candidate_text(candidate).is_none() {
            Some(reason.to_string())
        } else {
            None
        }
    }

    /// Text of the first candidate with all parts concatenated.
    pub fn text(&self) -> Option<String> {
        self.candidates.first().and_then(candidate_text)
    }

    /// Converts the response into reply text or the matching error.
    pub fn into_text(self) -> Result<String, GeminiApiError> {
        if let Some(reason) = self.block_reason() {
            return Err(GeminiApiError::Blocked { reason });
        }

        self.text().ok_or(GeminiApiError::EmptyResponse)
    }
}

fn candidate_text(candidate: &Candidate) -> Option<String> {
    candidate
        .content
        .as_ref()
        .and_then(Content::joined_text)
        .filter(|text| !text.trim().is_empty())
}
