use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CredibilityLabel {
    Low,
    Medium,
    High,
}

impl CredibilityLabel {
    pub const ALL: [CredibilityLabel; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Exact, case-sensitive match against the wire names.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.as_str() == value)
    }
}

impl fmt::Display for CredibilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-dimension scores. Only built when at least one dimension is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredibilitySubscores {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_reliability: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factual_consistency: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone_and_bias: Option<u8>,
}

impl CredibilitySubscores {
    pub fn is_empty(&self) -> bool {
        self.source_reliability.is_none()
            && self.factual_consistency.is_none()
            && self.tone_and_bias.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CredibilityResult {
    /// Overall credibility, 0-100.
    #[schema(minimum = 0, maximum = 100)]
    pub score: u8,
    pub label: CredibilityLabel,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscores: Option<CredibilitySubscores>,
}
