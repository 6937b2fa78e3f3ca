//! Typed requests to, and results from, the generator collaborators.

use std::fmt;

use serde::Serialize;

use crate::handoff::MAX_HANDOFF_PROMPTS;
use crate::{RewriteOptions, ToolId};

/// Token identifying one generator run. Only the in-flight ticket may
/// complete; anything else is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GenerationTicket(u64);

impl GenerationTicket {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GenerationTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Adjustment {
    Shorten,
    Expand,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GenerationRequest {
    Recommend {
        business_description: String,
    },
    RegeneratePrompts {
        business_description: String,
    },
    ReplacePrompt {
        index: usize,
        current: String,
    },
    Rewrite {
        content: String,
        prompts: Vec<String>,
        options: RewriteOptions,
    },
    RegenerateRewrite {
        content: String,
        prompts: Vec<String>,
        options: RewriteOptions,
    },
    AdjustRewrite {
        content: String,
        adjustment: Adjustment,
    },
    Analyze {
        industry: String,
        website: String,
        prompts: Vec<String>,
    },
    RegenerateInsights {
        industry: String,
        website: String,
        prompts: Vec<String>,
    },
}

impl GenerationRequest {
    pub fn tool(&self) -> ToolId {
        match self {
            GenerationRequest::Recommend { .. }
            | GenerationRequest::RegeneratePrompts { .. }
            | GenerationRequest::ReplacePrompt { .. } => ToolId::PromptRecommender,
            GenerationRequest::Rewrite { .. }
            | GenerationRequest::RegenerateRewrite { .. }
            | GenerationRequest::AdjustRewrite { .. } => ToolId::ContentRewriter,
            GenerationRequest::Analyze { .. } | GenerationRequest::RegenerateInsights { .. } => {
                ToolId::InsightsReport
            }
        }
    }

    /// Text shown on the loading overlay while this request runs.
    pub fn loading_message(&self) -> &'static str {
        match self {
            GenerationRequest::Recommend { .. } => "Generating AI Prompt Recommendations",
            GenerationRequest::RegeneratePrompts { .. } => {
                "Regenerating AI Prompt Recommendations"
            }
            GenerationRequest::ReplacePrompt { .. } => "Regenerating prompt...",
            GenerationRequest::Rewrite { .. } => "Rewriting Content for AI Optimization",
            GenerationRequest::RegenerateRewrite { .. } => "Regenerating AI-Optimized Content",
            GenerationRequest::AdjustRewrite {
                adjustment: Adjustment::Shorten,
                ..
            } => "Shortening Content",
            GenerationRequest::AdjustRewrite {
                adjustment: Adjustment::Expand,
                ..
            } => "Expanding Content",
            GenerationRequest::Analyze { .. } => "Generating Insights Dashboard",
            GenerationRequest::RegenerateInsights { .. } => "Regenerating Insights Dashboard",
        }
    }

    /// Description recorded in the history ledger when this request
    /// completes. First submissions and every insights run are recorded.
    pub fn history_description(&self) -> Option<String> {
        match self {
            GenerationRequest::Recommend {
                business_description,
            } => Some(business_description.clone()),
            GenerationRequest::Rewrite { prompts, .. } => Some(prompts.join(", ")),
            GenerationRequest::Analyze {
                industry, website, ..
            }
            | GenerationRequest::RegenerateInsights {
                industry, website, ..
            } => Some(format!("{} - {}", business_name(website), industry)),
            _ => None,
        }
    }
}

/// Brand name guessed from a website: host without `www.`, first label,
/// capitalised.
pub fn business_name(website: &str) -> String {
    let website = website.trim();
    let with_scheme = if website.starts_with("http") {
        website.to_string()
    } else {
        format!("https://{website}")
    };
    let label = match url::Url::parse(&with_scheme) {
        Ok(parsed) => parsed
            .host_str()
            .map(|host| host.trim_start_matches("www.").to_string())
            .unwrap_or_default(),
        Err(_) => website.to_string(),
    };
    let first = label.split('.').next().unwrap_or_default();
    let mut chars = first.chars();
    match chars.next() {
        Some(head) => head.to_uppercase().chain(chars).collect(),
        None => "Your Brand".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptSuggestion {
    pub prompt: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompetitorRow {
    pub rank: u32,
    pub name: String,
    pub score: u32,
    pub mentions: u32,
    pub change: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformShare {
    pub platform: String,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptAppearance {
    pub prompt: String,
    pub appearances: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardReport {
    pub business_name: String,
    pub industry: String,
    pub visibility_score: u32,
    pub score_change: i32,
    pub total_mentions: u32,
    pub highlights: Vec<String>,
    pub competitors: Vec<CompetitorRow>,
    pub platform_share: Vec<PlatformShare>,
    pub top_prompts: Vec<PromptAppearance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GenerationResult {
    Prompts(Vec<PromptSuggestion>),
    ReplacementPrompt {
        index: usize,
        suggestion: PromptSuggestion,
    },
    Rewritten {
        content: String,
    },
    Dashboard(DashboardReport),
}

impl GenerationResult {
    pub fn tool(&self) -> ToolId {
        match self {
            GenerationResult::Prompts(_) | GenerationResult::ReplacementPrompt { .. } => {
                ToolId::PromptRecommender
            }
            GenerationResult::Rewritten { .. } => ToolId::ContentRewriter,
            GenerationResult::Dashboard(_) => ToolId::InsightsReport,
        }
    }

    /// Checks a generator result against the request it answers.
    pub fn validate(self, request: &GenerationRequest) -> Result<Self, GenerationFailure> {
        if self.tool() != request.tool() {
            return Err(GenerationFailure::rejected(format!(
                "{} result returned for a {} request",
                self.tool(),
                request.tool()
            )));
        }
        match (self, request) {
            (GenerationResult::Prompts(mut prompts), _) => {
                prompts.retain(|suggestion| !suggestion.prompt.trim().is_empty());
                if prompts.is_empty() {
                    return Err(GenerationFailure::rejected("no prompts were generated"));
                }
                prompts.truncate(MAX_HANDOFF_PROMPTS);
                Ok(GenerationResult::Prompts(prompts))
            }
            (
                GenerationResult::ReplacementPrompt { index, suggestion },
                GenerationRequest::ReplacePrompt {
                    index: requested, ..
                },
            ) => {
                if index != *requested || suggestion.prompt.trim().is_empty() {
                    return Err(GenerationFailure::rejected(
                        "replacement does not match the requested prompt",
                    ));
                }
                Ok(GenerationResult::ReplacementPrompt { index, suggestion })
            }
            (GenerationResult::ReplacementPrompt { .. }, _) => Err(GenerationFailure::rejected(
                "unrequested prompt replacement",
            )),
            (GenerationResult::Rewritten { content }, _) => {
                if content.trim().is_empty() {
                    return Err(GenerationFailure::rejected("rewritten content is empty"));
                }
                Ok(GenerationResult::Rewritten { content })
            }
            (GenerationResult::Dashboard(report), _) => {
                if report.competitors.is_empty() {
                    return Err(GenerationFailure::rejected("dashboard has no rankings"));
                }
                Ok(GenerationResult::Dashboard(report))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    Cancelled,
    InvalidInput,
    Rejected,
    Internal,
}

/// Terminal failure of a generator run as the panel sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerationFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn rejected(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Rejected, message)
    }
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}
