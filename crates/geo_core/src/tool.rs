use std::fmt;

use serde::Serialize;

/// One of the three tool panels behind the navigation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolId {
    #[default]
    PromptRecommender,
    ContentRewriter,
    InsightsReport,
}

impl ToolId {
    /// Sidebar order.
    pub const ALL: [ToolId; 3] = [
        ToolId::PromptRecommender,
        ToolId::ContentRewriter,
        ToolId::InsightsReport,
    ];

    /// Identifier used in the `tool` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            ToolId::PromptRecommender => "prompt-recommender",
            ToolId::ContentRewriter => "content-rewriter",
            ToolId::InsightsReport => "insights-report",
        }
    }

    /// Parses a query value. `ai-prompts` is the identifier older links used
    /// for the recommender.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "prompt-recommender" | "ai-prompts" => Some(ToolId::PromptRecommender),
            "content-rewriter" => Some(ToolId::ContentRewriter),
            "insights-report" => Some(ToolId::InsightsReport),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ToolId::PromptRecommender => "AI Prompt Recommendations",
            ToolId::ContentRewriter => "Smart Content Rewriter",
            ToolId::InsightsReport => "Insights Report",
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the active panel is in its lifecycle. Always derived from panel
/// state, see [`crate::Panel::stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Input,
    Output,
    Expanded,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Input, Stage::Output, Stage::Expanded];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Input => "input",
            Stage::Output => "output",
            Stage::Expanded => "expanded",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "input" => Some(Stage::Input),
            "output" => Some(Stage::Output),
            "expanded" => Some(Stage::Expanded),
            _ => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
