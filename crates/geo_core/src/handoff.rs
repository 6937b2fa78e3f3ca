//! Single-use slots carrying generated artifacts from one tool to the next.

use serde::Serialize;

use crate::ToolId;

/// Prompt lists travelling between tools never exceed this.
pub const MAX_HANDOFF_PROMPTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HandoffEdge {
    RecommenderToRewriter,
    RewriterToInsights,
}

impl HandoffEdge {
    pub fn source(self) -> ToolId {
        match self {
            HandoffEdge::RecommenderToRewriter => ToolId::PromptRecommender,
            HandoffEdge::RewriterToInsights => ToolId::ContentRewriter,
        }
    }

    pub fn destination(self) -> ToolId {
        match self {
            HandoffEdge::RecommenderToRewriter => ToolId::ContentRewriter,
            HandoffEdge::RewriterToInsights => ToolId::InsightsReport,
        }
    }

    /// The edge delivering into `tool`, if any.
    pub fn into_tool(tool: ToolId) -> Option<Self> {
        match tool {
            ToolId::PromptRecommender => None,
            ToolId::ContentRewriter => Some(HandoffEdge::RecommenderToRewriter),
            ToolId::InsightsReport => Some(HandoffEdge::RewriterToInsights),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HandoffPayload {
    RecommenderToRewriter { prompts: Vec<String> },
    RewriterToInsights { content: String, prompts: Vec<String> },
}

impl HandoffPayload {
    pub fn edge(&self) -> HandoffEdge {
        match self {
            HandoffPayload::RecommenderToRewriter { .. } => HandoffEdge::RecommenderToRewriter,
            HandoffPayload::RewriterToInsights { .. } => HandoffEdge::RewriterToInsights,
        }
    }

    pub fn prompts(&self) -> &[String] {
        match self {
            HandoffPayload::RecommenderToRewriter { prompts }
            | HandoffPayload::RewriterToInsights { prompts, .. } => prompts,
        }
    }

    fn cap_prompts(mut self) -> Self {
        match &mut self {
            HandoffPayload::RecommenderToRewriter { prompts }
            | HandoffPayload::RewriterToInsights { prompts, .. } => {
                prompts.truncate(MAX_HANDOFF_PROMPTS);
            }
        }
        self
    }
}

/// One slot per edge. A payload is owned here from `send` until the
/// destination panel `take`s it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HandoffChannel {
    to_rewriter: Option<HandoffPayload>,
    to_insights: Option<HandoffPayload>,
}

impl HandoffChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `payload` on its edge, replacing anything pending there, and
    /// returns the tool that should become active.
    pub fn send(&mut self, payload: HandoffPayload) -> ToolId {
        let edge = payload.edge();
        *self.slot_mut(edge) = Some(payload.cap_prompts());
        edge.destination()
    }

    pub fn take(&mut self, edge: HandoffEdge) -> Option<HandoffPayload> {
        self.slot_mut(edge).take()
    }

    pub fn is_pending(&self, edge: HandoffEdge) -> bool {
        match edge {
            HandoffEdge::RecommenderToRewriter => self.to_rewriter.is_some(),
            HandoffEdge::RewriterToInsights => self.to_insights.is_some(),
        }
    }

    /// Drops every pending payload. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        usize::from(self.to_rewriter.take().is_some())
            + usize::from(self.to_insights.take().is_some())
    }

    fn slot_mut(&mut self, edge: HandoffEdge) -> &mut Option<HandoffPayload> {
        match edge {
            HandoffEdge::RecommenderToRewriter => &mut self.to_rewriter,
            HandoffEdge::RewriterToInsights => &mut self.to_insights,
        }
    }
}
