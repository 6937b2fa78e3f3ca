use chrono::{DateTime, Utc};

use crate::{
    Adjustment, DraftEdit, GenerationFailure, GenerationResult, GenerationTicket, HistoryId,
    ResultEdit, ToolId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The location changed outside the controller (deep link, back/forward).
    UrlChanged(String),
    /// User picked a tool in the sidebar.
    ToolSelected(ToolId),
    /// User clicked a history entry.
    HistorySelected(HistoryId),
    /// User deleted a history entry.
    HistoryDeleted(HistoryId),
    /// User edited the active panel's form.
    DraftEdited(DraftEdit),
    /// User edited a recommended prompt in place.
    ResultEdited(ResultEdit),
    /// User submitted the active panel's form.
    SubmitClicked,
    /// User asked for a fresh variant of the current result.
    RegenerateClicked,
    /// User asked for an alternative to one recommended prompt.
    PromptRegenerateClicked { index: usize },
    /// User asked for shorter or longer rewritten content.
    AdjustClicked(Adjustment),
    /// Recommender: continue with these prompts in the rewriter.
    UsePromptsInRewriter,
    /// Rewriter: continue with this content in insights.
    UseContentInInsights,
    InsightsExpanded,
    InsightsCollapsed,
    /// User discarded inputs imported from another tool or from history.
    SeedsCleared,
    SidebarToggled,
    /// A generator run ended.
    GenerationFinished {
        ticket: GenerationTicket,
        outcome: Result<GenerationResult, GenerationFailure>,
        finished_at: DateTime<Utc>,
    },
    /// Periodic wake-up from the shell. Changes nothing by itself.
    Tick,
}
