//! GEO Studio core: the workspace controller as a pure state machine.
mod controller;
mod effect;
mod generation;
mod handoff;
mod history;
mod loading;
mod msg;
mod navigation;
mod panel;
mod prefill;
mod report;
mod rewrite;
mod state;
mod tool;
mod update;
mod view_model;

pub use controller::WorkspaceController;
pub use effect::Effect;
pub use generation::{
    business_name, Adjustment, CompetitorRow, DashboardReport, FailureKind, GenerationFailure,
    GenerationRequest, GenerationResult, GenerationTicket, PlatformShare, PromptAppearance,
    PromptSuggestion,
};
pub use handoff::{HandoffChannel, HandoffEdge, HandoffPayload, MAX_HANDOFF_PROMPTS};
pub use history::{
    format_relative, truncate_description, HistoryId, HistoryItem, HistoryLedger,
    DESCRIPTION_LIMIT, ELLIPSIS, HISTORY_CAP,
};
pub use loading::{LoadingOverlay, OverlayIcon};
pub use msg::Msg;
pub use navigation::{
    apply_navigation_state, derive_navigation_state, query_part, NavigationState, STAGE_PARAM,
    TOOL_PARAM,
};
pub use panel::{
    DraftEdit, Panel, PanelDraft, PromptEdit, ResultEdit, SeedSource, MAX_PROMPT_FIELDS,
};
pub use prefill::{PrefillSlots, PrefilledState};
pub use report::{report_file_name, report_text};
pub use rewrite::{
    Audience, RewriteOptions, Tone, AI_PLATFORMS, DEFAULT_MAX_WORDS, MAX_MAX_WORDS, MIN_MAX_WORDS,
};
pub use state::AppState;
pub use tool::{Stage, ToolId};
pub use update::{open, update};
pub use view_model::{AppViewModel, OverlayView, PanelView, ToolTabView};
