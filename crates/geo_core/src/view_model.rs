use serde::Serialize;

use crate::{
    GenerationFailure, GenerationResult, HistoryItem, NavigationState, OverlayIcon, PanelDraft,
    PromptEdit, SeedSource, Stage, ToolId,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppViewModel {
    pub navigation: NavigationState,
    pub url: String,
    pub tools: Vec<ToolTabView>,
    pub panel: PanelView,
    pub overlay: Option<OverlayView>,
    pub history: Vec<HistoryItem>,
    pub sidebar_collapsed: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolTabView {
    pub tool: ToolId,
    pub title: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub tool: ToolId,
    pub stage: Stage,
    pub draft: PanelDraft,
    pub seed: Option<SeedSource>,
    pub result: Option<GenerationResult>,
    pub failure: Option<GenerationFailure>,
    pub editing: Option<PromptEdit>,
    /// False while the overlay is up or the form is incomplete.
    pub can_submit: bool,
    pub can_hand_off: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayView {
    pub message: String,
    pub icon: OverlayIcon,
}
