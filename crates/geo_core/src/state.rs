use chrono::{DateTime, Utc};
use geo_logging::{geo_debug, geo_info, geo_warn};

use crate::view_model::{AppViewModel, OverlayView, PanelView, ToolTabView};
use crate::{
    DraftEdit, Effect, GenerationFailure, GenerationRequest, GenerationResult, GenerationTicket,
    HistoryId, NavigationState, Panel, ResultEdit, ToolId, WorkspaceController,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    ticket: GenerationTicket,
    request: GenerationRequest,
}

/// Everything the workspace owns: the controller, the mounted panel and the
/// generator run currently in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    controller: WorkspaceController,
    panel: Panel,
    in_flight: Option<InFlight>,
    next_ticket: u64,
    sidebar_collapsed: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_controller(WorkspaceController::new())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the workspace on a deep link.
    pub fn from_url(query: &str) -> Self {
        Self::with_controller(WorkspaceController::from_query(query))
    }

    fn with_controller(mut controller: WorkspaceController) -> Self {
        let tool = controller.active_tool();
        let (handoff, prefill) = controller.take_seeds(tool);
        Self {
            controller,
            panel: Panel::mount(tool, handoff, prefill),
            in_flight: None,
            next_ticket: 1,
            sidebar_collapsed: false,
            dirty: true,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let active = self.controller.active_tool();
        let loading = self.controller.loading();
        AppViewModel {
            navigation: self.controller.navigation(),
            url: self.controller.url().to_string(),
            tools: ToolId::ALL
                .iter()
                .map(|tool| ToolTabView {
                    tool: *tool,
                    title: tool.title().to_string(),
                    active: *tool == active,
                })
                .collect(),
            panel: PanelView {
                tool: self.panel.tool(),
                stage: self.panel.stage(),
                draft: self.panel.draft().clone(),
                seed: self.panel.seed(),
                result: self.panel.result().cloned(),
                failure: self.panel.failure().cloned(),
                editing: self.panel.editing().cloned(),
                can_submit: !loading.is_active() && self.panel.submit_request().is_some(),
                can_hand_off: !loading.is_active()
                    && (self.panel.prompts_for_rewriter().is_some()
                        || self.panel.content_for_insights().is_some()),
            },
            overlay: match (loading.message(), loading.icon()) {
                (Some(message), Some(icon)) => Some(OverlayView {
                    message: message.to_string(),
                    icon,
                }),
                _ => None,
            },
            history: self.controller.history().iter().cloned().collect(),
            sidebar_collapsed: self.sidebar_collapsed,
            dirty: self.dirty,
        }
    }

    pub fn controller(&self) -> &WorkspaceController {
        &self.controller
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn navigation(&self) -> NavigationState {
        self.controller.navigation()
    }

    pub fn url(&self) -> &str {
        self.controller.url()
    }

    pub fn in_flight_ticket(&self) -> Option<GenerationTicket> {
        self.in_flight.as_ref().map(|run| run.ticket)
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Sidebar click. Re-selecting the active tool keeps its panel.
    pub(crate) fn select_tool(&mut self, tool: ToolId) -> Vec<Effect> {
        let switching = tool != self.controller.active_tool();
        let mut effects = Vec::new();
        if switching {
            effects.extend(self.cancel_in_flight());
        }
        if self.controller.select_tool(tool) {
            self.mount(tool);
        }
        self.mark_dirty();
        effects
    }

    /// Location changed under us. The URL decides the tool; the panel
    /// decides the stage.
    pub(crate) fn follow_url(&mut self, query: &str) -> Vec<Effect> {
        let linked = crate::derive_navigation_state(query);
        let mut effects = Vec::new();
        if linked.tool != self.controller.active_tool() {
            effects.extend(self.cancel_in_flight());
            self.controller.sync_to(linked);
            self.mount(linked.tool);
            self.mark_dirty();
        } else if linked.stage != self.panel.stage() {
            geo_debug!(
                "Ignoring linked stage {} for {}, panel is at {}",
                linked.stage,
                linked.tool,
                self.panel.stage()
            );
        }
        effects
    }

    pub(crate) fn replay_history(&mut self, id: HistoryId) -> Vec<Effect> {
        if self.controller.history().get(id).is_none() {
            geo_debug!("History {} no longer exists", id);
            return Vec::new();
        }
        let effects: Vec<Effect> = self.cancel_in_flight().into_iter().collect();
        if let Some(tool) = self.controller.replay_history(id) {
            self.mount(tool);
        }
        self.mark_dirty();
        effects
    }

    pub(crate) fn remove_history(&mut self, id: HistoryId) {
        if self.controller.remove_history(id) {
            self.mark_dirty();
        }
    }

    pub(crate) fn edit_draft(&mut self, edit: DraftEdit) {
        if self.controller.loading().is_active() {
            return;
        }
        if self.panel.edit(edit) {
            self.mark_dirty();
        }
    }

    pub(crate) fn edit_result(&mut self, edit: ResultEdit) {
        if self.controller.loading().is_active() {
            return;
        }
        if self.panel.edit_result(edit) {
            self.mark_dirty();
        }
    }

    /// Starts a generator run unless one is already showing the overlay.
    /// Panels keep their triggers disabled while loading; this is the same
    /// rule applied to messages that arrive anyway.
    pub(crate) fn begin_generation(&mut self, request: Option<GenerationRequest>) -> Vec<Effect> {
        if self.controller.loading().is_active() {
            geo_debug!("Generation trigger ignored while loading");
            return Vec::new();
        }
        let Some(request) = request else {
            return Vec::new();
        };

        let ticket = GenerationTicket::new(self.next_ticket);
        self.next_ticket += 1;
        self.controller.start_loading(request.loading_message());
        geo_info!("Generation {} started for {}", ticket, request.tool());
        self.in_flight = Some(InFlight {
            ticket,
            request: request.clone(),
        });
        self.mark_dirty();
        vec![Effect::RunGenerator { ticket, request }]
    }

    /// Completion callback of the panel that owns the in-flight run.
    pub(crate) fn finish_generation(
        &mut self,
        ticket: GenerationTicket,
        outcome: Result<GenerationResult, GenerationFailure>,
        finished_at: DateTime<Utc>,
    ) {
        let Some(run) = self.in_flight.take_if(|run| run.ticket == ticket) else {
            geo_info!("Ignoring stale completion for generation {}", ticket);
            return;
        };

        self.controller.stop_loading();
        match outcome.and_then(|result| result.validate(&run.request)) {
            Ok(result) => {
                self.panel.apply_result(result);
                if let Some(description) = run.request.history_description() {
                    self.controller
                        .on_add_to_history(run.request.tool(), &description, finished_at);
                }
            }
            Err(failure) => {
                geo_warn!("Generation {} failed: {}", ticket, failure);
                self.panel.apply_failure(failure);
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn hand_prompts_to_rewriter(&mut self) -> Vec<Effect> {
        if self.controller.loading().is_active() {
            return Vec::new();
        }
        let Some(prompts) = self.panel.prompts_for_rewriter() else {
            return Vec::new();
        };
        let tool = self.controller.send_to_rewriter(prompts);
        self.mount(tool);
        self.mark_dirty();
        Vec::new()
    }

    pub(crate) fn hand_content_to_insights(&mut self) -> Vec<Effect> {
        if self.controller.loading().is_active() {
            return Vec::new();
        }
        let Some((content, prompts)) = self.panel.content_for_insights() else {
            return Vec::new();
        };
        let tool = self.controller.send_to_insights(content, prompts);
        self.mount(tool);
        self.mark_dirty();
        Vec::new()
    }

    pub(crate) fn set_expanded(&mut self, expanded: bool) {
        if self.panel.set_expanded(expanded) {
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_seed(&mut self) {
        if self.panel.clear_seed() {
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.mark_dirty();
    }

    /// Pushes the panel's stage into navigation. Returns true if the URL
    /// changed.
    pub(crate) fn reflect_stage(&mut self) -> bool {
        let changed = self.controller.reflect_stage(self.panel.stage());
        if changed {
            self.mark_dirty();
        }
        changed
    }

    /// Mounting a new panel abandons whatever the old one was waiting for.
    fn cancel_in_flight(&mut self) -> Option<Effect> {
        let run = self.in_flight.take()?;
        geo_info!(
            "Cancelling generation {} for {} on navigation",
            run.ticket,
            run.request.tool()
        );
        self.controller.stop_loading();
        Some(Effect::CancelGenerator { ticket: run.ticket })
    }

    fn mount(&mut self, tool: ToolId) {
        let (handoff, prefill) = self.controller.take_seeds(tool);
        self.panel = Panel::mount(tool, handoff, prefill);
    }
}
