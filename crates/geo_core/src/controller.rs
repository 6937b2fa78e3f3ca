//! Owner of navigation, history, handoff, prefill and loading state.
//!
//! Panels never touch this state directly. They go through the callback
//! surface below, and every call that moves navigation re-renders the URL
//! before returning, so [`WorkspaceController::url`] always matches
//! [`WorkspaceController::navigation`].

use chrono::{DateTime, Utc};
use geo_logging::{geo_debug, geo_info};

use crate::{
    apply_navigation_state, derive_navigation_state, HandoffChannel, HandoffEdge, HandoffPayload,
    HistoryId, HistoryLedger, LoadingOverlay, NavigationState, PrefillSlots, PrefilledState,
    Stage, ToolId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceController {
    navigation: NavigationState,
    url: String,
    loading: LoadingOverlay,
    history: HistoryLedger,
    handoff: HandoffChannel,
    prefill: PrefillSlots,
}

impl Default for WorkspaceController {
    fn default() -> Self {
        Self::with_navigation(NavigationState::default())
    }
}

impl WorkspaceController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts on the tool named by a deep link. The stage in the link is
    /// not trusted; a fresh panel always starts in the input stage.
    pub fn from_query(query: &str) -> Self {
        let linked = derive_navigation_state(query);
        Self::with_navigation(NavigationState::input(linked.tool))
    }

    fn with_navigation(navigation: NavigationState) -> Self {
        Self {
            navigation,
            url: apply_navigation_state(navigation),
            loading: LoadingOverlay::default(),
            history: HistoryLedger::new(),
            handoff: HandoffChannel::new(),
            prefill: PrefillSlots::default(),
        }
    }

    pub fn navigation(&self) -> NavigationState {
        self.navigation
    }

    pub fn active_tool(&self) -> ToolId {
        self.navigation.tool
    }

    /// Current query, without a leading `?`.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn loading(&self) -> &LoadingOverlay {
        &self.loading
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    pub fn handoff(&self) -> &HandoffChannel {
        &self.handoff
    }

    pub fn prefill(&self) -> &PrefillSlots {
        &self.prefill
    }

    pub fn start_loading(&mut self, message: impl Into<String>) -> bool {
        let changed = self.loading.start(message);
        if changed {
            geo_debug!("Loading overlay: {:?}", self.loading.message());
        }
        changed
    }

    pub fn stop_loading(&mut self) -> bool {
        let changed = self.loading.stop();
        if changed {
            geo_debug!("Loading overlay cleared");
        }
        changed
    }

    /// Records a completed generation at the head of the ledger.
    pub fn on_add_to_history(
        &mut self,
        tool: ToolId,
        description: &str,
        at: DateTime<Utc>,
    ) -> HistoryId {
        let id = self.history.record(tool, description, at);
        geo_info!(
            "History {} added for {} ({} entries)",
            id,
            tool,
            self.history.len()
        );
        id
    }

    pub fn remove_history(&mut self, id: HistoryId) -> bool {
        self.history.remove(id)
    }

    /// Hands recommender prompts to the rewriter and activates it.
    pub fn send_to_rewriter(&mut self, prompts: Vec<String>) -> ToolId {
        self.send(HandoffPayload::RecommenderToRewriter { prompts })
    }

    /// Hands rewritten content to insights and activates it.
    pub fn send_to_insights(&mut self, content: String, prompts: Vec<String>) -> ToolId {
        self.send(HandoffPayload::RewriterToInsights { content, prompts })
    }

    fn send(&mut self, payload: HandoffPayload) -> ToolId {
        let edge = payload.edge();
        self.prefill.clear();
        let destination = self.handoff.send(payload);
        geo_info!("Handoff {:?} -> {}", edge, destination);
        self.activate(destination);
        destination
    }

    /// Direct navigation through the tool selector. Pending handoffs and
    /// prefills are dropped so nothing stale reaches the next panel.
    /// Returns true if the active tool changed.
    pub fn select_tool(&mut self, tool: ToolId) -> bool {
        let dropped = self.handoff.clear();
        if dropped > 0 {
            geo_debug!("Dropped {} pending handoff(s) on direct navigation", dropped);
        }
        self.prefill.clear();
        if tool == self.navigation.tool {
            return false;
        }
        self.activate(tool);
        true
    }

    /// Activates the tool of a history entry with a seed built from it.
    /// Returns the tool, or `None` if the entry no longer exists.
    pub fn replay_history(&mut self, id: HistoryId) -> Option<ToolId> {
        let (navigation, seed) = self.history.replay(id)?;
        self.handoff.clear();
        self.prefill.set(seed);
        geo_info!("Replaying history {} in {}", id, navigation.tool);
        self.navigation = navigation;
        self.commit();
        Some(navigation.tool)
    }

    pub fn take_handoff(&mut self, edge: HandoffEdge) -> Option<HandoffPayload> {
        self.handoff.take(edge)
    }

    pub fn take_prefill(&mut self, tool: ToolId) -> Option<PrefilledState> {
        self.prefill.take(tool)
    }

    /// Everything waiting for `tool`, consumed as the panel mounts.
    pub fn take_seeds(&mut self, tool: ToolId) -> (Option<HandoffPayload>, Option<PrefilledState>) {
        let handoff = HandoffEdge::into_tool(tool).and_then(|edge| self.handoff.take(edge));
        (handoff, self.prefill.take(tool))
    }

    /// Follows an externally changed URL, already parsed. A different tool
    /// counts as direct navigation. Returns true if the tool changed.
    pub fn sync_to(&mut self, linked: NavigationState) -> bool {
        if linked.tool == self.navigation.tool {
            return false;
        }
        self.select_tool(linked.tool)
    }

    /// Mirrors the active panel's stage. Returns true if the URL changed.
    pub fn reflect_stage(&mut self, stage: Stage) -> bool {
        if self.navigation.stage == stage {
            return false;
        }
        self.navigation.stage = stage;
        self.commit();
        true
    }

    fn activate(&mut self, tool: ToolId) {
        self.navigation = NavigationState::input(tool);
        self.commit();
    }

    fn commit(&mut self) {
        self.url = apply_navigation_state(self.navigation);
        geo_debug!("URL replaced: ?{}", self.url);
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap()
    }

    fn assert_url_matches(controller: &WorkspaceController) {
        assert_eq!(
            controller.url(),
            apply_navigation_state(controller.navigation())
        );
    }

    #[test]
    fn starts_on_default_tool() {
        let controller = WorkspaceController::new();
        assert_eq!(
            controller.navigation(),
            NavigationState::input(ToolId::PromptRecommender)
        );
        assert_eq!(controller.url(), "tool=prompt-recommender&stage=input");
    }

    #[test]
    fn deep_link_ignores_stage() {
        let controller = WorkspaceController::from_query("?tool=insights-report&stage=expanded");
        assert_eq!(
            controller.navigation(),
            NavigationState::input(ToolId::InsightsReport)
        );
        assert_url_matches(&controller);
    }

    #[test]
    fn send_switches_tool_and_delivers_once() {
        let mut controller = WorkspaceController::new();
        let prompts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(
            controller.send_to_rewriter(prompts.clone()),
            ToolId::ContentRewriter
        );
        assert_eq!(controller.active_tool(), ToolId::ContentRewriter);
        assert_url_matches(&controller);

        let (handoff, prefill) = controller.take_seeds(ToolId::ContentRewriter);
        assert_eq!(
            handoff,
            Some(HandoffPayload::RecommenderToRewriter { prompts })
        );
        assert_eq!(prefill, None);
        assert_eq!(
            controller.take_handoff(HandoffEdge::RecommenderToRewriter),
            None
        );
    }

    #[test]
    fn direct_selection_never_delivers_pending_handoff() {
        let mut controller = WorkspaceController::new();
        controller.send_to_insights("copy".to_string(), vec!["a".to_string()]);
        assert!(controller.select_tool(ToolId::ContentRewriter));
        assert!(controller.select_tool(ToolId::InsightsReport));
        assert_eq!(controller.take_seeds(ToolId::InsightsReport), (None, None));
    }

    #[test]
    fn reselecting_the_active_tool_still_clears_handoffs() {
        let mut controller = WorkspaceController::new();
        controller.send_to_rewriter(vec!["a".to_string()]);
        assert!(!controller.select_tool(ToolId::ContentRewriter));
        assert!(!controller
            .handoff()
            .is_pending(HandoffEdge::RecommenderToRewriter));
    }

    #[test]
    fn replay_resets_other_prefills_and_handoffs() {
        let mut controller = WorkspaceController::new();
        let recommender = controller.on_add_to_history(ToolId::PromptRecommender, "Bakery", at());
        let rewriter = controller.on_add_to_history(ToolId::ContentRewriter, "a, b", at());

        assert_eq!(
            controller.replay_history(recommender),
            Some(ToolId::PromptRecommender)
        );
        controller.send_to_insights("copy".to_string(), Vec::new());
        assert_eq!(
            controller.replay_history(rewriter),
            Some(ToolId::ContentRewriter)
        );
        assert!(controller.prefill().peek(ToolId::PromptRecommender).is_none());
        assert!(!controller
            .handoff()
            .is_pending(HandoffEdge::RewriterToInsights));
        assert_eq!(
            controller.navigation(),
            NavigationState::input(ToolId::ContentRewriter)
        );

        let (handoff, prefill) = controller.take_seeds(ToolId::ContentRewriter);
        assert_eq!(handoff, None);
        assert_eq!(
            prefill,
            Some(PrefilledState::ContentRewriter {
                prompts: vec!["a".to_string(), "b".to_string()]
            })
        );
        assert!(controller.prefill().is_empty());
    }

    #[test]
    fn replay_of_deleted_entry_is_ignored() {
        let mut controller = WorkspaceController::new();
        let id = controller.on_add_to_history(ToolId::InsightsReport, "Courts - Retail", at());
        assert!(controller.remove_history(id));
        assert!(!controller.remove_history(id));
        assert_eq!(controller.replay_history(id), None);
        assert_eq!(controller.active_tool(), ToolId::PromptRecommender);
    }

    #[test]
    fn url_sync_switches_tool_and_clamps_garbage() {
        let mut controller = WorkspaceController::new();
        controller.send_to_rewriter(vec!["a".to_string()]);

        assert!(controller.sync_to(derive_navigation_state(
            "tool=insights-report&stage=output"
        )));
        assert_eq!(
            controller.navigation(),
            NavigationState::input(ToolId::InsightsReport)
        );
        assert!(!controller
            .handoff()
            .is_pending(HandoffEdge::RecommenderToRewriter));

        assert!(controller.sync_to(derive_navigation_state("tool=nonsense")));
        assert_eq!(controller.active_tool(), ToolId::PromptRecommender);
        assert_url_matches(&controller);
    }

    #[test]
    fn url_sync_to_same_tool_keeps_stage() {
        let mut controller = WorkspaceController::new();
        controller.reflect_stage(Stage::Output);
        assert!(!controller.sync_to(NavigationState {
            tool: ToolId::PromptRecommender,
            stage: Stage::Expanded,
        }));
        assert_eq!(controller.url(), "tool=prompt-recommender&stage=output");
    }

    #[test]
    fn reflect_stage_rewrites_url() {
        let mut controller = WorkspaceController::new();
        assert!(controller.reflect_stage(Stage::Output));
        assert!(!controller.reflect_stage(Stage::Output));
        assert_eq!(controller.url(), "tool=prompt-recommender&stage=output");
    }

    #[test]
    fn loading_is_last_writer_wins() {
        let mut controller = WorkspaceController::new();
        controller.start_loading("x");
        controller.start_loading("y");
        assert_eq!(controller.loading().message(), Some("y"));
        assert!(controller.stop_loading());
        assert_eq!(controller.loading(), &LoadingOverlay::Idle);
    }
}
