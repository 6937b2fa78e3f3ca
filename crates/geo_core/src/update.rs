use crate::{query_part, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Whatever the message, the returned state's URL matches its navigation
/// state; if the location has to change to get there, the last effect is a
/// [`Effect::ReplaceUrl`].
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    // The location the shell is showing before this message is applied.
    let shown_url = match &msg {
        Msg::UrlChanged(query) => query_part(query).to_string(),
        _ => state.url().to_string(),
    };

    let mut effects = match msg {
        Msg::UrlChanged(query) => state.follow_url(&query),
        Msg::ToolSelected(tool) => state.select_tool(tool),
        Msg::HistorySelected(id) => state.replay_history(id),
        Msg::HistoryDeleted(id) => {
            state.remove_history(id);
            Vec::new()
        }
        Msg::DraftEdited(edit) => {
            state.edit_draft(edit);
            Vec::new()
        }
        Msg::ResultEdited(edit) => {
            state.edit_result(edit);
            Vec::new()
        }
        Msg::SubmitClicked => {
            let request = state.panel().submit_request();
            state.begin_generation(request)
        }
        Msg::RegenerateClicked => {
            let request = state.panel().regenerate_request();
            state.begin_generation(request)
        }
        Msg::PromptRegenerateClicked { index } => {
            let request = state.panel().replace_prompt_request(index);
            state.begin_generation(request)
        }
        Msg::AdjustClicked(adjustment) => {
            let request = state.panel().adjust_request(adjustment);
            state.begin_generation(request)
        }
        Msg::UsePromptsInRewriter => state.hand_prompts_to_rewriter(),
        Msg::UseContentInInsights => state.hand_content_to_insights(),
        Msg::InsightsExpanded => {
            state.set_expanded(true);
            Vec::new()
        }
        Msg::InsightsCollapsed => {
            state.set_expanded(false);
            Vec::new()
        }
        Msg::SeedsCleared => {
            state.clear_seed();
            Vec::new()
        }
        Msg::SidebarToggled => {
            state.toggle_sidebar();
            Vec::new()
        }
        Msg::GenerationFinished {
            ticket,
            outcome,
            finished_at,
        } => {
            state.finish_generation(ticket, outcome, finished_at);
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    state.reflect_stage();
    if state.url() != shown_url {
        effects.push(Effect::ReplaceUrl {
            query: state.url().to_string(),
        });
    }

    (state, effects)
}

/// Opens the workspace on a deep link. A link that does not name the
/// mounted stage comes back with a [`Effect::ReplaceUrl`] correcting it.
pub fn open(query: &str) -> (AppState, Vec<Effect>) {
    update(AppState::from_url(query), Msg::UrlChanged(query.to_string()))
}
