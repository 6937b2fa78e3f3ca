use chrono::Utc;
use geo_core::{
    apply_navigation_state, derive_navigation_state, open, update, AppState, DraftEdit, Effect,
    GenerationResult, Msg, NavigationState, PromptSuggestion, Stage, ToolId,
};
use pretty_assertions::assert_eq;

fn assert_url_in_sync(state: &AppState) {
    assert_eq!(state.url(), apply_navigation_state(state.navigation()));
    assert_eq!(state.navigation().stage, state.panel().stage());
    assert_eq!(state.navigation().tool, state.panel().tool());
}

#[test]
fn link_to_another_tool_mounts_it_without_rewriting_canonical_url() {
    let (state, effects) = update(
        AppState::new(),
        Msg::UrlChanged("?tool=content-rewriter&stage=input".to_string()),
    );
    assert!(effects.is_empty());
    assert_eq!(state.panel().tool(), ToolId::ContentRewriter);
    assert_url_in_sync(&state);
}

#[test]
fn malformed_link_is_corrected_silently() {
    let (state, _) = update(AppState::new(), Msg::ToolSelected(ToolId::InsightsReport));
    let (state, effects) = update(
        state,
        Msg::UrlChanged("/tool?tool=bogus&stage=output".to_string()),
    );
    assert_eq!(
        effects,
        vec![Effect::ReplaceUrl {
            query: "tool=prompt-recommender&stage=input".to_string(),
        }]
    );
    assert_eq!(
        state.navigation(),
        NavigationState::input(ToolId::PromptRecommender)
    );
    assert_url_in_sync(&state);
}

#[test]
fn linked_stage_cannot_claim_output_without_a_result() {
    let (state, effects) = update(
        AppState::new(),
        Msg::UrlChanged("tool=prompt-recommender&stage=output".to_string()),
    );
    assert_eq!(
        effects,
        vec![Effect::ReplaceUrl {
            query: "tool=prompt-recommender&stage=input".to_string(),
        }]
    );
    assert_eq!(state.navigation().stage, Stage::Input);
}

#[test]
fn deep_link_opens_the_linked_tool() {
    let state = AppState::from_url("tool=insights-report&stage=expanded");
    assert_eq!(state.panel().tool(), ToolId::InsightsReport);
    assert_eq!(state.url(), "tool=insights-report&stage=input");
    assert_url_in_sync(&state);

    let state = AppState::from_url("tool=ai-prompts");
    assert_eq!(state.panel().tool(), ToolId::PromptRecommender);
}

#[test]
fn opening_a_stale_link_corrects_the_location() {
    let (state, effects) = open("/studio?tool=insights-report&stage=expanded");
    assert_eq!(state.panel().tool(), ToolId::InsightsReport);
    assert_eq!(
        effects,
        vec![Effect::ReplaceUrl {
            query: "tool=insights-report&stage=input".to_string(),
        }]
    );
    assert_url_in_sync(&state);

    let (_, effects) = open("tool=content-rewriter&stage=input");
    assert!(effects.is_empty());
}

#[test]
fn url_stays_in_sync_through_a_session() {
    let messages = vec![
        Msg::DraftEdited(DraftEdit::BusinessDescription("Bakery".to_string())),
        Msg::SubmitClicked,
        Msg::ToolSelected(ToolId::ContentRewriter),
        Msg::UrlChanged("tool=insights-report".to_string()),
        Msg::SidebarToggled,
        Msg::ToolSelected(ToolId::PromptRecommender),
        Msg::DraftEdited(DraftEdit::BusinessDescription("Florist".to_string())),
        Msg::SubmitClicked,
    ];

    let mut state = AppState::new();
    for msg in messages {
        let (next, effects) = update(state, msg);
        assert_url_in_sync(&next);
        if let Some(Effect::ReplaceUrl { query }) = effects.last() {
            assert_eq!(query, next.url());
        }
        state = next;
    }

    let ticket = state.in_flight_ticket().expect("florist run in flight");
    let (state, effects) = update(
        state,
        Msg::GenerationFinished {
            ticket,
            outcome: Ok(GenerationResult::Prompts(vec![PromptSuggestion {
                prompt: "best florist".to_string(),
                reason: String::new(),
            }])),
            finished_at: Utc::now(),
        },
    );
    assert_url_in_sync(&state);
    assert_eq!(
        derive_navigation_state(state.url()),
        NavigationState::new(ToolId::PromptRecommender, Stage::Output)
    );
    assert_eq!(
        effects.last(),
        Some(&Effect::ReplaceUrl {
            query: "tool=prompt-recommender&stage=output".to_string(),
        })
    );
}

#[test]
fn link_change_while_loading_cancels_the_run() {
    let (state, _) = update(
        AppState::new(),
        Msg::DraftEdited(DraftEdit::BusinessDescription("Bakery".to_string())),
    );
    let (state, _) = update(state, Msg::SubmitClicked);
    let ticket = state.in_flight_ticket().expect("run in flight");

    let (state, effects) = update(
        state,
        Msg::UrlChanged("tool=content-rewriter&stage=input".to_string()),
    );
    assert_eq!(effects, vec![Effect::CancelGenerator { ticket }]);
    assert_eq!(state.view().overlay, None);
}

#[test]
fn every_tab_is_listed_with_one_active() {
    let (state, _) = update(AppState::new(), Msg::ToolSelected(ToolId::ContentRewriter));
    let view = state.view();
    let active: Vec<_> = view
        .tools
        .iter()
        .filter(|tab| tab.active)
        .map(|tab| tab.tool)
        .collect();
    assert_eq!(view.tools.len(), 3);
    assert_eq!(active, vec![ToolId::ContentRewriter]);
}
