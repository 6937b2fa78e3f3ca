//! Mapping between [`NavigationState`] and the `tool`/`stage` URL query.

use serde::Serialize;
use url::form_urlencoded;

use crate::{Stage, ToolId};

pub const TOOL_PARAM: &str = "tool";
pub const STAGE_PARAM: &str = "stage";
/// Older links carried the stage under `state`.
const LEGACY_STAGE_PARAM: &str = "state";

/// The active tool and its stage. Mirrored into the URL after every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct NavigationState {
    pub tool: ToolId,
    pub stage: Stage,
}

impl NavigationState {
    pub fn new(tool: ToolId, stage: Stage) -> Self {
        Self { tool, stage }
    }

    /// Entry state for a freshly mounted tool.
    pub fn input(tool: ToolId) -> Self {
        Self::new(tool, Stage::Input)
    }
}

/// Parses navigation state from a query string.
///
/// Accepts a bare query (`tool=...`), a query with its leading `?`, or a path
/// with a query (`/tool?tool=...`). Anything after `#` is ignored. A missing
/// or unknown tool yields the default tool in the input stage; an unknown
/// stage for a known tool yields the input stage. Never fails.
pub fn derive_navigation_state(query: &str) -> NavigationState {
    let query = query_part(query);

    let mut tool_raw: Option<String> = None;
    let mut stage_raw: Option<String> = None;
    let mut legacy_stage_raw: Option<String> = None;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match &*key {
            TOOL_PARAM => &mut tool_raw,
            STAGE_PARAM => &mut stage_raw,
            LEGACY_STAGE_PARAM => &mut legacy_stage_raw,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    let Some(tool) = tool_raw.as_deref().and_then(ToolId::parse) else {
        return NavigationState::default();
    };
    let stage = stage_raw
        .or(legacy_stage_raw)
        .as_deref()
        .and_then(Stage::parse)
        .unwrap_or_default();
    NavigationState::new(tool, stage)
}

/// Renders the canonical query for `state`, without a leading `?`.
pub fn apply_navigation_state(state: NavigationState) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(TOOL_PARAM, state.tool.as_str())
        .append_pair(STAGE_PARAM, state.stage.as_str())
        .finish()
}

/// Strips path, `?` and fragment so only the query remains.
pub fn query_part(raw: &str) -> &str {
    let raw = raw.trim();
    let raw = raw.split_once('#').map_or(raw, |(before, _)| before);
    match raw.split_once('?') {
        Some((_, query)) => query,
        None => raw,
    }
}
