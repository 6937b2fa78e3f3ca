//! Minimal state of the active tool panel. The stage shown in the URL is
//! derived from here and nowhere else.

use serde::Serialize;

use crate::{
    Adjustment, Audience, GenerationFailure, GenerationRequest, GenerationResult, HandoffPayload,
    PrefilledState, RewriteOptions, Stage, Tone, ToolId,
};

/// Panels offer between one and this many prompt fields.
pub const MAX_PROMPT_FIELDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PanelDraft {
    Recommender {
        business_description: String,
    },
    Rewriter {
        content: String,
        prompts: Vec<String>,
        options: RewriteOptions,
    },
    Insights {
        industry: String,
        website: String,
        content: String,
        prompts: Vec<String>,
    },
}

impl PanelDraft {
    fn empty(tool: ToolId) -> Self {
        match tool {
            ToolId::PromptRecommender => PanelDraft::Recommender {
                business_description: String::new(),
            },
            ToolId::ContentRewriter => PanelDraft::Rewriter {
                content: String::new(),
                prompts: vec![String::new()],
                options: RewriteOptions::default(),
            },
            ToolId::InsightsReport => PanelDraft::Insights {
                industry: String::new(),
                website: String::new(),
                content: String::new(),
                prompts: vec![String::new()],
            },
        }
    }

    fn prompts_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            PanelDraft::Recommender { .. } => None,
            PanelDraft::Rewriter { prompts, .. } | PanelDraft::Insights { prompts, .. } => {
                Some(prompts)
            }
        }
    }
}

/// A single edit to the active panel's form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    BusinessDescription(String),
    Content(String),
    Industry(String),
    Website(String),
    Prompt { index: usize, text: String },
    AddPrompt,
    RemovePrompt { index: usize },
    Tone(Option<Tone>),
    Audience(Option<Audience>),
    TogglePlatform(String),
    MaxWords(u32),
}

/// In-place editing of one recommended prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultEdit {
    Begin { index: usize },
    Text(String),
    Save,
    Cancel,
}

/// A recommended prompt being edited, with its unsaved text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptEdit {
    pub index: usize,
    pub text: String,
}

/// How the panel's inputs were seeded on mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeedSource {
    Handoff,
    History,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    tool: ToolId,
    draft: PanelDraft,
    result: Option<GenerationResult>,
    failure: Option<GenerationFailure>,
    expanded: bool,
    editing: Option<PromptEdit>,
    seed: Option<SeedSource>,
}

impl Panel {
    /// A freshly mounted panel, seeded from whichever payload it was handed.
    pub fn mount(
        tool: ToolId,
        handoff: Option<HandoffPayload>,
        prefill: Option<PrefilledState>,
    ) -> Self {
        let mut panel = Self {
            tool,
            draft: PanelDraft::empty(tool),
            result: None,
            failure: None,
            expanded: false,
            editing: None,
            seed: None,
        };
        if let Some(payload) = handoff {
            panel.seed_from_handoff(payload);
        } else if let Some(prefill) = prefill {
            panel.seed_from_history(prefill);
        }
        panel
    }

    fn seed_from_handoff(&mut self, payload: HandoffPayload) {
        match (&mut self.draft, payload) {
            (
                PanelDraft::Rewriter { prompts, .. },
                HandoffPayload::RecommenderToRewriter { prompts: incoming },
            ) => {
                *prompts = with_placeholder(incoming);
            }
            (
                PanelDraft::Insights {
                    content, prompts, ..
                },
                HandoffPayload::RewriterToInsights {
                    content: incoming_content,
                    prompts: incoming_prompts,
                },
            ) => {
                *content = incoming_content;
                *prompts = with_placeholder(incoming_prompts);
            }
            (_, payload) => {
                geo_logging::geo_warn!(
                    "Dropping {:?} handoff delivered to {}",
                    payload.edge(),
                    self.tool
                );
                return;
            }
        }
        self.seed = Some(SeedSource::Handoff);
    }

    fn seed_from_history(&mut self, prefill: PrefilledState) {
        match (&mut self.draft, prefill) {
            (
                PanelDraft::Recommender {
                    business_description,
                },
                PrefilledState::PromptRecommender {
                    business_description: seed,
                },
            ) => *business_description = seed,
            (PanelDraft::Rewriter { prompts, .. }, PrefilledState::ContentRewriter { prompts: seed }) => {
                *prompts = with_placeholder(seed)
            }
            (
                PanelDraft::Insights {
                    industry, prompts, ..
                },
                PrefilledState::InsightsReport {
                    industry: seed_industry,
                    prompts: seed_prompts,
                },
            ) => {
                *industry = seed_industry;
                *prompts = with_placeholder(seed_prompts);
            }
            (_, prefill) => {
                geo_logging::geo_warn!(
                    "Dropping {} prefill delivered to {}",
                    prefill.tool(),
                    self.tool
                );
                return;
            }
        }
        self.seed = Some(SeedSource::History);
    }

    pub fn tool(&self) -> ToolId {
        self.tool
    }

    pub fn draft(&self) -> &PanelDraft {
        &self.draft
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn failure(&self) -> Option<&GenerationFailure> {
        self.failure.as_ref()
    }

    pub fn seed(&self) -> Option<SeedSource> {
        self.seed
    }

    pub fn editing(&self) -> Option<&PromptEdit> {
        self.editing.as_ref()
    }

    pub fn stage(&self) -> Stage {
        match (&self.result, self.expanded) {
            (None, _) => Stage::Input,
            (Some(GenerationResult::Dashboard(_)), true) => Stage::Expanded,
            (Some(_), _) => Stage::Output,
        }
    }

    /// Applies a form edit. Returns false if the edit does not fit this panel.
    pub fn edit(&mut self, edit: DraftEdit) -> bool {
        match (&mut self.draft, edit) {
            (
                PanelDraft::Recommender {
                    business_description,
                },
                DraftEdit::BusinessDescription(text),
            ) => *business_description = text,
            (PanelDraft::Rewriter { content, .. }, DraftEdit::Content(text))
            | (PanelDraft::Insights { content, .. }, DraftEdit::Content(text)) => *content = text,
            (PanelDraft::Insights { industry, .. }, DraftEdit::Industry(text)) => *industry = text,
            (PanelDraft::Insights { website, .. }, DraftEdit::Website(text)) => *website = text,
            (PanelDraft::Rewriter { options, .. }, DraftEdit::Tone(tone)) => options.tone = tone,
            (PanelDraft::Rewriter { options, .. }, DraftEdit::Audience(audience)) => {
                options.audience = audience
            }
            (PanelDraft::Rewriter { options, .. }, DraftEdit::TogglePlatform(name)) => {
                if !options.toggle_platform(&name) {
                    return false;
                }
            }
            (PanelDraft::Rewriter { options, .. }, DraftEdit::MaxWords(words)) => {
                options.set_max_words(words)
            }
            (draft, DraftEdit::Prompt { index, text }) => {
                match draft.prompts_mut().and_then(|prompts| prompts.get_mut(index)) {
                    Some(slot) => *slot = text,
                    None => return false,
                }
            }
            (draft, DraftEdit::AddPrompt) => match draft.prompts_mut() {
                Some(prompts) if prompts.len() < MAX_PROMPT_FIELDS => prompts.push(String::new()),
                _ => return false,
            },
            (draft, DraftEdit::RemovePrompt { index }) => match draft.prompts_mut() {
                Some(prompts) if prompts.len() > 1 && index < prompts.len() => {
                    prompts.remove(index);
                }
                _ => return false,
            },
            _ => return false,
        }
        true
    }

    /// The request a submit click would send, if the form is complete.
    pub fn submit_request(&self) -> Option<GenerationRequest> {
        match &self.draft {
            PanelDraft::Recommender {
                business_description,
            } => {
                let business_description = business_description.trim();
                (!business_description.is_empty()).then(|| GenerationRequest::Recommend {
                    business_description: business_description.to_string(),
                })
            }
            PanelDraft::Rewriter {
                content,
                prompts,
                options,
            } => {
                let prompts = filled(prompts);
                (!content.trim().is_empty() && !prompts.is_empty()).then(|| {
                    GenerationRequest::Rewrite {
                        content: content.clone(),
                        prompts,
                        options: options.clone(),
                    }
                })
            }
            PanelDraft::Insights {
                industry,
                website,
                prompts,
                ..
            } => {
                let prompts = filled(prompts);
                (!industry.trim().is_empty() && !website.trim().is_empty() && !prompts.is_empty())
                    .then(|| GenerationRequest::Analyze {
                        industry: industry.trim().to_string(),
                        website: website.trim().to_string(),
                        prompts,
                    })
            }
        }
    }

    /// Regenerating needs an existing result and a complete form.
    pub fn regenerate_request(&self) -> Option<GenerationRequest> {
        self.result.as_ref()?;
        match self.submit_request()? {
            GenerationRequest::Recommend {
                business_description,
            } => Some(GenerationRequest::RegeneratePrompts {
                business_description,
            }),
            GenerationRequest::Rewrite {
                content,
                prompts,
                options,
            } => Some(GenerationRequest::RegenerateRewrite {
                content,
                prompts,
                options,
            }),
            GenerationRequest::Analyze {
                industry,
                website,
                prompts,
            } => Some(GenerationRequest::RegenerateInsights {
                industry,
                website,
                prompts,
            }),
            _ => None,
        }
    }

    pub fn replace_prompt_request(&self, index: usize) -> Option<GenerationRequest> {
        match &self.result {
            Some(GenerationResult::Prompts(prompts)) => {
                prompts
                    .get(index)
                    .map(|suggestion| GenerationRequest::ReplacePrompt {
                        index,
                        current: suggestion.prompt.clone(),
                    })
            }
            _ => None,
        }
    }

    pub fn adjust_request(&self, adjustment: Adjustment) -> Option<GenerationRequest> {
        match &self.result {
            Some(GenerationResult::Rewritten { content }) => Some(GenerationRequest::AdjustRewrite {
                content: content.clone(),
                adjustment,
            }),
            _ => None,
        }
    }

    /// Stores a validated result. A prompt replacement edits the current
    /// prompt list in place.
    pub fn apply_result(&mut self, result: GenerationResult) {
        self.failure = None;
        self.editing = None;
        match (result, &mut self.result) {
            (
                GenerationResult::ReplacementPrompt { index, suggestion },
                Some(GenerationResult::Prompts(prompts)),
            ) => {
                if let Some(slot) = prompts.get_mut(index) {
                    *slot = suggestion;
                }
            }
            (GenerationResult::ReplacementPrompt { .. }, _) => {
                geo_logging::geo_warn!("Prompt replacement arrived without a prompt list");
            }
            (result, current) => {
                self.expanded = false;
                *current = Some(result);
            }
        }
    }

    /// Edits a recommended prompt in place. Returns false if the edit does
    /// not apply; saving blank text keeps the edit open.
    pub fn edit_result(&mut self, edit: ResultEdit) -> bool {
        match edit {
            ResultEdit::Begin { index } => match &self.result {
                Some(GenerationResult::Prompts(prompts)) => match prompts.get(index) {
                    Some(suggestion) => {
                        self.editing = Some(PromptEdit {
                            index,
                            text: suggestion.prompt.clone(),
                        });
                        true
                    }
                    None => false,
                },
                _ => false,
            },
            ResultEdit::Text(text) => match &mut self.editing {
                Some(editing) => {
                    editing.text = text;
                    true
                }
                None => false,
            },
            ResultEdit::Save => {
                let Some(editing) = &self.editing else {
                    return false;
                };
                let text = editing.text.trim();
                if text.is_empty() {
                    return false;
                }
                let slot = match &mut self.result {
                    Some(GenerationResult::Prompts(prompts)) => prompts.get_mut(editing.index),
                    _ => None,
                };
                let saved = match slot {
                    Some(slot) => {
                        slot.prompt = text.to_string();
                        true
                    }
                    None => false,
                };
                self.editing = None;
                saved
            }
            ResultEdit::Cancel => self.editing.take().is_some(),
        }
    }

    /// Records a failed run. Any earlier result stays on screen.
    pub fn apply_failure(&mut self, failure: GenerationFailure) {
        self.failure = Some(failure);
    }

    /// Only a finished insights dashboard can be expanded. Returns true if
    /// the flag changed.
    pub fn set_expanded(&mut self, expanded: bool) -> bool {
        let can_expand = matches!(self.result, Some(GenerationResult::Dashboard(_)));
        if (expanded && !can_expand) || self.expanded == expanded {
            return false;
        }
        self.expanded = expanded;
        true
    }

    /// Discards inputs that arrived with the mount. Returns false if there
    /// were none.
    pub fn clear_seed(&mut self) -> bool {
        if self.seed.take().is_none() {
            return false;
        }
        match &mut self.draft {
            PanelDraft::Recommender {
                business_description,
            } => business_description.clear(),
            PanelDraft::Rewriter { prompts, .. } => *prompts = vec![String::new()],
            PanelDraft::Insights {
                content, prompts, ..
            } => {
                content.clear();
                *prompts = vec![String::new()];
            }
        }
        true
    }

    /// Prompts the recommender can hand to the rewriter.
    pub fn prompts_for_rewriter(&self) -> Option<Vec<String>> {
        match &self.result {
            Some(GenerationResult::Prompts(prompts)) => {
                Some(prompts.iter().map(|s| s.prompt.clone()).collect())
            }
            _ => None,
        }
    }

    /// Content and prompts the rewriter can hand to insights.
    pub fn content_for_insights(&self) -> Option<(String, Vec<String>)> {
        match (&self.result, &self.draft) {
            (Some(GenerationResult::Rewritten { content }), PanelDraft::Rewriter { prompts, .. }) => {
                Some((content.clone(), filled(prompts)))
            }
            _ => None,
        }
    }
}

fn filled(prompts: &[String]) -> Vec<String> {
    prompts
        .iter()
        .map(|prompt| prompt.trim())
        .filter(|prompt| !prompt.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn with_placeholder(mut prompts: Vec<String>) -> Vec<String> {
    prompts.truncate(MAX_PROMPT_FIELDS);
    if prompts.is_empty() {
        prompts.push(String::new());
    }
    prompts
}
